//! Barbershop DTOs

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::application::{BarbershopDetails, EditBarbershop, RegisterBarbershop};
use crate::domain::Barbershop;
use crate::interfaces::http::modules::services::ServiceDto;
use crate::interfaces::http::modules::users::PhotoDto;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BarbershopDto {
    pub id: i32,
    pub name: String,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<PhotoDto>,
    pub owner_id: i32,
}

impl From<Barbershop> for BarbershopDto {
    fn from(b: Barbershop) -> Self {
        Self {
            id: b.id,
            name: b.name,
            address: b.address,
            photo: b.photo.map(PhotoDto::from),
            owner_id: b.owner_id,
        }
    }
}

/// Barbershop with its catalog
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BarbershopDetailsDto {
    #[serde(flatten)]
    pub barbershop: BarbershopDto,
    pub services: Vec<ServiceDto>,
}

impl From<BarbershopDetails> for BarbershopDetailsDto {
    fn from(d: BarbershopDetails) -> Self {
        Self {
            barbershop: d.barbershop.into(),
            services: d.services.into_iter().map(ServiceDto::from).collect(),
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBarbershopRequest {
    #[validate(length(min = 1, max = 100, message = "nome deve ter entre 1 e 100 caracteres"))]
    pub name: String,
    #[validate(length(min = 1, max = 255, message = "endereço é obrigatório"))]
    pub address: String,
    /// Public URL of an uploaded photo
    pub photo_url: Option<String>,
}

impl From<CreateBarbershopRequest> for RegisterBarbershop {
    fn from(r: CreateBarbershopRequest) -> Self {
        Self {
            name: r.name,
            address: r.address,
            photo_url: r.photo_url,
        }
    }
}

/// Edit of the caller's barbershop; without a new photo the current one stays
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBarbershopRequest {
    pub id: Option<i32>,
    #[validate(length(min = 1, max = 100, message = "nome deve ter entre 1 e 100 caracteres"))]
    pub name: String,
    #[validate(length(min = 1, max = 255, message = "endereço é obrigatório"))]
    pub address: String,
    /// Public URL of an uploaded photo
    pub photo_url: Option<String>,
}

impl From<UpdateBarbershopRequest> for EditBarbershop {
    fn from(r: UpdateBarbershopRequest) -> Self {
        Self {
            id: r.id,
            name: r.name,
            address: r.address,
            photo_url: r.photo_url,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct SearchParams {
    /// Case-sensitive fragment of the barbershop name
    #[serde(default)]
    pub name: String,
}
