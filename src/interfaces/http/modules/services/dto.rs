//! Service catalog DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::{EditService, RegisterService};
use crate::domain::Service;
use crate::interfaces::http::modules::users::PhotoDto;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ServiceDto {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<PhotoDto>,
    pub barbershop_id: i32,
}

impl From<Service> for ServiceDto {
    fn from(s: Service) -> Self {
        Self {
            id: s.id,
            name: s.name,
            description: s.description,
            price: s.price,
            photo: s.photo.map(PhotoDto::from),
            barbershop_id: s.barbershop_id,
        }
    }
}

/// Body for creating or replacing a service
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ServiceRequest {
    #[validate(length(min = 1, max = 100, message = "nome deve ter entre 1 e 100 caracteres"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 1000, message = "descrição muito longa"))]
    pub description: String,
    #[validate(range(min = 0.0, message = "preço não pode ser negativo"))]
    pub price: f64,
    /// Public URL of an uploaded photo
    pub photo_url: Option<String>,
}

impl From<ServiceRequest> for RegisterService {
    fn from(r: ServiceRequest) -> Self {
        Self {
            name: r.name,
            description: r.description,
            price: r.price,
            photo_url: r.photo_url,
        }
    }
}

impl ServiceRequest {
    pub fn into_edit(self, id: i32) -> EditService {
        EditService {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            photo_url: self.photo_url,
        }
    }
}
