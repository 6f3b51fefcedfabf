//! User DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::EditProfile;
use crate::domain::{PhotoRef, User};

/// Uploaded photo as seen by API clients
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PhotoDto {
    pub url: String,
    pub key: String,
}

impl From<PhotoRef> for PhotoDto {
    fn from(p: PhotoRef) -> Self {
        Self {
            url: p.url,
            key: p.key,
        }
    }
}

/// User API representation; never carries the credential hash or reset token
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub id: i32,
    pub name: String,
    pub email: String,
    /// `client` or `shop_owner`
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<PhotoDto>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            role: u.role.as_str().to_string(),
            photo: u.photo.map(PhotoDto::from),
            created_at: u.created_at,
        }
    }
}

/// Profile update; omitted fields are left as they are
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 100, message = "nome deve ter entre 1 e 100 caracteres"))]
    pub name: Option<String>,
    #[validate(email(message = "e-mail inválido"))]
    pub email: Option<String>,
    /// URL of a newly uploaded photo
    pub photo_url: Option<String>,
}

impl From<UpdateUserRequest> for EditProfile {
    fn from(r: UpdateUserRequest) -> Self {
        Self {
            name: r.name,
            email: r.email,
            photo_url: r.photo_url,
        }
    }
}
