//! Authentication DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::interfaces::http::modules::users::UserDto;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "e-mail inválido"))]
    pub email: String,
    #[validate(length(min = 1, message = "senha é obrigatória"))]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: UserDto,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100, message = "nome deve ter entre 1 e 100 caracteres"))]
    pub name: String,
    #[validate(email(message = "e-mail inválido"))]
    pub email: String,
    #[validate(length(min = 6, max = 128, message = "senha deve ter entre 6 e 128 caracteres"))]
    pub password: String,
    /// `client` (default) or `shop_owner`
    pub role: Option<String>,
    /// Public URL of an uploaded photo
    pub photo_url: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "senha atual é obrigatória"))]
    pub current_password: String,
    #[validate(length(min = 6, max = 128, message = "nova senha deve ter entre 6 e 128 caracteres"))]
    pub new_password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct PasswordResetRequest {
    #[validate(email(message = "e-mail inválido"))]
    pub email: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct PasswordResetConfirmRequest {
    #[validate(email(message = "e-mail inválido"))]
    pub email: String,
    #[validate(length(min = 1, message = "token é obrigatório"))]
    pub token: String,
    #[validate(length(min = 6, max = 128, message = "nova senha deve ter entre 6 e 128 caracteres"))]
    pub new_password: String,
}
