//! Authentication API handlers

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use super::dto::{
    ChangePasswordRequest, LoginRequest, LoginResponse, PasswordResetConfirmRequest,
    PasswordResetRequest, RegisterRequest,
};
use crate::application::{RegisterUser, UserService};
use crate::domain::{DomainError, UserRole};
use crate::interfaces::http::common::{domain_error, ApiError, ApiResponse, EmptyData, ValidatedJson};
use crate::interfaces::http::middleware::AuthenticatedUser;
use crate::interfaces::http::modules::users::UserDto;

/// Auth state
#[derive(Clone)]
pub struct AuthHandlerState {
    pub user_service: Arc<UserService>,
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Successful login", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    let auth = state
        .user_service
        .login(&request.email, &request.password)
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(LoginResponse {
        token: auth.token,
        token_type: auth.token_type,
        expires_in: auth.expires_in,
        user: UserDto::from(auth.user),
    })))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User created", body = ApiResponse<UserDto>),
        (status = 400, description = "E-mail already registered"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn register(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserDto>>), ApiError> {
    let user = state
        .user_service
        .register(RegisterUser {
            name: request.name,
            email: request.email,
            password: request.password,
            role: request
                .role
                .as_deref()
                .map(UserRole::parse)
                .unwrap_or(UserRole::Client),
            photo_url: request.photo_url,
        })
        .await
        .map_err(domain_error)?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(UserDto::from(user)))))
}

#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user info", body = ApiResponse<UserDto>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn get_current_user(
    State(state): State<AuthHandlerState>,
    user: AuthenticatedUser,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    let found = state
        .user_service
        .get_user(user.user_id)
        .await
        .map_err(domain_error)?
        .ok_or_else(|| domain_error(DomainError::query("Usuário não encontrado.")))?;

    Ok(Json(ApiResponse::success(UserDto::from(found))))
}

#[utoipa::path(
    put,
    path = "/api/v1/auth/change-password",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed", body = ApiResponse<EmptyData>),
        (status = 401, description = "Invalid current password"),
        (status = 422, description = "New password too short")
    )
)]
pub async fn change_password(
    State(state): State<AuthHandlerState>,
    user: AuthenticatedUser,
    ValidatedJson(request): ValidatedJson<ChangePasswordRequest>,
) -> Result<Json<ApiResponse<EmptyData>>, ApiError> {
    state
        .user_service
        .change_password(user.user_id, &request.current_password, &request.new_password)
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(EmptyData {})))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/password-reset",
    tag = "Authentication",
    request_body = PasswordResetRequest,
    responses(
        (status = 200, description = "Reset token sent by e-mail", body = ApiResponse<EmptyData>),
        (status = 400, description = "Unknown e-mail")
    )
)]
pub async fn request_password_reset(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<PasswordResetRequest>,
) -> Result<Json<ApiResponse<EmptyData>>, ApiError> {
    state
        .user_service
        .request_password_reset(&request.email)
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(EmptyData {})))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/password-reset/confirm",
    tag = "Authentication",
    request_body = PasswordResetConfirmRequest,
    responses(
        (status = 200, description = "Password replaced", body = ApiResponse<EmptyData>),
        (status = 400, description = "Invalid or expired token")
    )
)]
pub async fn confirm_password_reset(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<PasswordResetConfirmRequest>,
) -> Result<Json<ApiResponse<EmptyData>>, ApiError> {
    state
        .user_service
        .reset_password(&request.email, &request.token, &request.new_password)
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(EmptyData {})))
}
