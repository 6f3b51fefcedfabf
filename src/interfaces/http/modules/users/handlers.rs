//! User API handlers
//!
//! Delegates to `UserService` from the application/identity layer.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use super::dto::{UpdateUserRequest, UserDto};
use crate::application::UserService;
use crate::domain::DomainError;
use crate::interfaces::http::common::{domain_error, ApiError, ApiResponse, ValidatedJson};
use crate::interfaces::http::middleware::AuthenticatedUser;

#[derive(Clone)]
pub struct UserHandlerState {
    pub user_service: Arc<UserService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "User list", body = ApiResponse<Vec<UserDto>>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_users(
    State(state): State<UserHandlerState>,
    _user: AuthenticatedUser,
) -> Result<Json<ApiResponse<Vec<UserDto>>>, ApiError> {
    let users = state.user_service.list_users().await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(
        users.into_iter().map(UserDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User details", body = ApiResponse<UserDto>),
        (status = 400, description = "Not found")
    )
)]
pub async fn get_user(
    State(state): State<UserHandlerState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    match state.user_service.get_user(id).await {
        Ok(Some(user)) => Ok(Json(ApiResponse::success(UserDto::from(user)))),
        Ok(None) => Err(domain_error(DomainError::query("Usuário não encontrado."))),
        Err(e) => Err(domain_error(e)),
    }
}

#[utoipa::path(
    put,
    path = "/api/v1/users/me",
    tag = "Users",
    security(("bearer_auth" = [])),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Profile updated", body = ApiResponse<UserDto>),
        (status = 400, description = "E-mail already in use"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn update_me(
    State(state): State<UserHandlerState>,
    user: AuthenticatedUser,
    ValidatedJson(request): ValidatedJson<UpdateUserRequest>,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    let updated = state
        .user_service
        .update_user(user.user_id, request.into())
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(UserDto::from(updated))))
}

#[utoipa::path(
    delete,
    path = "/api/v1/users/me",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Account deleted", body = ApiResponse<UserDto>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn delete_me(
    State(state): State<UserHandlerState>,
    user: AuthenticatedUser,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    let deleted = state
        .user_service
        .delete_user(user.user_id)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(UserDto::from(deleted))))
}
