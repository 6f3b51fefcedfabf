//! Service catalog API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::dto::{ServiceDto, ServiceRequest};
use crate::application::CatalogService;
use crate::interfaces::http::common::{domain_error, ApiError, ApiResponse, ValidatedJson};
use crate::interfaces::http::middleware::AuthenticatedUser;

#[derive(Clone)]
pub struct ServiceHandlerState {
    pub catalog_service: Arc<CatalogService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/barbershops/{id}/services",
    tag = "Services",
    params(("id" = i32, Path, description = "Barbershop ID")),
    responses(
        (status = 200, description = "Services of the barbershop", body = ApiResponse<Vec<ServiceDto>>)
    )
)]
pub async fn list_barbershop_services(
    State(state): State<ServiceHandlerState>,
    Path(barbershop_id): Path<i32>,
) -> Result<Json<ApiResponse<Vec<ServiceDto>>>, ApiError> {
    let services = state
        .catalog_service
        .list_for_barbershop(barbershop_id)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(
        services.into_iter().map(ServiceDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/services/{id}",
    tag = "Services",
    params(("id" = i32, Path, description = "Service ID")),
    responses(
        (status = 200, description = "Service details", body = ApiResponse<ServiceDto>),
        (status = 400, description = "Service not found")
    )
)]
pub async fn get_service(
    State(state): State<ServiceHandlerState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<ServiceDto>>, ApiError> {
    let service = state.catalog_service.get(id).await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(service.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/services",
    tag = "Services",
    security(("bearer_auth" = [])),
    request_body = ServiceRequest,
    responses(
        (status = 201, description = "Service created", body = ApiResponse<ServiceDto>),
        (status = 400, description = "No barbershop or duplicate name")
    )
)]
pub async fn create_service(
    State(state): State<ServiceHandlerState>,
    user: AuthenticatedUser,
    ValidatedJson(request): ValidatedJson<ServiceRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ServiceDto>>), ApiError> {
    let service = state
        .catalog_service
        .create(request.into(), user.user_id)
        .await
        .map_err(domain_error)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(service.into()))))
}

#[utoipa::path(
    put,
    path = "/api/v1/services/{id}",
    tag = "Services",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Service ID")),
    request_body = ServiceRequest,
    responses(
        (status = 200, description = "Service updated", body = ApiResponse<ServiceDto>),
        (status = 400, description = "Not found or duplicate name"),
        (status = 403, description = "Service belongs to another barbershop")
    )
)]
pub async fn update_service(
    State(state): State<ServiceHandlerState>,
    user: AuthenticatedUser,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<ServiceRequest>,
) -> Result<Json<ApiResponse<ServiceDto>>, ApiError> {
    let service = state
        .catalog_service
        .edit(request.into_edit(id), user.user_id)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(service.into())))
}

#[utoipa::path(
    delete,
    path = "/api/v1/services/{id}",
    tag = "Services",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Service ID")),
    responses(
        (status = 200, description = "Service removed", body = ApiResponse<ServiceDto>),
        (status = 403, description = "Service belongs to another barbershop")
    )
)]
pub async fn delete_service(
    State(state): State<ServiceHandlerState>,
    user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<ServiceDto>>, ApiError> {
    let service = state
        .catalog_service
        .delete(id, user.user_id)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(service.into())))
}
