//! Barbershop API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::dto::{
    BarbershopDetailsDto, BarbershopDto, CreateBarbershopRequest, SearchParams,
    UpdateBarbershopRequest,
};
use crate::application::BarbershopService;
use crate::interfaces::http::common::{domain_error, ApiError, ApiResponse, ValidatedJson};
use crate::interfaces::http::middleware::AuthenticatedUser;

#[derive(Clone)]
pub struct BarbershopHandlerState {
    pub barbershop_service: Arc<BarbershopService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/barbershops",
    tag = "Barbershops",
    responses(
        (status = 200, description = "All barbershops", body = ApiResponse<Vec<BarbershopDto>>)
    )
)]
pub async fn list_barbershops(
    State(state): State<BarbershopHandlerState>,
) -> Result<Json<ApiResponse<Vec<BarbershopDto>>>, ApiError> {
    let shops = state.barbershop_service.list().await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(
        shops.into_iter().map(BarbershopDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/barbershops/search",
    tag = "Barbershops",
    params(SearchParams),
    responses(
        (status = 200, description = "Barbershops whose name contains the fragment", body = ApiResponse<Vec<BarbershopDto>>)
    )
)]
pub async fn search_barbershops(
    State(state): State<BarbershopHandlerState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<ApiResponse<Vec<BarbershopDto>>>, ApiError> {
    let shops = state
        .barbershop_service
        .search_by_name(&params.name)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(
        shops.into_iter().map(BarbershopDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/barbershops/{id}",
    tag = "Barbershops",
    params(("id" = i32, Path, description = "Barbershop ID")),
    responses(
        (status = 200, description = "Barbershop with services", body = ApiResponse<BarbershopDetailsDto>),
        (status = 400, description = "Barbershop not found")
    )
)]
pub async fn get_barbershop(
    State(state): State<BarbershopHandlerState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<BarbershopDetailsDto>>, ApiError> {
    let details = state.barbershop_service.get(id).await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(details.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/barbershops/mine",
    tag = "Barbershops",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Caller's barbershop", body = ApiResponse<BarbershopDto>),
        (status = 403, description = "Caller has no barbershop")
    )
)]
pub async fn get_own_barbershop(
    State(state): State<BarbershopHandlerState>,
    user: AuthenticatedUser,
) -> Result<Json<ApiResponse<BarbershopDto>>, ApiError> {
    let shop = state
        .barbershop_service
        .own(user.user_id)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(shop.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/barbershops",
    tag = "Barbershops",
    security(("bearer_auth" = [])),
    request_body = CreateBarbershopRequest,
    responses(
        (status = 201, description = "Barbershop created", body = ApiResponse<BarbershopDto>),
        (status = 400, description = "Caller already owns a barbershop"),
        (status = 403, description = "Caller is not a shop owner")
    )
)]
pub async fn create_barbershop(
    State(state): State<BarbershopHandlerState>,
    user: AuthenticatedUser,
    ValidatedJson(request): ValidatedJson<CreateBarbershopRequest>,
) -> Result<(StatusCode, Json<ApiResponse<BarbershopDto>>), ApiError> {
    let shop = state
        .barbershop_service
        .create(request.into(), user.user_id)
        .await
        .map_err(domain_error)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(shop.into()))))
}

#[utoipa::path(
    put,
    path = "/api/v1/barbershops",
    tag = "Barbershops",
    security(("bearer_auth" = [])),
    request_body = UpdateBarbershopRequest,
    responses(
        (status = 200, description = "Barbershop updated", body = ApiResponse<BarbershopDto>),
        (status = 400, description = "Missing barbershop id"),
        (status = 403, description = "Not the caller's barbershop")
    )
)]
pub async fn update_barbershop(
    State(state): State<BarbershopHandlerState>,
    user: AuthenticatedUser,
    ValidatedJson(request): ValidatedJson<UpdateBarbershopRequest>,
) -> Result<Json<ApiResponse<BarbershopDto>>, ApiError> {
    let shop = state
        .barbershop_service
        .edit(request.into(), user.user_id)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(shop.into())))
}

#[utoipa::path(
    delete,
    path = "/api/v1/barbershops",
    tag = "Barbershops",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Barbershop and its services removed", body = ApiResponse<BarbershopDto>),
        (status = 403, description = "Caller has no barbershop")
    )
)]
pub async fn delete_barbershop(
    State(state): State<BarbershopHandlerState>,
    user: AuthenticatedUser,
) -> Result<Json<ApiResponse<BarbershopDto>>, ApiError> {
    let shop = state
        .barbershop_service
        .delete(user.user_id)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(shop.into())))
}
