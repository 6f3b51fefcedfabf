//! Appointment API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::dto::{
    AppointmentDetailsDto, AppointmentDto, ClientAppointmentsParams, CreateAppointmentRequest,
    DayParams,
};
use crate::application::BookingService;
use crate::interfaces::http::common::{domain_error, ApiError, ApiResponse, ValidatedJson};
use crate::interfaces::http::middleware::AuthenticatedUser;

#[derive(Clone)]
pub struct AppointmentHandlerState {
    pub booking_service: Arc<BookingService>,
}

#[utoipa::path(
    post,
    path = "/api/v1/appointments",
    tag = "Appointments",
    security(("bearer_auth" = [])),
    request_body = CreateAppointmentRequest,
    responses(
        (status = 201, description = "Appointment booked", body = ApiResponse<AppointmentDto>),
        (status = 403, description = "Unknown service or slot already taken")
    )
)]
pub async fn create_appointment(
    State(state): State<AppointmentHandlerState>,
    user: AuthenticatedUser,
    ValidatedJson(request): ValidatedJson<CreateAppointmentRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AppointmentDto>>), ApiError> {
    let appointment = state
        .booking_service
        .create_appointment(request.scheduled_at, request.service_id, user.user_id)
        .await
        .map_err(domain_error)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(appointment.into())),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/appointments/client",
    tag = "Appointments",
    security(("bearer_auth" = [])),
    params(ClientAppointmentsParams),
    responses(
        (status = 200, description = "Caller's appointments with service and barbershop", body = ApiResponse<Vec<AppointmentDetailsDto>>),
        (status = 400, description = "Invalid finalized flag")
    )
)]
pub async fn list_client_appointments(
    State(state): State<AppointmentHandlerState>,
    user: AuthenticatedUser,
    Query(params): Query<ClientAppointmentsParams>,
) -> Result<Json<ApiResponse<Vec<AppointmentDetailsDto>>>, ApiError> {
    let details = state
        .booking_service
        .list_for_client(user.user_id, &params.finalized)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(
        details.into_iter().map(AppointmentDetailsDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/appointments/barbershop",
    tag = "Appointments",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Appointments of the caller's barbershop", body = ApiResponse<Vec<AppointmentDto>>),
        (status = 403, description = "Caller has no barbershop")
    )
)]
pub async fn list_owner_appointments(
    State(state): State<AppointmentHandlerState>,
    user: AuthenticatedUser,
) -> Result<Json<ApiResponse<Vec<AppointmentDto>>>, ApiError> {
    let appointments = state
        .booking_service
        .list_for_owner(user.user_id)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(
        appointments.into_iter().map(AppointmentDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/barbershops/{id}/appointments",
    tag = "Appointments",
    params(("id" = i32, Path, description = "Barbershop ID"), DayParams),
    responses(
        (status = 200, description = "Appointments of the barbershop on that day", body = ApiResponse<Vec<AppointmentDto>>)
    )
)]
pub async fn list_barbershop_day(
    State(state): State<AppointmentHandlerState>,
    Path(barbershop_id): Path<i32>,
    Query(params): Query<DayParams>,
) -> Result<Json<ApiResponse<Vec<AppointmentDto>>>, ApiError> {
    let appointments = state
        .booking_service
        .list_for_barbershop_on(barbershop_id, params.date)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(
        appointments.into_iter().map(AppointmentDto::from).collect(),
    )))
}

#[utoipa::path(
    delete,
    path = "/api/v1/appointments/{id}",
    tag = "Appointments",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Appointment ID")),
    responses(
        (status = 200, description = "Appointment removed", body = ApiResponse<AppointmentDto>),
        (status = 403, description = "Not found or not the caller's appointment")
    )
)]
pub async fn delete_appointment(
    State(state): State<AppointmentHandlerState>,
    user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<AppointmentDto>>, ApiError> {
    let appointment = state
        .booking_service
        .delete_appointment(id, user.user_id)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(appointment.into())))
}
