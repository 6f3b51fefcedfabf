//! Appointment DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::{Appointment, AppointmentDetails};
use crate::interfaces::http::modules::barbershops::BarbershopDto;
use crate::interfaces::http::modules::services::ServiceDto;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AppointmentDto {
    pub id: i32,
    pub scheduled_at: DateTime<Utc>,
    pub service_id: i32,
    pub barbershop_id: i32,
    pub user_id: i32,
    pub created_at: DateTime<Utc>,
}

impl From<Appointment> for AppointmentDto {
    fn from(a: Appointment) -> Self {
        Self {
            id: a.id,
            scheduled_at: a.scheduled_at,
            service_id: a.service_id,
            barbershop_id: a.barbershop_id,
            user_id: a.user_id,
            created_at: a.created_at,
        }
    }
}

/// Appointment as listed to the client who booked it
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AppointmentDetailsDto {
    #[serde(flatten)]
    pub appointment: AppointmentDto,
    pub service: Option<ServiceDto>,
    pub barbershop: Option<BarbershopDto>,
}

impl From<AppointmentDetails> for AppointmentDetailsDto {
    fn from(d: AppointmentDetails) -> Self {
        Self {
            appointment: d.appointment.into(),
            service: d.service.map(ServiceDto::from),
            barbershop: d.barbershop.map(BarbershopDto::from),
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAppointmentRequest {
    /// Exact instant of the booking (RFC 3339)
    pub scheduled_at: DateTime<Utc>,
    #[validate(range(min = 1, message = "serviço inválido"))]
    pub service_id: i32,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ClientAppointmentsParams {
    /// `0` for upcoming, `1` for finalized
    #[serde(default = "default_finalized")]
    pub finalized: String,
}

fn default_finalized() -> String {
    "0".to_string()
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct DayParams {
    /// Any instant of the UTC day to list (RFC 3339)
    pub date: DateTime<Utc>,
}
