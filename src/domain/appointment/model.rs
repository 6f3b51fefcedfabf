//! Appointment domain entity

use chrono::{DateTime, Duration, NaiveTime, Utc};

use crate::domain::barbershop::Barbershop;
use crate::domain::catalog::Service;
use crate::domain::{DomainError, DomainResult};

/// A booking of one service at one instant by one client.
///
/// An appointment either exists or has been deleted; it has no status and
/// is never rescheduled.
#[derive(Debug, Clone, PartialEq)]
pub struct Appointment {
    pub id: i32,
    pub scheduled_at: DateTime<Utc>,
    pub service_id: i32,
    pub barbershop_id: i32,
    /// Client who booked it
    pub user_id: i32,
    pub created_at: DateTime<Utc>,
}

impl Appointment {
    pub fn is_booked_by(&self, user_id: i32) -> bool {
        self.user_id == user_id
    }
}

/// Data for an appointment that has not been persisted yet
#[derive(Debug, Clone)]
pub struct NewAppointment {
    pub scheduled_at: DateTime<Utc>,
    pub service_id: i32,
    pub barbershop_id: i32,
    pub user_id: i32,
}

/// Appointment enriched with the service and barbershop it refers to.
///
/// Either side is `None` when the referenced record could not be loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct AppointmentDetails {
    pub appointment: Appointment,
    pub service: Option<Service>,
    pub barbershop: Option<Barbershop>,
}

/// Which half of a client's appointments to list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientAppointmentFilter {
    /// At or after now, soonest first (`"0"`)
    Upcoming,
    /// At or before now, latest first (`"1"`)
    Finalized,
}

impl ClientAppointmentFilter {
    /// Parse the `"0"` / `"1"` flag used by the HTTP API.
    pub fn from_flag(flag: &str) -> DomainResult<Self> {
        match flag {
            "0" => Ok(Self::Upcoming),
            "1" => Ok(Self::Finalized),
            other => Err(DomainError::invalid_param(format!(
                "Valor inválido para finalizado: '{}'.",
                other
            ))),
        }
    }
}

/// Inclusive `[start, end]` bounds of the UTC day containing `date`.
///
/// `end` is the last millisecond of the day (23:59:59.999).
pub fn day_bounds(date: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = date.date_naive().and_time(NaiveTime::MIN).and_utc();
    let end = start + Duration::days(1) - Duration::milliseconds(1);
    (start, end)
}

// ── Tests ──────────────────────────────────────────────────────
