//! Appointment repository interface

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::model::{Appointment, NewAppointment};
use crate::domain::DomainResult;

#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    /// Insert a new appointment.
    ///
    /// A second appointment for the same barbershop and instant is rejected
    /// by the store and surfaces as a `NotAuthorized` conflict.
    async fn save(&self, appointment: NewAppointment) -> DomainResult<Appointment>;

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Appointment>>;

    /// Appointment of `barbershop_id` at exactly `at`
    async fn find_at(
        &self,
        barbershop_id: i32,
        at: DateTime<Utc>,
    ) -> DomainResult<Option<Appointment>>;

    /// Client's appointments at or after `from`, ascending
    async fn find_for_client_from(
        &self,
        user_id: i32,
        from: DateTime<Utc>,
    ) -> DomainResult<Vec<Appointment>>;

    /// Client's appointments at or before `until`, descending
    async fn find_for_client_until(
        &self,
        user_id: i32,
        until: DateTime<Utc>,
    ) -> DomainResult<Vec<Appointment>>;

    /// All appointments of a barbershop in storage order
    async fn find_for_barbershop(&self, barbershop_id: i32) -> DomainResult<Vec<Appointment>>;

    /// Appointments of a barbershop with `start <= scheduled_at <= end`
    async fn find_for_barbershop_between(
        &self,
        barbershop_id: i32,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> DomainResult<Vec<Appointment>>;

    async fn delete(&self, id: i32) -> DomainResult<()>;
}
