//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod appointment_repository;
pub mod barbershop_repository;
pub mod repository_provider;
pub mod service_repository;
pub mod user_repository;

pub use appointment_repository::SeaOrmAppointmentRepository;
pub use barbershop_repository::SeaOrmBarbershopRepository;
pub use repository_provider::SeaOrmRepositoryProvider;
pub use service_repository::SeaOrmServiceRepository;
pub use user_repository::UserRepository;

use sea_orm::{DbErr, SqlErr};

use crate::domain::DomainError;

fn db_err(e: DbErr) -> DomainError {
    DomainError::Storage(e.to_string())
}

/// Map a write error, turning a unique-index violation into `on_conflict`.
fn write_err(e: DbErr, on_conflict: impl FnOnce() -> DomainError) -> DomainError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => on_conflict(),
        _ => db_err(e),
    }
}
