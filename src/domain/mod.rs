//! Domain layer: entities, repository interfaces and outbound ports

pub mod appointment;
pub mod barbershop;
pub mod catalog;
pub mod photo;
pub mod ports;
pub mod repositories;
pub mod user;

pub use appointment::{
    day_bounds, Appointment, AppointmentDetails, AppointmentRepository, ClientAppointmentFilter,
    NewAppointment,
};
pub use barbershop::{Barbershop, BarbershopRepository, NewBarbershop};
pub use catalog::{NewService, Service, ServiceRepository};
pub use photo::PhotoRef;
pub use ports::{Mailer, ObjectStore};
pub use repositories::RepositoryProvider;
pub use user::{CreateUserDto, UpdateUserDto, User, UserRepositoryInterface, UserRole};

pub use crate::shared::types::errors::{DomainError, DomainResult};
