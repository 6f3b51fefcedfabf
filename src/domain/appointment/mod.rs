//! Appointment aggregate
//!
//! Contains the Appointment entity, listing filters, and repository interface.

pub mod model;
pub mod repository;

pub use model::{
    day_bounds, Appointment, AppointmentDetails, ClientAppointmentFilter, NewAppointment,
};
pub use repository::AppointmentRepository;
