//! Service catalog aggregate
//!
//! The services (haircut, beard, ...) a barbershop offers.

pub mod model;
pub mod repository;

pub use model::{NewService, Service};
pub use repository::ServiceRepository;
