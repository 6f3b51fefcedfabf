//! Database entities module

pub mod appointment;
pub mod barbershop;
pub mod service;
pub mod user;

pub use appointment::Entity as Appointment;
pub use barbershop::Entity as Barbershop;
pub use service::Entity as Service;
pub use user::Entity as User;
