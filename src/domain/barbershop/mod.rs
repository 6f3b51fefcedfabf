//! Barbershop aggregate

pub mod model;
pub mod repository;

pub use model::{Barbershop, NewBarbershop};
pub use repository::BarbershopRepository;
