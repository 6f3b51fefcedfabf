//! Barbershop management

pub mod service;

pub use service::{BarbershopDetails, BarbershopService, EditBarbershop, RegisterBarbershop};
