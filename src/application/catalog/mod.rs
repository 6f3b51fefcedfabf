//! Service catalog of a barbershop

pub mod service;

pub use service::{CatalogService, EditService, RegisterService};
