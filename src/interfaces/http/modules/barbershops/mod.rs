//! Public barbershop listing and owner management

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
