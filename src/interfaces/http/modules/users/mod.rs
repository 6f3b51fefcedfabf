//! User listing, lookup and self-service profile management

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
