//! Registration, login, profile, password change and recovery

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
