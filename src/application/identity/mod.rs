//! Identity: user management and authentication
//!
//! Contains the `UserService` which orchestrates all user-related
//! use-cases: registration, login, profile updates, password changes and
//! password recovery.

pub mod service;

pub use service::{AuthResult, EditProfile, RegisterUser, UserService, DEFAULT_RESET_TTL_MINUTES};
