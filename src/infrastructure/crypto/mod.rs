//! Password hashing and JWT handling

pub mod jwt;
pub mod password;

pub use jwt::{create_token, verify_token, JwtConfig, TokenClaims};
pub use password::{generate_reset_token, hash_password, verify_password};
