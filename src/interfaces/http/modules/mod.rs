pub mod appointments;
pub mod auth;
pub mod barbershops;
pub mod health;
pub mod metrics;
pub mod request_id;
pub mod services;
pub mod users;
