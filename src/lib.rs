//! # Barbershop booking service
//!
//! Clients browse barbershops and their services and book appointments;
//! owners manage their shop, its catalog and incoming bookings.
//!
//! ## Architecture
//!
//! - **domain**: entities, repository traits and outbound ports
//! - **application**: use-case services (identity, barbershops, catalog, booking)
//! - **infrastructure**: SeaORM persistence, crypto, mail and object storage adapters
//! - **interfaces**: REST API with Swagger documentation
//! - **server**: runtime bootstrap shared by the CLI and tests

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, resolve_config_path, AppConfig};

pub use infrastructure::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};

pub use interfaces::{create_api_router, AppState};
