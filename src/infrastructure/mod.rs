//! Infrastructure layer - external concerns

pub mod crypto;
pub mod database;
pub mod mail;
pub mod storage;

pub use database::repositories::SeaOrmRepositoryProvider;
pub use database::{connect_and_migrate, init_database, run_migrations, DatabaseConfig};
pub use mail::{InMemoryMailer, LoggingMailer};
pub use storage::{InMemoryObjectStore, LoggingObjectStore};
