//! Outbound ports for collaborators that live outside the database
//!
//! - `ObjectStore`: maps uploaded photo URLs to object keys and releases
//!   them when they are replaced or their owner is deleted
//! - `Mailer`: delivers password-reset tokens

use async_trait::async_trait;

use crate::domain::DomainResult;

#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Key of the object served at `url`. `None` when the URL is not one of
    /// ours; such photos are stored but never released.
    fn key_for_url(&self, url: &str) -> Option<String>;

    /// Delete the object stored under `key`.
    async fn delete_object(&self, key: &str) -> DomainResult<()>;
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_password_reset(&self, email: &str, token: &str) -> DomainResult<()>;
}
