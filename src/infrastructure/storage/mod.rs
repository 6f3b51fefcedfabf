//! Object storage adapters
//!
//! Uploaded photos live outside the database. Services ask the store which
//! key a public URL maps to, and ask for an object to be released.

use std::sync::Mutex;

use async_trait::async_trait;
use tracing::info;

use crate::domain::{DomainResult, ObjectStore};

pub const DEFAULT_PUBLIC_BASE_URL: &str = "http://localhost:3333/uploads/";

/// Key of `url` relative to `base`, or `None` for URLs the store does not
/// serve.
fn key_under(base: &str, url: &str) -> Option<String> {
    let key = url.strip_prefix(base)?.trim_start_matches('/');
    let key = key.split(['?', '#']).next().unwrap_or_default();
    if key.is_empty() || key.split('/').any(|seg| seg.is_empty() || seg == "..") {
        return None;
    }
    Some(key.to_string())
}

/// Object store that only records the deletion in the log
#[derive(Debug, Clone)]
pub struct LoggingObjectStore {
    public_base_url: String,
}

impl LoggingObjectStore {
    pub fn new(public_base_url: impl Into<String>) -> Self {
        Self {
            public_base_url: public_base_url.into(),
        }
    }
}

impl Default for LoggingObjectStore {
    fn default() -> Self {
        Self::new(DEFAULT_PUBLIC_BASE_URL)
    }
}

#[async_trait]
impl ObjectStore for LoggingObjectStore {
    fn key_for_url(&self, url: &str) -> Option<String> {
        key_under(&self.public_base_url, url)
    }

    async fn delete_object(&self, key: &str) -> DomainResult<()> {
        info!(key = %key, "Releasing stored object");
        Ok(())
    }
}

/// In-memory object store that remembers which keys were released
#[derive(Debug)]
pub struct InMemoryObjectStore {
    public_base_url: String,
    deleted: Mutex<Vec<String>>,
}

impl InMemoryObjectStore {
    pub fn new() -> Self {
        Self {
            public_base_url: DEFAULT_PUBLIC_BASE_URL.to_string(),
            deleted: Mutex::new(Vec::new()),
        }
    }

    /// Keys released so far, oldest first
    pub fn deleted_keys(&self) -> Vec<String> {
        self.deleted
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl Default for InMemoryObjectStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    fn key_for_url(&self, url: &str) -> Option<String> {
        key_under(&self.public_base_url, url)
    }

    async fn delete_object(&self, key: &str) -> DomainResult<()> {
        self.deleted
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(key.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_come_only_from_urls_under_the_base() {
        let store = LoggingObjectStore::new("https://cdn.example.com/uploads/");
        assert_eq!(
            store.key_for_url("https://cdn.example.com/uploads/shops/a.jpg?v=2"),
            Some("shops/a.jpg".to_string())
        );
        assert_eq!(store.key_for_url("https://elsewhere.com/uploads/a.jpg"), None);
        assert_eq!(store.key_for_url("https://cdn.example.com/uploads/"), None);
        assert_eq!(store.key_for_url("https://cdn.example.com/uploads/../x.jpg"), None);
    }
}
