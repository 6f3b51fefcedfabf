//! Photos attached to users, barbershops and services
//!
//! Clients only ever send the public URL of an upload. The object key is
//! derived by the store, and an object is released only once no row
//! references it any more.

use tracing::warn;

use crate::domain::{DomainResult, ObjectStore, PhotoRef, RepositoryProvider};

/// Photo reference for an uploaded `url`; URLs the store does not serve get
/// an empty key and are never released.
pub(crate) fn photo_from_url(objects: &dyn ObjectStore, url: Option<String>) -> Option<PhotoRef> {
    url.map(|url| {
        let key = objects.key_for_url(&url).unwrap_or_default();
        PhotoRef { url, key }
    })
}

async fn still_referenced(repos: &dyn RepositoryProvider, key: &str) -> DomainResult<bool> {
    Ok(repos.users().photo_key_in_use(key).await?
        || repos.barbershops().photo_key_in_use(key).await?
        || repos.services().photo_key_in_use(key).await?)
}

/// Delete the object under `key` after its last reference is gone.
/// Failures are logged; the database change has already happened.
pub(crate) async fn release_photo(
    repos: &dyn RepositoryProvider,
    objects: &dyn ObjectStore,
    key: &str,
) {
    if key.is_empty() {
        return;
    }
    match still_referenced(repos, key).await {
        Ok(false) => {}
        Ok(true) => {
            warn!(key, "Stored photo is still referenced, keeping it");
            return;
        }
        Err(e) => {
            warn!(key, error = %e, "Cannot check photo references, keeping it");
            return;
        }
    }
    if let Err(e) = objects.delete_object(key).await {
        warn!(key, error = %e, "Failed to release stored photo");
    }
}
