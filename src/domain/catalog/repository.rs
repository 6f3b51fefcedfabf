//! Service catalog repository interface

use async_trait::async_trait;

use super::model::{NewService, Service};
use crate::domain::DomainResult;

#[async_trait]
pub trait ServiceRepository: Send + Sync {
    async fn save(&self, service: NewService) -> DomainResult<Service>;

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Service>>;

    /// Exact-name lookup within one barbershop
    async fn find_by_name(&self, barbershop_id: i32, name: &str) -> DomainResult<Option<Service>>;

    async fn find_by_barbershop(&self, barbershop_id: i32) -> DomainResult<Vec<Service>>;

    async fn update(&self, service: Service) -> DomainResult<Service>;

    async fn photo_key_in_use(&self, key: &str) -> DomainResult<bool>;

    async fn delete(&self, id: i32) -> DomainResult<()>;
}
