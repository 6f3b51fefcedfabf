//! Barbershop repository interface

use async_trait::async_trait;

use super::model::{Barbershop, NewBarbershop};
use crate::domain::DomainResult;

#[async_trait]
pub trait BarbershopRepository: Send + Sync {
    async fn save(&self, barbershop: NewBarbershop) -> DomainResult<Barbershop>;

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Barbershop>>;

    /// The barbershop whose owner is `owner_id`
    async fn find_by_owner(&self, owner_id: i32) -> DomainResult<Option<Barbershop>>;

    /// The barbershop that has a service with `service_id`, resolved through
    /// the barbershop→service relation.
    async fn find_by_service(&self, service_id: i32) -> DomainResult<Option<Barbershop>>;

    async fn find_all(&self) -> DomainResult<Vec<Barbershop>>;

    /// Case-sensitive substring match on the name
    async fn search_by_name(&self, fragment: &str) -> DomainResult<Vec<Barbershop>>;

    async fn update(&self, barbershop: Barbershop) -> DomainResult<Barbershop>;

    /// Whether any barbershop still points at the stored photo `key`
    async fn photo_key_in_use(&self, key: &str) -> DomainResult<bool>;

    /// Delete by id. Services and appointments go with it.
    async fn delete(&self, id: i32) -> DomainResult<()>;
}
