//! Catalog service
//!
//! Owners manage the services of their own barbershop. Names are unique
//! within one barbershop.

use std::sync::Arc;

use tracing::{info, warn};

use crate::application::photos::{photo_from_url, release_photo};
use crate::domain::{
    Barbershop, DomainError, DomainResult, NewService, ObjectStore, RepositoryProvider, Service,
};

const BARBERSHOP_NOT_FOUND: &str = "Barbearia não encontrada.";
const SERVICE_NOT_FOUND: &str = "Serviço não encontrado.";
const DUPLICATE_NAME: &str = "Serviço já cadastrado.";
const NOT_YOUR_SERVICE: &str = "Você não tem permissão para alterar este serviço.";

#[derive(Debug, Clone)]
pub struct RegisterService {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub photo_url: Option<String>,
}

/// Changes to an existing service; `photo_url: None` keeps the stored photo.
#[derive(Debug, Clone)]
pub struct EditService {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub photo_url: Option<String>,
}

pub struct CatalogService {
    repos: Arc<dyn RepositoryProvider>,
    objects: Arc<dyn ObjectStore>,
}

impl CatalogService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, objects: Arc<dyn ObjectStore>) -> Self {
        Self { repos, objects }
    }

    pub async fn create(&self, input: RegisterService, owner_id: i32) -> DomainResult<Service> {
        let shop = self.owner_shop(owner_id).await?;

        if self
            .repos
            .services()
            .find_by_name(shop.id, &input.name)
            .await?
            .is_some()
        {
            return Err(DomainError::query(DUPLICATE_NAME));
        }

        let service = self
            .repos
            .services()
            .save(NewService {
                name: input.name,
                description: input.description,
                price: input.price,
                photo: photo_from_url(self.objects.as_ref(), input.photo_url),
                barbershop_id: shop.id,
            })
            .await?;

        info!(service_id = service.id, barbershop_id = shop.id, "Service created");
        Ok(service)
    }

    pub async fn edit(&self, input: EditService, owner_id: i32) -> DomainResult<Service> {
        let shop = self.owner_shop(owner_id).await?;
        let current = self.owned_service(input.id, &shop).await?;

        if let Some(clash) = self.repos.services().find_by_name(shop.id, &input.name).await? {
            if clash.id != current.id {
                return Err(DomainError::query(DUPLICATE_NAME));
            }
        }

        let photo = photo_from_url(self.objects.as_ref(), input.photo_url);
        let replaced = match (&photo, &current.photo) {
            (Some(_), Some(old)) => Some(old.key.clone()),
            _ => None,
        };

        let updated = self
            .repos
            .services()
            .update(Service {
                id: current.id,
                name: input.name,
                description: input.description,
                price: input.price,
                photo: photo.or(current.photo),
                barbershop_id: current.barbershop_id,
            })
            .await?;

        if let Some(key) = replaced {
            self.release(&key).await;
        }

        info!(service_id = updated.id, "Service updated");
        Ok(updated)
    }

    /// Remove a service of the owner's barbershop. Returns the removed record.
    pub async fn delete(&self, service_id: i32, owner_id: i32) -> DomainResult<Service> {
        let shop = self.owner_shop(owner_id).await?;
        let service = self.owned_service(service_id, &shop).await?;

        self.repos.services().delete(service.id).await?;
        if let Some(photo) = &service.photo {
            self.release(&photo.key).await;
        }

        info!(service_id, barbershop_id = shop.id, "Service deleted");
        Ok(service)
    }

    pub async fn list_for_barbershop(&self, barbershop_id: i32) -> DomainResult<Vec<Service>> {
        self.repos.services().find_by_barbershop(barbershop_id).await
    }

    pub async fn get(&self, id: i32) -> DomainResult<Service> {
        self.repos
            .services()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::query(SERVICE_NOT_FOUND))
    }

    async fn owner_shop(&self, owner_id: i32) -> DomainResult<Barbershop> {
        self.repos
            .barbershops()
            .find_by_owner(owner_id)
            .await?
            .ok_or_else(|| DomainError::query(BARBERSHOP_NOT_FOUND))
    }

    async fn owned_service(&self, service_id: i32, shop: &Barbershop) -> DomainResult<Service> {
        let service = self.get(service_id).await?;
        if service.barbershop_id != shop.id {
            warn!(service_id, barbershop_id = shop.id, "Service belongs to another barbershop");
            return Err(DomainError::not_authorized(NOT_YOUR_SERVICE));
        }
        Ok(service)
    }

    async fn release(&self, key: &str) {
        release_photo(self.repos.as_ref(), self.objects.as_ref(), key).await;
    }
}
