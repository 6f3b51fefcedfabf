//! Barbershop service: one shop per owner, edited only by that owner

use std::sync::Arc;

use tracing::{info, warn};

use crate::application::photos::{photo_from_url, release_photo};
use crate::domain::{
    Barbershop, DomainError, DomainResult, NewBarbershop, ObjectStore, RepositoryProvider, Service,
};

const NOT_FOUND: &str = "Barbearia não encontrada.";

/// Input for creating a barbershop
#[derive(Debug, Clone)]
pub struct RegisterBarbershop {
    pub name: String,
    pub address: String,
    pub photo_url: Option<String>,
}

/// Input for editing the caller's barbershop.
///
/// `photo_url: None` keeps the stored photo.
#[derive(Debug, Clone)]
pub struct EditBarbershop {
    pub id: Option<i32>,
    pub name: String,
    pub address: String,
    pub photo_url: Option<String>,
}

/// A barbershop together with its catalog
#[derive(Debug, Clone, PartialEq)]
pub struct BarbershopDetails {
    pub barbershop: Barbershop,
    pub services: Vec<Service>,
}

pub struct BarbershopService {
    repos: Arc<dyn RepositoryProvider>,
    objects: Arc<dyn ObjectStore>,
}

impl BarbershopService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, objects: Arc<dyn ObjectStore>) -> Self {
        Self { repos, objects }
    }

    pub async fn create(
        &self,
        input: RegisterBarbershop,
        owner_id: i32,
    ) -> DomainResult<Barbershop> {
        let owner = self.repos.users().get_user_by_id(owner_id).await?;
        if !owner.is_some_and(|u| u.is_shop_owner()) {
            return Err(DomainError::Permission(
                "Apenas donos de barbearia podem cadastrar uma barbearia.".into(),
            ));
        }

        if self.repos.barbershops().find_by_owner(owner_id).await?.is_some() {
            return Err(DomainError::query("Usuário já possui uma barbearia."));
        }

        let shop = self
            .repos
            .barbershops()
            .save(NewBarbershop {
                name: input.name,
                address: input.address,
                photo: photo_from_url(self.objects.as_ref(), input.photo_url),
                owner_id,
            })
            .await?;

        info!(barbershop_id = shop.id, owner_id, "Barbershop created");
        Ok(shop)
    }

    pub async fn edit(&self, input: EditBarbershop, owner_id: i32) -> DomainResult<Barbershop> {
        let current = self.own(owner_id).await?;

        let Some(id) = input.id else {
            return Err(DomainError::invalid_param("Id da barbearia não informado."));
        };
        if id != current.id {
            warn!(barbershop_id = id, owner_id, "Edit of another owner's barbershop refused");
            return Err(DomainError::not_authorized(
                "Você não tem permissão para editar esta barbearia.",
            ));
        }

        let photo = photo_from_url(self.objects.as_ref(), input.photo_url);
        let replaced = match (&photo, &current.photo) {
            (Some(_), Some(old)) => Some(old.key.clone()),
            _ => None,
        };

        let updated = self
            .repos
            .barbershops()
            .update(Barbershop {
                id: current.id,
                name: input.name,
                address: input.address,
                photo: photo.or(current.photo),
                owner_id: current.owner_id,
            })
            .await?;

        if let Some(key) = replaced {
            self.release(&key).await;
        }

        info!(barbershop_id = updated.id, "Barbershop updated");
        Ok(updated)
    }

    pub async fn list(&self) -> DomainResult<Vec<Barbershop>> {
        self.repos.barbershops().find_all().await
    }

    /// A barbershop with its services
    pub async fn get(&self, id: i32) -> DomainResult<BarbershopDetails> {
        let barbershop = self
            .repos
            .barbershops()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::query(NOT_FOUND))?;
        let services = self.repos.services().find_by_barbershop(barbershop.id).await?;

        Ok(BarbershopDetails {
            barbershop,
            services,
        })
    }

    pub async fn search_by_name(&self, fragment: &str) -> DomainResult<Vec<Barbershop>> {
        self.repos.barbershops().search_by_name(fragment).await
    }

    /// Delete the owner's barbershop together with its services and
    /// appointments. Returns the removed record.
    pub async fn delete(&self, owner_id: i32) -> DomainResult<Barbershop> {
        let shop = self.own(owner_id).await?;
        let services = self.repos.services().find_by_barbershop(shop.id).await?;

        self.repos.barbershops().delete(shop.id).await?;

        let keys = shop
            .photo
            .iter()
            .chain(services.iter().filter_map(|s| s.photo.as_ref()))
            .map(|p| p.key.clone())
            .collect::<Vec<_>>();
        for key in keys {
            self.release(&key).await;
        }

        info!(barbershop_id = shop.id, owner_id, "Barbershop deleted");
        Ok(shop)
    }

    /// The barbershop owned by `owner_id`
    pub async fn own(&self, owner_id: i32) -> DomainResult<Barbershop> {
        self.repos
            .barbershops()
            .find_by_owner(owner_id)
            .await?
            .ok_or_else(|| DomainError::not_authorized(NOT_FOUND))
    }

    async fn release(&self, key: &str) {
        release_photo(self.repos.as_ref(), self.objects.as_ref(), key).await;
    }
}
