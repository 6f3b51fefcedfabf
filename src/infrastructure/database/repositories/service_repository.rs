//! SeaORM implementation of ServiceRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use tracing::debug;

use super::{db_err, write_err};
use crate::domain::catalog::{NewService, Service, ServiceRepository};
use crate::domain::{DomainError, DomainResult, PhotoRef};
use crate::infrastructure::database::entities::service;

pub struct SeaOrmServiceRepository {
    db: DatabaseConnection,
}

impl SeaOrmServiceRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: service::Model) -> Service {
    Service {
        id: m.id,
        name: m.name,
        description: m.description,
        price: m.price,
        photo: PhotoRef::from_columns(m.photo_url, m.photo_key),
        barbershop_id: m.barbershop_id,
    }
}

fn duplicate_name() -> DomainError {
    DomainError::query("Serviço já cadastrado.")
}

// ── ServiceRepository impl ──────────────────────────────────────

#[async_trait]
impl ServiceRepository for SeaOrmServiceRepository {
    async fn save(&self, s: NewService) -> DomainResult<Service> {
        debug!("Saving service '{}' for barbershop {}", s.name, s.barbershop_id);

        let (photo_url, photo_key) = PhotoRef::into_columns(s.photo);
        let model = service::ActiveModel {
            name: Set(s.name),
            description: Set(s.description),
            price: Set(s.price),
            photo_url: Set(photo_url),
            photo_key: Set(photo_key),
            barbershop_id: Set(s.barbershop_id),
            ..Default::default()
        };

        let saved = model
            .insert(&self.db)
            .await
            .map_err(|e| write_err(e, duplicate_name))?;
        Ok(model_to_domain(saved))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Service>> {
        let model = service::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_name(&self, barbershop_id: i32, name: &str) -> DomainResult<Option<Service>> {
        let model = service::Entity::find()
            .filter(service::Column::BarbershopId.eq(barbershop_id))
            .filter(service::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_barbershop(&self, barbershop_id: i32) -> DomainResult<Vec<Service>> {
        let models = service::Entity::find()
            .filter(service::Column::BarbershopId.eq(barbershop_id))
            .order_by_asc(service::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn update(&self, s: Service) -> DomainResult<Service> {
        debug!("Updating service: {}", s.id);

        let existing = service::Entity::find_by_id(s.id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::query("Serviço não encontrado."))?;

        let (photo_url, photo_key) = PhotoRef::into_columns(s.photo);
        let mut active: service::ActiveModel = existing.into();
        active.name = Set(s.name);
        active.description = Set(s.description);
        active.price = Set(s.price);
        active.photo_url = Set(photo_url);
        active.photo_key = Set(photo_key);

        let updated = active
            .update(&self.db)
            .await
            .map_err(|e| write_err(e, duplicate_name))?;
        Ok(model_to_domain(updated))
    }

    async fn photo_key_in_use(&self, key: &str) -> DomainResult<bool> {
        let count = service::Entity::find()
            .filter(service::Column::PhotoKey.eq(key))
            .count(&self.db)
            .await
            .map_err(db_err)?;
        Ok(count > 0)
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        debug!("Deleting service: {}", id);
        service::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }
}
