//! SeaORM implementation of BarbershopRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, JoinType, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set,
};
use tracing::debug;

use super::{db_err, write_err};
use crate::domain::barbershop::{Barbershop, BarbershopRepository, NewBarbershop};
use crate::domain::{DomainError, DomainResult, PhotoRef};
use crate::infrastructure::database::entities::{barbershop, service};

pub struct SeaOrmBarbershopRepository {
    db: DatabaseConnection,
}

impl SeaOrmBarbershopRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: barbershop::Model) -> Barbershop {
    Barbershop {
        id: m.id,
        name: m.name,
        address: m.address,
        photo: PhotoRef::from_columns(m.photo_url, m.photo_key),
        owner_id: m.owner_id,
    }
}

fn owner_already_has_shop() -> DomainError {
    DomainError::query("Usuário já possui uma barbearia.")
}

// ── BarbershopRepository impl ───────────────────────────────────

#[async_trait]
impl BarbershopRepository for SeaOrmBarbershopRepository {
    async fn save(&self, b: NewBarbershop) -> DomainResult<Barbershop> {
        debug!("Saving barbershop '{}' for owner {}", b.name, b.owner_id);

        let (photo_url, photo_key) = PhotoRef::into_columns(b.photo);
        let model = barbershop::ActiveModel {
            name: Set(b.name),
            address: Set(b.address),
            photo_url: Set(photo_url),
            photo_key: Set(photo_key),
            owner_id: Set(b.owner_id),
            ..Default::default()
        };

        let saved = model
            .insert(&self.db)
            .await
            .map_err(|e| write_err(e, owner_already_has_shop))?;
        Ok(model_to_domain(saved))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Barbershop>> {
        let model = barbershop::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_owner(&self, owner_id: i32) -> DomainResult<Option<Barbershop>> {
        let model = barbershop::Entity::find()
            .filter(barbershop::Column::OwnerId.eq(owner_id))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_service(&self, service_id: i32) -> DomainResult<Option<Barbershop>> {
        let model = barbershop::Entity::find()
            .join(JoinType::InnerJoin, barbershop::Relation::Services.def())
            .filter(service::Column::Id.eq(service_id))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_all(&self) -> DomainResult<Vec<Barbershop>> {
        let models = barbershop::Entity::find()
            .order_by_asc(barbershop::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn search_by_name(&self, fragment: &str) -> DomainResult<Vec<Barbershop>> {
        // SQLite LIKE ignores ASCII case, so narrow in SQL and match exactly here
        let models = barbershop::Entity::find()
            .filter(barbershop::Column::Name.contains(fragment))
            .order_by_asc(barbershop::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models
            .into_iter()
            .filter(|m| m.name.contains(fragment))
            .map(model_to_domain)
            .collect())
    }

    async fn update(&self, b: Barbershop) -> DomainResult<Barbershop> {
        debug!("Updating barbershop: {}", b.id);

        let existing = barbershop::Entity::find_by_id(b.id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::not_authorized("Barbearia não encontrada."))?;

        let (photo_url, photo_key) = PhotoRef::into_columns(b.photo);
        let mut active: barbershop::ActiveModel = existing.into();
        active.name = Set(b.name);
        active.address = Set(b.address);
        active.photo_url = Set(photo_url);
        active.photo_key = Set(photo_key);

        let updated = active.update(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(updated))
    }

    async fn photo_key_in_use(&self, key: &str) -> DomainResult<bool> {
        let count = barbershop::Entity::find()
            .filter(barbershop::Column::PhotoKey.eq(key))
            .count(&self.db)
            .await
            .map_err(db_err)?;
        Ok(count > 0)
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        debug!("Deleting barbershop: {}", id);
        barbershop::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }
}
