use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use super::{db_err, write_err};
use crate::domain::{
    CreateUserDto, DomainError, DomainResult, PhotoRef, UpdateUserDto, User,
    UserRepositoryInterface, UserRole,
};
use crate::infrastructure::database::entities::user;

pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn entity_role_to_domain(role: user::UserRole) -> UserRole {
    match role {
        user::UserRole::Client => UserRole::Client,
        user::UserRole::ShopOwner => UserRole::ShopOwner,
    }
}

fn domain_role_to_entity(role: UserRole) -> user::UserRole {
    match role {
        UserRole::Client => user::UserRole::Client,
        UserRole::ShopOwner => user::UserRole::ShopOwner,
    }
}

fn user_model_to_domain(model: user::Model) -> User {
    User {
        id: model.id,
        name: model.name,
        email: model.email,
        password_hash: model.password_hash,
        role: entity_role_to_domain(model.role),
        photo: PhotoRef::from_columns(model.photo_url, model.photo_key),
        reset_token: model.reset_token,
        reset_requested_at: model.reset_requested_at,
        created_at: model.created_at,
    }
}

fn duplicate_email() -> DomainError {
    DomainError::query("E-mail já cadastrado.")
}

fn user_not_found() -> DomainError {
    DomainError::query("Usuário não encontrado.")
}

impl UserRepository {
    async fn find_model(&self, id: i32) -> DomainResult<user::Model> {
        user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(user_not_found)
    }
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl UserRepositoryInterface for UserRepository {
    async fn create_user(&self, dto: CreateUserDto) -> DomainResult<User> {
        let (photo_url, photo_key) = PhotoRef::into_columns(dto.photo);

        let new_user = user::ActiveModel {
            name: Set(dto.name),
            email: Set(dto.email),
            password_hash: Set(dto.password_hash),
            role: Set(domain_role_to_entity(dto.role)),
            photo_url: Set(photo_url),
            photo_key: Set(photo_key),
            reset_token: Set(None),
            reset_requested_at: Set(None),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        let model = new_user
            .insert(&self.db)
            .await
            .map_err(|e| write_err(e, duplicate_email))?;

        Ok(user_model_to_domain(model))
    }

    async fn list_users(&self) -> DomainResult<Vec<User>> {
        let models = user::Entity::find()
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(user_model_to_domain).collect())
    }

    async fn get_user_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(user_model_to_domain))
    }

    async fn get_user_by_id(&self, id: i32) -> DomainResult<Option<User>> {
        let model = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(user_model_to_domain))
    }

    async fn update_user(&self, id: i32, dto: UpdateUserDto) -> DomainResult<Option<User>> {
        let existing = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut active: user::ActiveModel = existing.into();

        if let Some(name) = dto.name {
            active.name = Set(name);
        }
        if let Some(email) = dto.email {
            active.email = Set(email);
        }
        if let Some(photo) = dto.photo {
            let (url, key) = PhotoRef::into_columns(Some(photo));
            active.photo_url = Set(url);
            active.photo_key = Set(key);
        }

        let updated = active
            .update(&self.db)
            .await
            .map_err(|e| write_err(e, duplicate_email))?;

        Ok(Some(user_model_to_domain(updated)))
    }

    async fn update_user_password(&self, id: i32, new_password_hash: &str) -> DomainResult<()> {
        let mut active: user::ActiveModel = self.find_model(id).await?.into();
        active.password_hash = Set(new_password_hash.to_string());
        active.update(&self.db).await.map_err(db_err)?;

        Ok(())
    }

    async fn set_reset_token(
        &self,
        id: i32,
        token: Option<String>,
        requested_at: Option<DateTime<Utc>>,
    ) -> DomainResult<()> {
        let mut active: user::ActiveModel = self.find_model(id).await?.into();
        active.reset_token = Set(token);
        active.reset_requested_at = Set(requested_at);
        active.update(&self.db).await.map_err(db_err)?;

        Ok(())
    }

    async fn photo_key_in_use(&self, key: &str) -> DomainResult<bool> {
        let count = user::Entity::find()
            .filter(user::Column::PhotoKey.eq(key))
            .count(&self.db)
            .await
            .map_err(db_err)?;
        Ok(count > 0)
    }

    async fn delete_user(&self, id: i32) -> DomainResult<()> {
        let result = user::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(user_not_found());
        }

        Ok(())
    }
}
