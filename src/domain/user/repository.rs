use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{CreateUserDto, UpdateUserDto, User};
use crate::domain::DomainResult;

#[async_trait]
pub trait UserRepositoryInterface: Send + Sync {
    async fn create_user(&self, dto: CreateUserDto) -> DomainResult<User>;

    async fn list_users(&self) -> DomainResult<Vec<User>>;
    async fn get_user_by_email(&self, email: &str) -> DomainResult<Option<User>>;
    async fn get_user_by_id(&self, id: i32) -> DomainResult<Option<User>>;

    async fn update_user(&self, id: i32, dto: UpdateUserDto) -> DomainResult<Option<User>>;
    async fn update_user_password(&self, id: i32, new_password_hash: &str) -> DomainResult<()>;

    /// Store (or clear, with `None`) the password-reset token.
    async fn set_reset_token(
        &self,
        id: i32,
        token: Option<String>,
        requested_at: Option<DateTime<Utc>>,
    ) -> DomainResult<()>;

    async fn photo_key_in_use(&self, key: &str) -> DomainResult<bool>;

    async fn delete_user(&self, id: i32) -> DomainResult<()>;
}
