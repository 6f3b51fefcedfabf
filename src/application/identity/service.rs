//! User management service
//!
//! HTTP handlers are thin wrappers that delegate to this service.

use std::sync::Arc;

use chrono::Duration;
use mockable::Clock;
use tracing::{info, warn};

use crate::application::photos::{photo_from_url, release_photo};
use crate::domain::{
    CreateUserDto, DomainError, DomainResult, Mailer, ObjectStore, RepositoryProvider,
    UpdateUserDto, User, UserRole,
};
use crate::infrastructure::crypto::jwt::{create_token, JwtConfig};
use crate::infrastructure::crypto::password::{
    generate_reset_token, hash_password, verify_password,
};

/// How long a password-reset token stays valid unless configured otherwise
pub const DEFAULT_RESET_TTL_MINUTES: i64 = 60;

const USER_NOT_FOUND: &str = "Usuário não encontrado.";
const INVALID_CREDENTIALS: &str = "E-mail ou senha incorretos.";
const INVALID_RESET_TOKEN: &str = "Token inválido ou expirado.";

/// Authentication result returned after a successful login
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: User,
}

#[derive(Debug, Clone)]
pub struct RegisterUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
    pub photo_url: Option<String>,
}

/// Profile changes; `None` fields keep the stored value.
#[derive(Debug, Clone, Default)]
pub struct EditProfile {
    pub name: Option<String>,
    pub email: Option<String>,
    pub photo_url: Option<String>,
}

/// Orchestrates the identity and user-management use cases.
pub struct UserService {
    repos: Arc<dyn RepositoryProvider>,
    objects: Arc<dyn ObjectStore>,
    mailer: Arc<dyn Mailer>,
    clock: Arc<dyn Clock + Send + Sync>,
    jwt_config: JwtConfig,
    reset_ttl: Duration,
}

impl UserService {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        objects: Arc<dyn ObjectStore>,
        mailer: Arc<dyn Mailer>,
        clock: Arc<dyn Clock + Send + Sync>,
        jwt_config: JwtConfig,
    ) -> Self {
        Self {
            repos,
            objects,
            mailer,
            clock,
            jwt_config,
            reset_ttl: Duration::minutes(DEFAULT_RESET_TTL_MINUTES),
        }
    }

    pub fn with_reset_ttl(mut self, ttl: Duration) -> Self {
        self.reset_ttl = ttl;
        self
    }

    pub fn jwt_config(&self) -> &JwtConfig {
        &self.jwt_config
    }

    // ── Authentication ──────────────────────────────────────────

    /// Authenticate by email + password and return a JWT.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<AuthResult> {
        let Some(user) = self.repos.users().get_user_by_email(email).await? else {
            return Err(DomainError::Login(INVALID_CREDENTIALS.into()));
        };

        let valid = verify_password(password, &user.password_hash).unwrap_or(false);
        if !valid {
            warn!(user_id = user.id, "Failed login attempt");
            return Err(DomainError::Login(INVALID_CREDENTIALS.into()));
        }

        let token = create_token(user.id, &user.email, user.role.as_str(), &self.jwt_config)
            .map_err(|e| DomainError::Crypto(format!("Failed to create token: {}", e)))?;

        info!(user_id = user.id, "User logged in");
        Ok(AuthResult {
            token,
            token_type: "Bearer".into(),
            expires_in: self.jwt_config.expiration_hours * 3600,
            user,
        })
    }

    // ── Registration ────────────────────────────────────────────

    pub async fn register(&self, input: RegisterUser) -> DomainResult<User> {
        if self
            .repos
            .users()
            .get_user_by_email(&input.email)
            .await?
            .is_some()
        {
            return Err(DomainError::query("E-mail já cadastrado."));
        }

        let password_hash = hash_password(&input.password)?;

        let user = self
            .repos
            .users()
            .create_user(CreateUserDto {
                name: input.name,
                email: input.email,
                role: input.role,
                password_hash,
                photo: photo_from_url(self.objects.as_ref(), input.photo_url),
            })
            .await?;

        info!(user_id = user.id, role = %user.role, "New user registered");
        Ok(user)
    }

    // ── Queries ─────────────────────────────────────────────────

    pub async fn list_users(&self) -> DomainResult<Vec<User>> {
        self.repos.users().list_users().await
    }

    pub async fn get_user(&self, id: i32) -> DomainResult<Option<User>> {
        self.repos.users().get_user_by_id(id).await
    }

    // ── Commands (mutations) ────────────────────────────────────

    /// Update profile fields. A new photo replaces the stored one and the
    /// old object is released.
    pub async fn update_user(&self, id: i32, edit: EditProfile) -> DomainResult<User> {
        let current = self
            .repos
            .users()
            .get_user_by_id(id)
            .await?
            .ok_or_else(|| DomainError::query(USER_NOT_FOUND))?;

        let dto = UpdateUserDto {
            name: edit.name,
            email: edit.email,
            photo: photo_from_url(self.objects.as_ref(), edit.photo_url),
        };
        let replaced = match (&dto.photo, &current.photo) {
            (Some(_), Some(old)) => Some(old.key.clone()),
            _ => None,
        };

        let updated = self
            .repos
            .users()
            .update_user(id, dto)
            .await?
            .ok_or_else(|| DomainError::query(USER_NOT_FOUND))?;

        if let Some(key) = replaced {
            self.release(&key).await;
        }

        Ok(updated)
    }

    /// Delete a user; their barbershop and appointments go with them.
    pub async fn delete_user(&self, id: i32) -> DomainResult<User> {
        let user = self
            .repos
            .users()
            .get_user_by_id(id)
            .await?
            .ok_or_else(|| DomainError::query(USER_NOT_FOUND))?;

        self.repos.users().delete_user(id).await?;

        if let Some(photo) = &user.photo {
            self.release(&photo.key).await;
        }

        info!(user_id = id, "User deleted");
        Ok(user)
    }

    /// Change a user's password. Verifies the current password first.
    pub async fn change_password(
        &self,
        user_id: i32,
        current_password: &str,
        new_password: &str,
    ) -> DomainResult<()> {
        let user = self
            .repos
            .users()
            .get_user_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::query(USER_NOT_FOUND))?;

        let valid = verify_password(current_password, &user.password_hash).unwrap_or(false);
        if !valid {
            return Err(DomainError::Login("Senha atual incorreta.".into()));
        }

        let new_hash = hash_password(new_password)?;
        self.repos
            .users()
            .update_user_password(user_id, &new_hash)
            .await?;

        info!(user_id, "Password changed");
        Ok(())
    }

    // ── Password recovery ───────────────────────────────────────

    /// Store a fresh reset token for `email` and mail it to the user.
    pub async fn request_password_reset(&self, email: &str) -> DomainResult<()> {
        let user = self
            .repos
            .users()
            .get_user_by_email(email)
            .await?
            .ok_or_else(|| DomainError::query(USER_NOT_FOUND))?;

        let token = generate_reset_token();
        self.repos
            .users()
            .set_reset_token(user.id, Some(token.clone()), Some(self.clock.utc()))
            .await?;

        self.mailer.send_password_reset(&user.email, &token).await?;

        info!(user_id = user.id, "Password reset token issued");
        Ok(())
    }

    /// Set a new password if `token` matches the one issued to `email`
    /// and has not expired. The token is single-use.
    pub async fn reset_password(
        &self,
        email: &str,
        token: &str,
        new_password: &str,
    ) -> DomainResult<()> {
        let invalid = || DomainError::invalid_param(INVALID_RESET_TOKEN);

        let user = self
            .repos
            .users()
            .get_user_by_email(email)
            .await?
            .ok_or_else(invalid)?;

        let (Some(stored), Some(issued_at)) = (&user.reset_token, user.reset_requested_at) else {
            return Err(invalid());
        };
        if stored != token {
            warn!(user_id = user.id, "Password reset with wrong token");
            return Err(invalid());
        }
        if self.clock.utc() - issued_at > self.reset_ttl {
            return Err(invalid());
        }

        let new_hash = hash_password(new_password)?;
        self.repos
            .users()
            .update_user_password(user.id, &new_hash)
            .await?;
        self.repos.users().set_reset_token(user.id, None, None).await?;

        info!(user_id = user.id, "Password reset completed");
        Ok(())
    }

    async fn release(&self, key: &str) {
        release_photo(self.repos.as_ref(), self.objects.as_ref(), key).await;
    }
}
