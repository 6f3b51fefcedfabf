//! Shared fixtures for service tests: migrated in-memory SQLite, a fixed
//! clock and a few seeding helpers.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use crate::domain::{
    Barbershop, CreateUserDto, NewBarbershop, NewService, RepositoryProvider, Service, User,
    UserRole,
};
use crate::infrastructure::storage::DEFAULT_PUBLIC_BASE_URL;
use crate::infrastructure::{connect_and_migrate, DatabaseConfig, SeaOrmRepositoryProvider};

/// Clock frozen at one instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    pub now: DateTime<Utc>,
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.now
    }
}

pub fn fixed_clock(now: DateTime<Utc>) -> Arc<dyn Clock + Send + Sync> {
    Arc::new(FixedClock { now })
}

pub fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0)
        .single()
        .expect("valid timestamp")
}

/// Public URL of an object uploaded under `key`
pub fn upload(key: &str) -> Option<String> {
    Some(format!("{}{}", DEFAULT_PUBLIC_BASE_URL, key))
}

pub async fn repos() -> Arc<dyn RepositoryProvider> {
    let db = connect_and_migrate(&DatabaseConfig::in_memory())
        .await
        .expect("in-memory database");
    Arc::new(SeaOrmRepositoryProvider::new(db))
}

pub async fn seed_user(repos: &Arc<dyn RepositoryProvider>, email: &str, role: UserRole) -> User {
    repos
        .users()
        .create_user(CreateUserDto {
            name: email.split('@').next().unwrap_or(email).to_string(),
            email: email.to_string(),
            role,
            password_hash: "not-a-real-hash".to_string(),
            photo: None,
        })
        .await
        .expect("seed user")
}

pub async fn seed_shop(repos: &Arc<dyn RepositoryProvider>, owner: &User, name: &str) -> Barbershop {
    repos
        .barbershops()
        .save(NewBarbershop {
            name: name.to_string(),
            address: "Rua das Flores, 10".to_string(),
            photo: None,
            owner_id: owner.id,
        })
        .await
        .expect("seed barbershop")
}

pub async fn seed_service(
    repos: &Arc<dyn RepositoryProvider>,
    shop: &Barbershop,
    name: &str,
    price: f64,
) -> Service {
    repos
        .services()
        .save(NewService {
            name: name.to_string(),
            description: format!("{} description", name),
            price,
            photo: None,
            barbershop_id: shop.id,
        })
        .await
        .expect("seed service")
}
