//! User domain entity

use chrono::{DateTime, Utc};

use crate::domain::PhotoRef;

/// User role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserRole {
    /// Books appointments
    Client,
    /// Owns (at most) one barbershop
    ShopOwner,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::ShopOwner => "shop_owner",
        }
    }

    /// Parse a role name; anything unknown is treated as a client.
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "shop_owner" | "owner" => Self::ShopOwner,
            _ => Self::Client,
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Registered user
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub photo: Option<PhotoRef>,
    /// Pending password-reset token, if one was requested
    pub reset_token: Option<String>,
    pub reset_requested_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn is_shop_owner(&self) -> bool {
        self.role == UserRole::ShopOwner
    }
}
