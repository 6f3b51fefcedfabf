//! Barbershop domain entity

use crate::domain::PhotoRef;

/// A shop owned by exactly one user with the shop-owner role.
#[derive(Debug, Clone, PartialEq)]
pub struct Barbershop {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub photo: Option<PhotoRef>,
    /// Owning user
    pub owner_id: i32,
}

impl Barbershop {
    pub fn is_owned_by(&self, user_id: i32) -> bool {
        self.owner_id == user_id
    }
}

/// Data for a barbershop that has not been persisted yet
#[derive(Debug, Clone)]
pub struct NewBarbershop {
    pub name: String,
    pub address: String,
    pub photo: Option<PhotoRef>,
    pub owner_id: i32,
}
