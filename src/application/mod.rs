//! Application layer: use-case services over the domain repositories

pub mod barbershop;
pub mod booking;
pub mod catalog;
pub mod identity;
mod photos;

#[cfg(test)]
pub(crate) mod test_support;

pub use barbershop::{BarbershopDetails, BarbershopService, EditBarbershop, RegisterBarbershop};
pub use booking::BookingService;
pub use catalog::{CatalogService, EditService, RegisterService};
pub use identity::{AuthResult, EditProfile, RegisterUser, UserService};
