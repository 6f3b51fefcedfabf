//! Service offered by a barbershop

use crate::domain::PhotoRef;

/// A priced offering scoped to one barbershop.
///
/// Names are unique per barbershop (exact, case-sensitive match).
#[derive(Debug, Clone, PartialEq)]
pub struct Service {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub photo: Option<PhotoRef>,
    pub barbershop_id: i32,
}

/// Data for a service that has not been persisted yet
#[derive(Debug, Clone)]
pub struct NewService {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub photo: Option<PhotoRef>,
    pub barbershop_id: i32,
}
