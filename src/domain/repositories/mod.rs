//! Repository provider for the domain layer

use super::appointment::AppointmentRepository;
use super::barbershop::BarbershopRepository;
use super::catalog::ServiceRepository;
use super::user::UserRepositoryInterface;

/// Provides access to all domain repositories.
///
/// Consumers request only the repository they need:
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let shop = repos.barbershops().find_by_owner(7).await?;
///     let slot = repos.appointments().find_at(shop.id, at).await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn users(&self) -> &dyn UserRepositoryInterface;
    fn barbershops(&self) -> &dyn BarbershopRepository;
    fn services(&self) -> &dyn ServiceRepository;
    fn appointments(&self) -> &dyn AppointmentRepository;
}
