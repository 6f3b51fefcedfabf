//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::appointment::AppointmentRepository;
use crate::domain::barbershop::BarbershopRepository;
use crate::domain::catalog::ServiceRepository;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::user::UserRepositoryInterface;

use super::appointment_repository::SeaOrmAppointmentRepository;
use super::barbershop_repository::SeaOrmBarbershopRepository;
use super::service_repository::SeaOrmServiceRepository;
use super::user_repository::UserRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let shop = repos.barbershops().find_by_owner(7).await?;
/// let taken = repos.appointments().find_at(shop.id, at).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    users: UserRepository,
    barbershops: SeaOrmBarbershopRepository,
    services: SeaOrmServiceRepository,
    appointments: SeaOrmAppointmentRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            users: UserRepository::new(db.clone()),
            barbershops: SeaOrmBarbershopRepository::new(db.clone()),
            services: SeaOrmServiceRepository::new(db.clone()),
            appointments: SeaOrmAppointmentRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn users(&self) -> &dyn UserRepositoryInterface {
        &self.users
    }

    fn barbershops(&self) -> &dyn BarbershopRepository {
        &self.barbershops
    }

    fn services(&self) -> &dyn ServiceRepository {
        &self.services
    }

    fn appointments(&self) -> &dyn AppointmentRepository {
        &self.appointments
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::domain::{
        CreateUserDto, DomainError, NewAppointment, NewBarbershop, NewService, PhotoRef,
        UserRole,
    };
    use crate::infrastructure::database::{connect_and_migrate, DatabaseConfig};

    async fn provider() -> SeaOrmRepositoryProvider {
        let db = connect_and_migrate(&DatabaseConfig::in_memory())
            .await
            .expect("in-memory database");
        SeaOrmRepositoryProvider::new(db)
    }

    fn user(email: &str, role: UserRole) -> CreateUserDto {
        CreateUserDto {
            name: "Test".into(),
            email: email.into(),
            role,
            password_hash: "hash".into(),
            photo: None,
        }
    }

    #[tokio::test]
    async fn duplicate_email_is_a_query_error() {
        let repos = provider().await;
        repos
            .users()
            .create_user(user("a@x.com", UserRole::Client))
            .await
            .unwrap();

        let err = repos
            .users()
            .create_user(user("a@x.com", UserRole::Client))
            .await
            .unwrap_err();
        assert_eq!(err, DomainError::query("E-mail já cadastrado."));
    }

    #[tokio::test]
    async fn barbershop_resolved_through_service_and_cascade_on_delete() {
        let repos = provider().await;
        let owner = repos
            .users()
            .create_user(user("owner@x.com", UserRole::ShopOwner))
            .await
            .unwrap();
        let client = repos
            .users()
            .create_user(user("client@x.com", UserRole::Client))
            .await
            .unwrap();

        let shop = repos
            .barbershops()
            .save(NewBarbershop {
                name: "Navalha".into(),
                address: "Rua A".into(),
                photo: None,
                owner_id: owner.id,
            })
            .await
            .unwrap();
        let service = repos
            .services()
            .save(NewService {
                name: "Corte".into(),
                description: "Corte simples".into(),
                price: 50.0,
                photo: None,
                barbershop_id: shop.id,
            })
            .await
            .unwrap();

        let found = repos.barbershops().find_by_service(service.id).await.unwrap();
        assert_eq!(found.map(|b| b.id), Some(shop.id));
        assert!(repos.barbershops().find_by_service(999).await.unwrap().is_none());

        let at = Utc.with_ymd_and_hms(2025, 6, 10, 10, 0, 0).unwrap();
        repos
            .appointments()
            .save(NewAppointment {
                scheduled_at: at,
                service_id: service.id,
                barbershop_id: shop.id,
                user_id: client.id,
            })
            .await
            .unwrap();

        repos.barbershops().delete(shop.id).await.unwrap();

        assert!(repos.services().find_by_id(service.id).await.unwrap().is_none());
        assert!(repos
            .appointments()
            .find_for_barbershop(shop.id)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn unique_slot_index_rejects_second_insert() {
        let repos = provider().await;
        let owner = repos
            .users()
            .create_user(user("o@x.com", UserRole::ShopOwner))
            .await
            .unwrap();
        let shop = repos
            .barbershops()
            .save(NewBarbershop {
                name: "Shop".into(),
                address: "Addr".into(),
                photo: None,
                owner_id: owner.id,
            })
            .await
            .unwrap();
        let service = repos
            .services()
            .save(NewService {
                name: "Barba".into(),
                description: String::new(),
                price: 30.0,
                photo: None,
                barbershop_id: shop.id,
            })
            .await
            .unwrap();

        let at = Utc.with_ymd_and_hms(2025, 6, 10, 10, 0, 0).unwrap();
        let slot = NewAppointment {
            scheduled_at: at,
            service_id: service.id,
            barbershop_id: shop.id,
            user_id: owner.id,
        };
        repos.appointments().save(slot.clone()).await.unwrap();

        let err = repos.appointments().save(slot).await.unwrap_err();
        assert_eq!(
            err,
            DomainError::not_authorized("Já existe um agendamento nesse horário.")
        );
    }

    #[tokio::test]
    async fn search_by_name_is_case_sensitive() {
        let repos = provider().await;
        let owner = repos
            .users()
            .create_user(user("s@x.com", UserRole::ShopOwner))
            .await
            .unwrap();
        repos
            .barbershops()
            .save(NewBarbershop {
                name: "Barbearia Navalha".into(),
                address: "Rua B".into(),
                photo: None,
                owner_id: owner.id,
            })
            .await
            .unwrap();

        assert_eq!(repos.barbershops().search_by_name("Navalha").await.unwrap().len(), 1);
        assert!(repos.barbershops().search_by_name("navalha").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn photo_key_lookup_spans_each_table() {
        let repos = provider().await;
        let owner = repos
            .users()
            .create_user(CreateUserDto {
                photo: Some(PhotoRef {
                    url: "http://cdn/u/face.jpg".into(),
                    key: "u/face.jpg".into(),
                }),
                ..user("p@x.com", UserRole::ShopOwner)
            })
            .await
            .unwrap();
        repos
            .barbershops()
            .save(NewBarbershop {
                name: "Navalha".into(),
                address: "Rua P".into(),
                photo: Some(PhotoRef {
                    url: "http://cdn/s/front.jpg".into(),
                    key: "s/front.jpg".into(),
                }),
                owner_id: owner.id,
            })
            .await
            .unwrap();

        assert!(repos.users().photo_key_in_use("u/face.jpg").await.unwrap());
        assert!(!repos.users().photo_key_in_use("s/front.jpg").await.unwrap());
        assert!(repos.barbershops().photo_key_in_use("s/front.jpg").await.unwrap());
        assert!(!repos.services().photo_key_in_use("s/front.jpg").await.unwrap());
    }
}
