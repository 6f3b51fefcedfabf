//! Booking service
//!
//! Every write goes through a short sequence of checks against the store:
//! the service must exist, its barbershop must exist (resolved through the
//! service relation, not the service's own column), and the slot must be
//! free. The unique `(barbershop_id, scheduled_at)` index backs the last
//! check when two requests race.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use mockable::Clock;
use tracing::{info, warn};

use crate::domain::{
    day_bounds, Appointment, AppointmentDetails, ClientAppointmentFilter, DomainError,
    DomainResult, NewAppointment, RepositoryProvider,
};

const CLIENT_NOT_FOUND: &str = "Usuário não encontrado.";
const SERVICE_NOT_FOUND: &str = "Serviço não encontrado.";
const BARBERSHOP_NOT_FOUND: &str = "Barbearia não encontrada.";
const SLOT_TAKEN: &str = "Já existe um agendamento nesse horário.";
const APPOINTMENT_NOT_FOUND: &str = "Agendamento não encontrado.";
const NOT_YOUR_APPOINTMENT: &str = "Você não tem permissão para excluir este agendamento.";

pub struct BookingService {
    repos: Arc<dyn RepositoryProvider>,
    clock: Arc<dyn Clock + Send + Sync>,
}

impl BookingService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self { repos, clock }
    }

    /// Book `service_id` at exactly `scheduled_at` for `client_id`.
    pub async fn create_appointment(
        &self,
        scheduled_at: DateTime<Utc>,
        service_id: i32,
        client_id: i32,
    ) -> DomainResult<Appointment> {
        // a token can outlive the account it was issued for
        if self.repos.users().get_user_by_id(client_id).await?.is_none() {
            return Err(reject("client_not_found", CLIENT_NOT_FOUND));
        }

        if self.repos.services().find_by_id(service_id).await?.is_none() {
            return Err(reject("service_not_found", SERVICE_NOT_FOUND));
        }

        let Some(barbershop) = self.repos.barbershops().find_by_service(service_id).await? else {
            return Err(reject("barbershop_not_found", BARBERSHOP_NOT_FOUND));
        };

        if self
            .repos
            .appointments()
            .find_at(barbershop.id, scheduled_at)
            .await?
            .is_some()
        {
            return Err(reject("slot_taken", SLOT_TAKEN));
        }

        let appointment = self
            .repos
            .appointments()
            .save(NewAppointment {
                scheduled_at,
                service_id,
                barbershop_id: barbershop.id,
                user_id: client_id,
            })
            .await
            .inspect_err(|e| {
                if matches!(e, DomainError::NotAuthorized(_)) {
                    metrics::counter!("appointments_rejected_total", "reason" => "slot_taken")
                        .increment(1);
                }
            })?;

        metrics::counter!("appointments_created_total").increment(1);
        info!(
            appointment_id = appointment.id,
            barbershop_id = barbershop.id,
            client_id,
            scheduled_at = %scheduled_at,
            "Appointment booked"
        );

        Ok(appointment)
    }

    /// Upcoming (`"0"`) or finalized (`"1"`) appointments of a client,
    /// each with its service and barbershop.
    pub async fn list_for_client(
        &self,
        client_id: i32,
        finalized: &str,
    ) -> DomainResult<Vec<AppointmentDetails>> {
        let filter = ClientAppointmentFilter::from_flag(finalized)?;
        let now = self.clock.utc();

        let appointments = match filter {
            ClientAppointmentFilter::Upcoming => {
                self.repos
                    .appointments()
                    .find_for_client_from(client_id, now)
                    .await?
            }
            ClientAppointmentFilter::Finalized => {
                self.repos
                    .appointments()
                    .find_for_client_until(client_id, now)
                    .await?
            }
        };

        let mut details = Vec::with_capacity(appointments.len());
        for appointment in appointments {
            let service = self.repos.services().find_by_id(appointment.service_id).await?;
            let barbershop = self
                .repos
                .barbershops()
                .find_by_id(appointment.barbershop_id)
                .await?;
            details.push(AppointmentDetails {
                appointment,
                service,
                barbershop,
            });
        }

        Ok(details)
    }

    /// All appointments of the barbershop owned by `owner_id`.
    pub async fn list_for_owner(&self, owner_id: i32) -> DomainResult<Vec<Appointment>> {
        let barbershop = self
            .repos
            .barbershops()
            .find_by_owner(owner_id)
            .await?
            .ok_or_else(|| DomainError::not_authorized(BARBERSHOP_NOT_FOUND))?;

        self.repos
            .appointments()
            .find_for_barbershop(barbershop.id)
            .await
    }

    /// Appointments of a barbershop on the UTC day containing `date`.
    pub async fn list_for_barbershop_on(
        &self,
        barbershop_id: i32,
        date: DateTime<Utc>,
    ) -> DomainResult<Vec<Appointment>> {
        let (start, end) = day_bounds(date);
        self.repos
            .appointments()
            .find_for_barbershop_between(barbershop_id, start, end)
            .await
    }

    /// Delete an appointment on behalf of the client who booked it or the
    /// owner of its barbershop. Returns the removed record.
    pub async fn delete_appointment(
        &self,
        appointment_id: i32,
        requester_id: i32,
    ) -> DomainResult<Appointment> {
        let appointment = self
            .repos
            .appointments()
            .find_by_id(appointment_id)
            .await?
            .ok_or_else(|| DomainError::not_authorized(APPOINTMENT_NOT_FOUND))?;

        let allowed = appointment.is_booked_by(requester_id)
            || self
                .repos
                .barbershops()
                .find_by_id(appointment.barbershop_id)
                .await?
                .is_some_and(|shop| shop.is_owned_by(requester_id));

        if !allowed {
            warn!(appointment_id, requester_id, "Appointment deletion refused");
            return Err(DomainError::not_authorized(NOT_YOUR_APPOINTMENT));
        }

        self.repos.appointments().delete(appointment.id).await?;
        metrics::counter!("appointments_deleted_total").increment(1);
        info!(appointment_id, requester_id, "Appointment deleted");

        Ok(appointment)
    }
}

fn reject(reason: &'static str, message: &str) -> DomainError {
    metrics::counter!("appointments_rejected_total", "reason" => reason).increment(1);
    DomainError::not_authorized(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::{
        fixed_clock, repos, seed_service, seed_shop, seed_user, utc,
    };
    use crate::domain::UserRole;

    async fn service_at(now: DateTime<Utc>) -> (BookingService, Arc<dyn RepositoryProvider>) {
        let repos = repos().await;
        (BookingService::new(repos.clone(), fixed_clock(now)), repos)
    }

    #[tokio::test]
    async fn second_booking_at_same_instant_is_rejected() {
        let (booking, repos) = service_at(utc(2025, 6, 1, 0, 0)).await;
        let owner = seed_user(&repos, "owner@x.com", UserRole::ShopOwner).await;
        let a = seed_user(&repos, "a@x.com", UserRole::Client).await;
        let b = seed_user(&repos, "b@x.com", UserRole::Client).await;
        let shop = seed_shop(&repos, &owner, "Navalha").await;
        let corte = seed_service(&repos, &shop, "Corte", 50.0).await;

        let at = utc(2025, 6, 10, 10, 0);
        let first = booking.create_appointment(at, corte.id, a.id).await.unwrap();
        assert_eq!(first.barbershop_id, shop.id);

        let err = booking
            .create_appointment(at, corte.id, b.id)
            .await
            .unwrap_err();
        assert_eq!(err, DomainError::not_authorized(SLOT_TAKEN));
        assert_eq!(repos.appointments().find_for_barbershop(shop.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn same_instant_in_different_barbershops_is_allowed() {
        let (booking, repos) = service_at(utc(2025, 6, 1, 0, 0)).await;
        let o1 = seed_user(&repos, "o1@x.com", UserRole::ShopOwner).await;
        let o2 = seed_user(&repos, "o2@x.com", UserRole::ShopOwner).await;
        let client = seed_user(&repos, "c@x.com", UserRole::Client).await;
        let s1 = seed_service(&repos, &seed_shop(&repos, &o1, "One").await, "Corte", 40.0).await;
        let s2 = seed_service(&repos, &seed_shop(&repos, &o2, "Two").await, "Corte", 45.0).await;

        let at = utc(2025, 6, 10, 10, 0);
        booking.create_appointment(at, s1.id, client.id).await.unwrap();
        booking.create_appointment(at, s2.id, client.id).await.unwrap();
    }

    #[tokio::test]
    async fn deleted_client_is_rejected() {
        let (booking, repos) = service_at(utc(2025, 6, 1, 0, 0)).await;
        let owner = seed_user(&repos, "owner@x.com", UserRole::ShopOwner).await;
        let client = seed_user(&repos, "c@x.com", UserRole::Client).await;
        let corte = seed_service(&repos, &seed_shop(&repos, &owner, "Navalha").await, "Corte", 50.0)
            .await;
        repos.users().delete_user(client.id).await.unwrap();

        let err = booking
            .create_appointment(utc(2025, 6, 10, 10, 0), corte.id, client.id)
            .await
            .unwrap_err();
        assert_eq!(err, DomainError::not_authorized(CLIENT_NOT_FOUND));
        assert!(repos.appointments().find_for_barbershop(corte.barbershop_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_service_is_rejected() {
        let (booking, repos) = service_at(utc(2025, 6, 1, 0, 0)).await;
        let client = seed_user(&repos, "c@x.com", UserRole::Client).await;

        let err = booking
            .create_appointment(utc(2025, 6, 10, 10, 0), 404, client.id)
            .await
            .unwrap_err();
        assert_eq!(err, DomainError::not_authorized(SERVICE_NOT_FOUND));
    }

    #[tokio::test]
    async fn client_listing_splits_on_now() {
        let now = utc(2025, 6, 1, 0, 0);
        let (booking, repos) = service_at(now).await;
        let owner = seed_user(&repos, "owner@x.com", UserRole::ShopOwner).await;
        let client = seed_user(&repos, "c@x.com", UserRole::Client).await;
        let shop = seed_shop(&repos, &owner, "Navalha").await;
        let corte = seed_service(&repos, &shop, "Corte", 50.0).await;

        let past = utc(2025, 5, 30, 9, 0);
        let recent = utc(2025, 5, 31, 23, 0);
        let soon = utc(2025, 6, 2, 10, 0);
        let later = utc(2025, 6, 9, 10, 0);
        for at in [later, past, soon, now, recent] {
            booking.create_appointment(at, corte.id, client.id).await.unwrap();
        }

        let upcoming: Vec<_> = booking
            .list_for_client(client.id, "0")
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.appointment.scheduled_at)
            .collect();
        assert_eq!(upcoming, vec![now, soon, later]);

        let finalized: Vec<_> = booking
            .list_for_client(client.id, "1")
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.appointment.scheduled_at)
            .collect();
        assert_eq!(finalized, vec![now, recent, past]);
    }

    #[tokio::test]
    async fn client_listing_is_enriched_and_validates_flag() {
        let (booking, repos) = service_at(utc(2025, 6, 1, 0, 0)).await;
        let owner = seed_user(&repos, "owner@x.com", UserRole::ShopOwner).await;
        let client = seed_user(&repos, "c@x.com", UserRole::Client).await;
        let shop = seed_shop(&repos, &owner, "Navalha").await;
        let corte = seed_service(&repos, &shop, "Corte", 50.0).await;
        booking
            .create_appointment(utc(2025, 6, 3, 15, 0), corte.id, client.id)
            .await
            .unwrap();

        let details = booking.list_for_client(client.id, "0").await.unwrap();
        assert_eq!(details.len(), 1);
        assert_eq!(details[0].service.as_ref().map(|s| s.name.as_str()), Some("Corte"));
        assert_eq!(details[0].barbershop.as_ref().map(|b| b.id), Some(shop.id));

        assert!(matches!(
            booking.list_for_client(client.id, "yes").await,
            Err(DomainError::InvalidParam(_))
        ));
    }

    #[tokio::test]
    async fn day_window_includes_both_edges() {
        let (booking, repos) = service_at(utc(2025, 7, 1, 0, 0)).await;
        let owner = seed_user(&repos, "owner@x.com", UserRole::ShopOwner).await;
        let client = seed_user(&repos, "c@x.com", UserRole::Client).await;
        let shop = seed_shop(&repos, &owner, "Navalha").await;
        let corte = seed_service(&repos, &shop, "Corte", 50.0).await;

        let inside = [
            utc(2025, 7, 15, 0, 0),
            utc(2025, 7, 15, 12, 30),
            utc(2025, 7, 15, 23, 59),
        ];
        let outside = [utc(2025, 7, 14, 23, 59), utc(2025, 7, 16, 0, 0)];
        for at in inside.iter().chain(outside.iter()) {
            booking.create_appointment(*at, corte.id, client.id).await.unwrap();
        }

        let found: Vec<_> = booking
            .list_for_barbershop_on(shop.id, utc(2025, 7, 15, 8, 0))
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.scheduled_at)
            .collect();
        assert_eq!(found, inside.to_vec());
    }

    #[tokio::test]
    async fn only_booking_client_or_shop_owner_may_delete() {
        let (booking, repos) = service_at(utc(2025, 6, 1, 0, 0)).await;
        let owner = seed_user(&repos, "owner@x.com", UserRole::ShopOwner).await;
        let other_owner = seed_user(&repos, "other@x.com", UserRole::ShopOwner).await;
        let client = seed_user(&repos, "c@x.com", UserRole::Client).await;
        let stranger = seed_user(&repos, "s@x.com", UserRole::Client).await;
        let shop = seed_shop(&repos, &owner, "Navalha").await;
        seed_shop(&repos, &other_owner, "Other").await;
        let corte = seed_service(&repos, &shop, "Corte", 50.0).await;

        let first = booking
            .create_appointment(utc(2025, 6, 10, 10, 0), corte.id, client.id)
            .await
            .unwrap();
        let second = booking
            .create_appointment(utc(2025, 6, 10, 11, 0), corte.id, client.id)
            .await
            .unwrap();

        for intruder in [stranger.id, other_owner.id] {
            assert!(matches!(
                booking.delete_appointment(first.id, intruder).await,
                Err(DomainError::NotAuthorized(_))
            ));
        }

        let removed = booking.delete_appointment(first.id, client.id).await.unwrap();
        assert_eq!(removed, first);

        booking.delete_appointment(second.id, owner.id).await.unwrap();
        assert!(repos.appointments().find_by_id(second.id).await.unwrap().is_none());

        assert_eq!(
            booking.delete_appointment(first.id, client.id).await.unwrap_err(),
            DomainError::not_authorized(APPOINTMENT_NOT_FOUND)
        );
    }

    #[tokio::test]
    async fn owner_without_barbershop_cannot_list() {
        let (booking, repos) = service_at(utc(2025, 6, 1, 0, 0)).await;
        let owner = seed_user(&repos, "owner@x.com", UserRole::ShopOwner).await;

        assert_eq!(
            booking.list_for_owner(owner.id).await.unwrap_err(),
            DomainError::not_authorized(BARBERSHOP_NOT_FOUND)
        );
    }

    #[tokio::test]
    async fn booking_round_trip() {
        let (booking, repos) = service_at(utc(2025, 6, 1, 0, 0)).await;
        let client = seed_user(&repos, "c@x.com", UserRole::Client).await;
        let owner = seed_user(&repos, "owner@x.com", UserRole::ShopOwner).await;
        let shop = seed_shop(&repos, &owner, "Navalha").await;
        let corte = seed_service(&repos, &shop, "Corte", 50.0).await;
        let at = utc(2025, 6, 10, 10, 0);

        let appointment = booking.create_appointment(at, corte.id, client.id).await.unwrap();
        assert!(booking.create_appointment(at, corte.id, client.id).await.is_err());

        let listed = booking.list_for_owner(owner.id).await.unwrap();
        assert_eq!(listed, vec![appointment.clone()]);

        booking.delete_appointment(appointment.id, client.id).await.unwrap();
        assert!(booking.list_for_owner(owner.id).await.unwrap().is_empty());
    }
}
