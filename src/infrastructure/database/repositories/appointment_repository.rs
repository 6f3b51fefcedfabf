//! SeaORM implementation of AppointmentRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::debug;

use super::{db_err, write_err};
use crate::domain::appointment::{Appointment, AppointmentRepository, NewAppointment};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::appointment;

pub struct SeaOrmAppointmentRepository {
    db: DatabaseConnection,
}

impl SeaOrmAppointmentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: appointment::Model) -> Appointment {
    Appointment {
        id: m.id,
        scheduled_at: m.scheduled_at,
        service_id: m.service_id,
        barbershop_id: m.barbershop_id,
        user_id: m.user_id,
        created_at: m.created_at,
    }
}

pub(crate) fn slot_taken() -> DomainError {
    DomainError::not_authorized("Já existe um agendamento nesse horário.")
}

// ── AppointmentRepository impl ──────────────────────────────────

#[async_trait]
impl AppointmentRepository for SeaOrmAppointmentRepository {
    async fn save(&self, a: NewAppointment) -> DomainResult<Appointment> {
        debug!(
            "Saving appointment: barbershop={} service={} at {}",
            a.barbershop_id, a.service_id, a.scheduled_at
        );

        let model = appointment::ActiveModel {
            scheduled_at: Set(a.scheduled_at),
            service_id: Set(a.service_id),
            barbershop_id: Set(a.barbershop_id),
            user_id: Set(a.user_id),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        let saved = model
            .insert(&self.db)
            .await
            .map_err(|e| write_err(e, slot_taken))?;
        Ok(model_to_domain(saved))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Appointment>> {
        let model = appointment::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_at(
        &self,
        barbershop_id: i32,
        at: DateTime<Utc>,
    ) -> DomainResult<Option<Appointment>> {
        let model = appointment::Entity::find()
            .filter(appointment::Column::BarbershopId.eq(barbershop_id))
            .filter(appointment::Column::ScheduledAt.eq(at))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_for_client_from(
        &self,
        user_id: i32,
        from: DateTime<Utc>,
    ) -> DomainResult<Vec<Appointment>> {
        let models = appointment::Entity::find()
            .filter(appointment::Column::UserId.eq(user_id))
            .filter(appointment::Column::ScheduledAt.gte(from))
            .order_by_asc(appointment::Column::ScheduledAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_for_client_until(
        &self,
        user_id: i32,
        until: DateTime<Utc>,
    ) -> DomainResult<Vec<Appointment>> {
        let models = appointment::Entity::find()
            .filter(appointment::Column::UserId.eq(user_id))
            .filter(appointment::Column::ScheduledAt.lte(until))
            .order_by_desc(appointment::Column::ScheduledAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_for_barbershop(&self, barbershop_id: i32) -> DomainResult<Vec<Appointment>> {
        let models = appointment::Entity::find()
            .filter(appointment::Column::BarbershopId.eq(barbershop_id))
            .order_by_asc(appointment::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_for_barbershop_between(
        &self,
        barbershop_id: i32,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> DomainResult<Vec<Appointment>> {
        let models = appointment::Entity::find()
            .filter(appointment::Column::BarbershopId.eq(barbershop_id))
            .filter(appointment::Column::ScheduledAt.between(start, end))
            .order_by_asc(appointment::Column::ScheduledAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        debug!("Deleting appointment: {}", id);
        appointment::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }
}
