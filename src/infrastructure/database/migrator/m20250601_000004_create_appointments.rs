//! Migration to create appointments table

use sea_orm_migration::prelude::*;

use super::m20250601_000001_create_users::Users;
use super::m20250601_000002_create_barbershops::Barbershops;
use super::m20250601_000003_create_services::Services;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Appointments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Appointments::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Appointments::ScheduledAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Appointments::ServiceId).integer().not_null())
                    .col(ColumnDef::new(Appointments::BarbershopId).integer().not_null())
                    .col(ColumnDef::new(Appointments::UserId).integer().not_null())
                    .col(
                        ColumnDef::new(Appointments::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_appointments_service")
                            .from(Appointments::Table, Appointments::ServiceId)
                            .to(Services::Table, Services::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_appointments_barbershop")
                            .from(Appointments::Table, Appointments::BarbershopId)
                            .to(Barbershops::Table, Barbershops::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_appointments_user")
                            .from(Appointments::Table, Appointments::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One appointment per barbershop per instant
        manager
            .create_index(
                Index::create()
                    .name("idx_appointments_barbershop_slot")
                    .table(Appointments::Table)
                    .col(Appointments::BarbershopId)
                    .col(Appointments::ScheduledAt)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_appointments_user_scheduled")
                    .table(Appointments::Table)
                    .col(Appointments::UserId)
                    .col(Appointments::ScheduledAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Appointments::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Appointments {
    Table,
    Id,
    ScheduledAt,
    ServiceId,
    BarbershopId,
    UserId,
    CreatedAt,
}
