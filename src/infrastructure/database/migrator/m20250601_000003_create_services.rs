//! Migration to create services table

use sea_orm_migration::prelude::*;

use super::m20250601_000002_create_barbershops::Barbershops;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Services::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Services::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Services::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Services::Description).text().not_null())
                    .col(ColumnDef::new(Services::Price).double().not_null())
                    .col(ColumnDef::new(Services::PhotoUrl).string().null())
                    .col(ColumnDef::new(Services::PhotoKey).string().null())
                    .col(ColumnDef::new(Services::BarbershopId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_services_barbershop")
                            .from(Services::Table, Services::BarbershopId)
                            .to(Barbershops::Table, Barbershops::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Service names are unique within a barbershop
        manager
            .create_index(
                Index::create()
                    .name("idx_services_barbershop_name")
                    .table(Services::Table)
                    .col(Services::BarbershopId)
                    .col(Services::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Services::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub(super) enum Services {
    Table,
    Id,
    Name,
    Description,
    Price,
    PhotoUrl,
    PhotoKey,
    BarbershopId,
}
