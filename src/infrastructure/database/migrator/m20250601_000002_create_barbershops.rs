//! Migration to create barbershops table

use sea_orm_migration::prelude::*;

use super::m20250601_000001_create_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Barbershops::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Barbershops::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Barbershops::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Barbershops::Address).string().not_null())
                    .col(ColumnDef::new(Barbershops::PhotoUrl).string().null())
                    .col(ColumnDef::new(Barbershops::PhotoKey).string().null())
                    .col(
                        ColumnDef::new(Barbershops::OwnerId)
                            .integer()
                            .not_null()
                            .unique_key(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_barbershops_owner")
                            .from(Barbershops::Table, Barbershops::OwnerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_barbershops_name")
                    .table(Barbershops::Table)
                    .col(Barbershops::Name)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Barbershops::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub(super) enum Barbershops {
    Table,
    Id,
    Name,
    Address,
    PhotoUrl,
    PhotoKey,
    OwnerId,
}
