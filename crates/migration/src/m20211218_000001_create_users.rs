//! Create `users` table.
//!
//! Owned by the core module; only the columns the audit relations of this
//! module read are declared here so the foreign keys have a target.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(pk_auto(Users::Id))
                    .col(string_len(Users::Name, 255))
                    .col(string_len(Users::Email, 255).unique_key())
                    .col(timestamp_with_time_zone_null(Users::CreatedAt))
                    .col(timestamp_with_time_zone_null(Users::UpdatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        crate::lifecycle::drop_table(manager, Users::Table).await
    }
}

#[derive(DeriveIden)]
enum Users { Table, Id, Name, Email, CreatedAt, UpdatedAt }
