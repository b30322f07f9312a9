//! Create `organizations` table, the root of every other table in the module.
use sea_orm_migration::{prelude::*, schema::*};

use crate::lifecycle;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut table = Table::create();
        table
            .table(Organizations::Table)
            .if_not_exists()
            .col(pk_auto(Organizations::Id))
            .col(string_len(Organizations::Name, 255))
            .col(text_null(Organizations::Remarks));
        lifecycle::columns(&mut table, "organizations");

        lifecycle::create_table(manager, table).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        lifecycle::drop_table(manager, Organizations::Table).await
    }
}

#[derive(DeriveIden)]
enum Organizations { Table, Id, Name, Remarks }
