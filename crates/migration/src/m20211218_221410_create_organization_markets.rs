//! Create `organization_markets` table: markets an organization serves.
use sea_orm_migration::{prelude::*, schema::*};

use crate::lifecycle;

const TABLE: &str = "organization_markets";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut table = Table::create();
        table
            .table(OrganizationMarkets::Table)
            .if_not_exists()
            .col(pk_auto(OrganizationMarkets::Id))
            .col(integer_null(OrganizationMarkets::OrganizationId))
            .col(string_len(OrganizationMarkets::Name, 255))
            .col(string_null(OrganizationMarkets::DisplayName))
            .col(text_null(OrganizationMarkets::Description))
            .col(string_null(OrganizationMarkets::Website));
        lifecycle::organization_key(&mut table, TABLE, OrganizationMarkets::OrganizationId);
        lifecycle::columns(&mut table, TABLE);

        lifecycle::create_table(manager, table).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        lifecycle::drop_table(manager, OrganizationMarkets::Table).await
    }
}

#[derive(DeriveIden)]
enum OrganizationMarkets { Table, Id, OrganizationId, Name, DisplayName, Description, Website }
