//! Create `organization_marketings` table: marketing channels.
use sea_orm_migration::{prelude::*, schema::*};

use crate::lifecycle;

const TABLE: &str = "organization_marketings";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut table = Table::create();
        table
            .table(OrganizationMarketings::Table)
            .if_not_exists()
            .col(pk_auto(OrganizationMarketings::Id))
            .col(integer_null(OrganizationMarketings::OrganizationId))
            .col(string_len(OrganizationMarketings::Name, 255))
            .col(string_null(OrganizationMarketings::DisplayName))
            .col(text_null(OrganizationMarketings::Description))
            .col(string_null(OrganizationMarketings::Website));
        lifecycle::organization_key(&mut table, TABLE, OrganizationMarketings::OrganizationId);
        lifecycle::columns(&mut table, TABLE);

        lifecycle::create_table(manager, table).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        lifecycle::drop_table(manager, OrganizationMarketings::Table).await
    }
}

#[derive(DeriveIden)]
enum OrganizationMarketings { Table, Id, OrganizationId, Name, DisplayName, Description, Website }
