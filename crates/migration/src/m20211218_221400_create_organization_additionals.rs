//! Create `organization_additionals` table: additional facts.
use sea_orm_migration::{prelude::*, schema::*};

use crate::lifecycle;

const TABLE: &str = "organization_additionals";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut table = Table::create();
        table
            .table(OrganizationAdditionals::Table)
            .if_not_exists()
            .col(pk_auto(OrganizationAdditionals::Id))
            .col(integer_null(OrganizationAdditionals::OrganizationId))
            .col(string_len(OrganizationAdditionals::Name, 255))
            .col(string_null(OrganizationAdditionals::DisplayName))
            .col(text_null(OrganizationAdditionals::Description))
            .col(string_null(OrganizationAdditionals::Website));
        lifecycle::organization_key(&mut table, TABLE, OrganizationAdditionals::OrganizationId);
        lifecycle::columns(&mut table, TABLE);

        lifecycle::create_table(manager, table).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        lifecycle::drop_table(manager, OrganizationAdditionals::Table).await
    }
}

#[derive(DeriveIden)]
enum OrganizationAdditionals { Table, Id, OrganizationId, Name, DisplayName, Description, Website }
