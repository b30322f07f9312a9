//! Create `organization_profiles` table with FK to `organizations`.
use sea_orm_migration::{prelude::*, schema::*};

use crate::lifecycle;

const TABLE: &str = "organization_profiles";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut table = Table::create();
        table
            .table(OrganizationProfiles::Table)
            .if_not_exists()
            .col(pk_auto(OrganizationProfiles::Id))
            .col(integer(OrganizationProfiles::OrganizationId))
            .col(string_null(OrganizationProfiles::Alias))
            .col(string_null(OrganizationProfiles::ShortDescription))
            .col(string_null(OrganizationProfiles::Website));
        lifecycle::organization_key(&mut table, TABLE, OrganizationProfiles::OrganizationId);
        lifecycle::columns(&mut table, TABLE);

        lifecycle::create_table(manager, table).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        lifecycle::drop_table(manager, OrganizationProfiles::Table).await
    }
}

#[derive(DeriveIden)]
enum OrganizationProfiles { Table, Id, OrganizationId, Alias, ShortDescription, Website }
