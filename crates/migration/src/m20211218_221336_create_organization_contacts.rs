//! Create `organization_contacts` table.
//!
//! The owning organization is optional: a contact may exist before it is
//! attached to one.
use sea_orm_migration::{prelude::*, schema::*};

use crate::lifecycle;

const TABLE: &str = "organization_contacts";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut table = Table::create();
        table
            .table(OrganizationContacts::Table)
            .if_not_exists()
            .col(pk_auto(OrganizationContacts::Id))
            .col(integer_null(OrganizationContacts::OrganizationId))
            .col(string_null(OrganizationContacts::Phone))
            .col(string_null(OrganizationContacts::Email))
            .col(string_null(OrganizationContacts::Fax));
        lifecycle::organization_key(&mut table, TABLE, OrganizationContacts::OrganizationId);
        lifecycle::columns(&mut table, TABLE);

        lifecycle::create_table(manager, table).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        lifecycle::drop_table(manager, OrganizationContacts::Table).await
    }
}

#[derive(DeriveIden)]
enum OrganizationContacts { Table, Id, OrganizationId, Phone, Email, Fax }
