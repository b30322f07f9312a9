//! Create `organization_businesses` table.
//!
//! Registration, tax and financial facts of an organization; every field but
//! the owning organization is optional.
use sea_orm_migration::{prelude::*, schema::*};

use crate::lifecycle;

const TABLE: &str = "organization_businesses";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut table = Table::create();
        table
            .table(OrganizationBusinesses::Table)
            .if_not_exists()
            .col(pk_auto(OrganizationBusinesses::Id))
            .col(integer(OrganizationBusinesses::OrganizationId))
            .col(date_null(OrganizationBusinesses::FoundedAt))
            .col(integer_null(OrganizationBusinesses::TotalEmployee))
            .col(string_null(OrganizationBusinesses::AnnualRevenue))
            .col(string_null(OrganizationBusinesses::StockSymbol))
            // owner or authority
            .col(string_null(OrganizationBusinesses::LegalName))
            .col(string_null(OrganizationBusinesses::GlnNumber))
            .col(string_null(OrganizationBusinesses::TaxType))
            .col(string_null(OrganizationBusinesses::TaxId))
            .col(string_null(OrganizationBusinesses::TaxCertificate))
            .col(date_null(OrganizationBusinesses::TaxExpire))
            .col(string_null(OrganizationBusinesses::StateTaxId))
            .col(string_null(OrganizationBusinesses::RegionalTaxId))
            .col(string_null(OrganizationBusinesses::VatId))
            .col(string_null(OrganizationBusinesses::VatDocument))
            .col(string_null(OrganizationBusinesses::BusinessType));
        lifecycle::organization_key(&mut table, TABLE, OrganizationBusinesses::OrganizationId);
        lifecycle::columns(&mut table, TABLE);

        lifecycle::create_table(manager, table).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        lifecycle::drop_table(manager, OrganizationBusinesses::Table).await
    }
}

#[derive(DeriveIden)]
enum OrganizationBusinesses {
    Table,
    Id,
    OrganizationId,
    FoundedAt,
    TotalEmployee,
    AnnualRevenue,
    StockSymbol,
    LegalName,
    GlnNumber,
    TaxType,
    TaxId,
    TaxCertificate,
    TaxExpire,
    StateTaxId,
    RegionalTaxId,
    VatId,
    VatDocument,
    BusinessType,
}
