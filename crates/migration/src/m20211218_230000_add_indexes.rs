use sea_orm_migration::prelude::*;

const AUDITED: [&str; 7] = [
    "organizations",
    "organization_profiles",
    "organization_businesses",
    "organization_contacts",
    "organization_additionals",
    "organization_markets",
    "organization_marketings",
];

const AUDIT_COLUMNS: [&str; 3] = ["created_by", "updated_by", "deleted_by"];

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (table, column) in indexed_columns() {
            manager
                .create_index(
                    Index::create()
                        .name(index_name(table, column))
                        .table(Alias::new(table))
                        .col(Alias::new(column))
                        .if_not_exists()
                        .to_owned(),
                )
                .await?;
        }
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (table, column) in indexed_columns() {
            manager
                .drop_index(Index::drop().name(index_name(table, column)).table(Alias::new(table)).to_owned())
                .await?;
        }
        Ok(())
    }
}

/// Audit columns of every table plus the owning organization of child tables.
fn indexed_columns() -> Vec<(&'static str, &'static str)> {
    let mut cols: Vec<_> = AUDITED
        .iter()
        .flat_map(|t| AUDIT_COLUMNS.iter().map(move |c| (*t, *c)))
        .collect();
    cols.extend(AUDITED[1..].iter().map(|t| (*t, "organization_id")));
    cols
}

fn index_name(table: &str, column: &str) -> String {
    format!("idx_{table}_{column}")
}
