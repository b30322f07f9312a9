//! Column family shared by every organization table: the `enabled` option
//! set, audit foreign keys to `users` and the timestamp triple with the
//! soft-delete marker. Also the referential-integrity toggles migrations wrap
//! their DDL in.
use sea_orm_migration::{prelude::*, schema::*, sea_orm::DatabaseBackend};

pub const ENABLED_OPTIONS: [&str; 2] = ["yes", "no"];
pub const ENABLED_OPTION: &str = "yes";

#[derive(DeriveIden)]
pub enum Lifecycle {
    Enabled,
    CreatedBy,
    UpdatedBy,
    DeletedBy,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(DeriveIden)]
pub enum Users { Table, Id }

#[derive(DeriveIden)]
pub enum Organizations { Table, Id }

/// Append the lifecycle columns and their audit foreign keys to `table`.
pub fn columns(table: &mut TableCreateStatement, name: &str) {
    table
        .col(
            string_len(Lifecycle::Enabled, 8)
                .default(ENABLED_OPTION)
                .check(Expr::col(Lifecycle::Enabled).is_in(ENABLED_OPTIONS)),
        )
        .col(integer_null(Lifecycle::CreatedBy))
        .col(integer_null(Lifecycle::UpdatedBy))
        .col(integer_null(Lifecycle::DeletedBy))
        .col(timestamp_with_time_zone_null(Lifecycle::CreatedAt))
        .col(timestamp_with_time_zone_null(Lifecycle::UpdatedAt))
        // Explicitly nullable: a non-null value marks the row as trashed
        .col(timestamp_with_time_zone_null(Lifecycle::DeletedAt));

    for (column, suffix) in [
        (Lifecycle::CreatedBy, "created_by"),
        (Lifecycle::UpdatedBy, "updated_by"),
        (Lifecycle::DeletedBy, "deleted_by"),
    ] {
        table.foreign_key(
            ForeignKey::create()
                .name(format!("fk_{name}_{suffix}"))
                .from(Alias::new(name), column)
                .to(Users::Table, Users::Id)
                .on_delete(ForeignKeyAction::SetNull)
                .on_update(ForeignKeyAction::Cascade),
        );
    }
}

/// Foreign key from `name.organization_id` to `organizations.id`.
pub fn organization_key(table: &mut TableCreateStatement, name: &str, column: impl IntoIden) {
    table.foreign_key(
        ForeignKey::create()
            .name(format!("fk_{name}_organization"))
            .from(Alias::new(name), column)
            .to(Organizations::Table, Organizations::Id)
            .on_delete(ForeignKeyAction::Cascade)
            .on_update(ForeignKeyAction::Cascade),
    );
}

/// Temporarily disable foreign key constraints.
pub async fn disable_foreign_keys(manager: &SchemaManager<'_>) -> Result<(), DbErr> {
    toggle_foreign_keys(manager, false).await
}

/// Restore foreign key constraints.
pub async fn enable_foreign_keys(manager: &SchemaManager<'_>) -> Result<(), DbErr> {
    toggle_foreign_keys(manager, true).await
}

async fn toggle_foreign_keys(manager: &SchemaManager<'_>, on: bool) -> Result<(), DbErr> {
    let sql = match manager.get_database_backend() {
        DatabaseBackend::Sqlite if on => "PRAGMA foreign_keys = ON",
        DatabaseBackend::Sqlite => "PRAGMA foreign_keys = OFF",
        DatabaseBackend::MySql if on => "SET FOREIGN_KEY_CHECKS = 1",
        DatabaseBackend::MySql => "SET FOREIGN_KEY_CHECKS = 0",
        // postgres runs each migration in a transaction, tables are created in dependency order
        _ => return Ok(()),
    };
    manager.get_connection().execute_unprepared(sql).await?;
    Ok(())
}

/// Create `table` with foreign key checks suspended, restoring them even when
/// the statement fails.
pub async fn create_table(manager: &SchemaManager<'_>, table: TableCreateStatement) -> Result<(), DbErr> {
    disable_foreign_keys(manager).await?;
    let created = manager.create_table(table).await;
    enable_foreign_keys(manager).await?;
    created
}

/// Drop `table` if it exists, with foreign key checks suspended.
pub async fn drop_table(manager: &SchemaManager<'_>, table: impl IntoTableRef) -> Result<(), DbErr> {
    disable_foreign_keys(manager).await?;
    let dropped = manager.drop_table(Table::drop().table(table).if_exists().to_owned()).await;
    enable_foreign_keys(manager).await?;
    dropped
}
