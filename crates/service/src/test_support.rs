#![cfg(test)]
use sea_orm::DatabaseConnection;
use migration::MigratorTrait;
use models::db::{connect_with_config, DatabaseConfig};

/// Fresh migrated in-memory database; each call gets its own.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let cfg = DatabaseConfig { url: "sqlite::memory:".into(), ..DatabaseConfig::default() };
    let db = connect_with_config(&cfg).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

pub async fn seed_user(db: &DatabaseConnection, name: &str) -> Result<models::user::Model, anyhow::Error> {
    let email = format!("{}@example.com", name.to_lowercase().replace(' ', "."));
    Ok(models::user::create(db, name, &email).await?)
}
