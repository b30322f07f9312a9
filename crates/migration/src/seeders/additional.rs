use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::DatabaseConnection;
use tracing::debug;

use super::Seeder;

/// Scaffold for `organization_additionals` seed rows; nothing to insert yet.
pub struct AdditionalTableSeeder;

#[async_trait::async_trait]
impl Seeder for AdditionalTableSeeder {
    fn name(&self) -> &'static str { "AdditionalTableSeeder" }

    async fn run(&self, _db: &DatabaseConnection) -> Result<(), DbErr> {
        debug!(table = "organization_additionals", "no seed data defined");
        Ok(())
    }
}
