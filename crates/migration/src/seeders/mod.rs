//! Database seeders.
//!
//! Seed data is kept out of migrations so schema changes stay reversible;
//! seeders run after `Migrator::up` and are expected to be idempotent.
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::DatabaseConnection;
use tracing::info;

mod additional;

pub use additional::AdditionalTableSeeder;

#[async_trait::async_trait]
pub trait Seeder: Send + Sync {
    fn name(&self) -> &'static str;

    async fn run(&self, db: &DatabaseConnection) -> Result<(), DbErr>;
}

/// Runs every registered seeder in order, stopping at the first failure.
pub struct DatabaseSeeder {
    seeders: Vec<Box<dyn Seeder>>,
}

impl Default for DatabaseSeeder {
    fn default() -> Self {
        Self { seeders: vec![Box::new(AdditionalTableSeeder)] }
    }
}

impl DatabaseSeeder {
    pub fn new(seeders: Vec<Box<dyn Seeder>>) -> Self { Self { seeders } }

    pub fn names(&self) -> Vec<&'static str> {
        self.seeders.iter().map(|s| s.name()).collect()
    }

    pub async fn run_all(&self, db: &DatabaseConnection) -> Result<usize, DbErr> {
        for seeder in &self.seeders {
            info!(seeder = seeder.name(), event = "seed_start", "running seeder");
            seeder.run(db).await?;
        }
        Ok(self.seeders.len())
    }
}
