//! Migrator registering the organization module tables in dependency order.
//! `users` comes first since every table carries audit keys to it; indexes
//! are applied last.
pub use sea_orm_migration::prelude::*;

pub mod lifecycle;
pub mod seeders;

mod m20211218_000001_create_users;
mod m20211218_000002_create_organizations;
mod m20211218_220022_create_organization_profiles;
mod m20211218_220042_create_organization_businesses;
mod m20211218_221336_create_organization_contacts;
mod m20211218_221400_create_organization_additionals;
mod m20211218_221410_create_organization_markets;
mod m20211218_221420_create_organization_marketings;
mod m20211218_230000_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20211218_000001_create_users::Migration),
            Box::new(m20211218_000002_create_organizations::Migration),
            Box::new(m20211218_220022_create_organization_profiles::Migration),
            Box::new(m20211218_220042_create_organization_businesses::Migration),
            Box::new(m20211218_221336_create_organization_contacts::Migration),
            Box::new(m20211218_221400_create_organization_additionals::Migration),
            Box::new(m20211218_221410_create_organization_markets::Migration),
            Box::new(m20211218_221420_create_organization_marketings::Migration),
            // Indexes should always be applied last
            Box::new(m20211218_230000_add_indexes::Migration),
        ]
    }
}
