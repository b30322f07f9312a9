//! Concrete service per organization resource.

use std::sync::Arc;

use common::Translator;
use configs::AppConfig;
use models::common::{additional, business, contact, market, marketing, profile};
use models::organization;
use sea_orm::DatabaseConnection;
use tracing::info;

use crate::repository::SeaOrmRepository;
use crate::requests::{
    AdditionalRequest, BusinessRequest, ContactRequest, MarketRequest, MarketingRequest, OrganizationRequest, ProfileRequest,
};
use crate::service::{CrudService, ServiceConfig};

pub type OrganizationService = CrudService<SeaOrmRepository<organization::Entity, OrganizationRequest>>;
pub type ProfileService = CrudService<SeaOrmRepository<profile::Entity, ProfileRequest>>;
pub type BusinessService = CrudService<SeaOrmRepository<business::Entity, BusinessRequest>>;
pub type ContactService = CrudService<SeaOrmRepository<contact::Entity, ContactRequest>>;
pub type AdditionalService = CrudService<SeaOrmRepository<additional::Entity, AdditionalRequest>>;
pub type MarketService = CrudService<SeaOrmRepository<market::Entity, MarketRequest>>;
pub type MarketingService = CrudService<SeaOrmRepository<marketing::Entity, MarketingRequest>>;

/// Every organization service, sharing one pool, config and catalog.
pub struct OrganizationServices {
    pub organizations: OrganizationService,
    pub profiles: ProfileService,
    pub businesses: BusinessService,
    pub contacts: ContactService,
    pub additionals: AdditionalService,
    pub markets: MarketService,
    pub marketings: MarketingService,
}

impl OrganizationServices {
    pub fn new(db: DatabaseConnection, cfg: ServiceConfig, translator: Arc<Translator>) -> Self {
        Self {
            organizations: CrudService::new(Arc::new(SeaOrmRepository::new(db.clone())), cfg.clone(), Arc::clone(&translator)),
            profiles: CrudService::new(Arc::new(SeaOrmRepository::new(db.clone())), cfg.clone(), Arc::clone(&translator)),
            businesses: CrudService::new(Arc::new(SeaOrmRepository::new(db.clone())), cfg.clone(), Arc::clone(&translator)),
            contacts: CrudService::new(Arc::new(SeaOrmRepository::new(db.clone())), cfg.clone(), Arc::clone(&translator)),
            additionals: CrudService::new(Arc::new(SeaOrmRepository::new(db.clone())), cfg.clone(), Arc::clone(&translator)),
            markets: CrudService::new(Arc::new(SeaOrmRepository::new(db.clone())), cfg.clone(), Arc::clone(&translator)),
            marketings: CrudService::new(Arc::new(SeaOrmRepository::new(db)), cfg, translator),
        }
    }

    /// Build from application config, loading the `app.locale` catalog.
    pub fn from_config(db: DatabaseConnection, cfg: &AppConfig) -> anyhow::Result<Self> {
        let translator = Translator::load(&cfg.app.lang_dir, &cfg.app.locale)?;
        info!(locale = translator.locale(), items_per_page = cfg.organization.items_per_page, "organization_services_ready");
        Ok(Self::new(db, ServiceConfig::from(cfg), Arc::new(translator)))
    }
}
