use std::sync::Arc;

use common::Translator;
use configs::AppConfig;
use tracing::{info, instrument, warn};

use crate::errors::ServiceError;
use crate::exports::{Export, Exportable};
use crate::filters::Filters;
use crate::outcome::Outcome;
use crate::pagination::Page;
use crate::relations::{EagerRelation, Loaded};
use crate::repository::{Repository, UnitOfWork};

/// Settings fixed when a service is built.
#[derive(Clone, Debug)]
pub struct ServiceConfig {
    pub items_per_page: u64,
    pub datetime_format: String,
}

impl Default for ServiceConfig {
    fn default() -> Self { Self { items_per_page: 10, datetime_format: "%d %b %Y %I:%M %p".into() } }
}

impl From<&AppConfig> for ServiceConfig {
    fn from(cfg: &AppConfig) -> Self {
        Self { items_per_page: cfg.organization.items_per_page, datetime_format: cfg.app.datetime_format.clone() }
    }
}

/// CRUD service shared by every organization resource.
///
/// Mutations run inside a transaction opened through the repository and
/// never return `Err`: every path ends in an [`Outcome`].
pub struct CrudService<R: Repository> {
    repo: Arc<R>,
    cfg: ServiceConfig,
    translator: Arc<Translator>,
}

impl<R: Repository> CrudService<R> {
    pub fn new(repo: Arc<R>, cfg: ServiceConfig, translator: Arc<Translator>) -> Self { Self { repo, cfg, translator } }

    pub fn repository(&self) -> &Arc<R> { &self.repo }

    pub fn config(&self) -> &ServiceConfig { &self.cfg }

    #[instrument(skip(self, filters), fields(entity = self.repo.label()))]
    pub async fn get_all(&self, filters: &Filters, relations: &[EagerRelation]) -> Result<Vec<Loaded<R::Model>>, ServiceError> {
        self.repo.get_with(filters, relations).await
    }

    #[instrument(skip(self, filters), fields(entity = self.repo.label(), page = filters.page()))]
    pub async fn paginate(&self, filters: &Filters, relations: &[EagerRelation]) -> Result<Page<Loaded<R::Model>>, ServiceError> {
        self.repo.paginate_with(filters, relations, self.cfg.items_per_page).await
    }

    pub async fn get_by_id(&self, id: i32, purge: bool) -> Result<Option<R::Model>, ServiceError> {
        self.repo.show(id, purge).await
    }

    /// Create a row from `input`, recording `actor` as its creator.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use common::Translator;
    /// use service::repository::mock::MockRepository;
    /// use service::requests::OrganizationRequest;
    /// use service::service::{CrudService, ServiceConfig};
    ///
    /// let svc = CrudService::new(Arc::new(MockRepository::new()), ServiceConfig::default(), Arc::new(Translator::identity()));
    /// let input = OrganizationRequest { name: Some("Acme".into()), ..Default::default() };
    /// let outcome = tokio_test::block_on(svc.store(input, Some(1)));
    /// assert!(outcome.status);
    /// assert_eq!(outcome.message, "New Organization Created");
    /// ```
    #[instrument(skip(self, input), fields(entity = self.repo.label()))]
    pub async fn store(&self, input: R::Input, actor: Option<i32>) -> Outcome {
        let label = self.repo.label();
        let tx = match self.repo.begin().await {
            Ok(tx) => tx,
            Err(e) => return self.exception(e),
        };
        match self.repo.create(&tx, input, actor).await {
            Ok(_) => self.commit(tx, format!("New {label} Created")).await,
            Err(e) if e.is_expected() => self.rollback(tx, Outcome::failure(self.t(format!("New {label} Creation Failed")))).await,
            Err(e) => self.fail(tx, e).await,
        }
    }

    /// Partially update a live row. A missing or trashed row yields the
    /// not-found outcome.
    #[instrument(skip(self, input), fields(entity = self.repo.label()))]
    pub async fn update(&self, input: R::Input, id: i32, actor: Option<i32>) -> Outcome {
        let label = self.repo.label();
        let tx = match self.repo.begin().await {
            Ok(tx) => tx,
            Err(e) => return self.exception(e),
        };
        match self.repo.find_in(&tx, id).await {
            Ok(Some(_)) => {}
            Ok(None) | Err(ServiceError::NotFound(_)) => {
                return self.rollback(tx, Outcome::not_found(self.t(format!("{label} Model Not Found")))).await
            }
            Err(e) => return self.fail(tx, e).await,
        }
        match self.repo.update(&tx, id, input, actor).await {
            Ok(true) => self.commit(tx, format!("{label} Info Updated")).await,
            Ok(false) => self.rollback(tx, Outcome::failure(self.t(format!("{label} Info Update Failed")))).await,
            Err(e) if e.is_expected() => self.rollback(tx, Outcome::failure(self.t(format!("{label} Info Update Failed")))).await,
            Err(e) => self.fail(tx, e).await,
        }
    }

    /// Soft delete.
    #[instrument(skip(self), fields(entity = self.repo.label()))]
    pub async fn destroy(&self, id: i32, actor: Option<i32>) -> Outcome {
        let label = self.repo.label();
        let tx = match self.repo.begin().await {
            Ok(tx) => tx,
            Err(e) => return self.exception(e),
        };
        match self.repo.delete(&tx, id, actor).await {
            Ok(true) => self.commit(tx, format!("{label} is Trashed")).await,
            Ok(false) => self.rollback(tx, Outcome::failure(self.t(format!("{label} is Delete Failed")))).await,
            Err(e) if e.is_expected() => self.rollback(tx, Outcome::failure(self.t(format!("{label} is Delete Failed")))).await,
            Err(e) => self.fail(tx, e).await,
        }
    }

    #[instrument(skip(self), fields(entity = self.repo.label()))]
    pub async fn restore(&self, id: i32) -> Outcome {
        let label = self.repo.label();
        let tx = match self.repo.begin().await {
            Ok(tx) => tx,
            Err(e) => return self.exception(e),
        };
        match self.repo.restore(&tx, id).await {
            Ok(true) => self.commit(tx, format!("{label} is Restored")).await,
            Ok(false) => self.rollback(tx, Outcome::failure(self.t(format!("{label} is Restoration Failed")))).await,
            Err(e) if e.is_expected() => self.rollback(tx, Outcome::failure(self.t(format!("{label} is Restoration Failed")))).await,
            Err(e) => self.fail(tx, e).await,
        }
    }

    /// Filtered, unpaginated rows with their audit users and owner loaded.
    #[instrument(skip(self, filters), fields(entity = self.repo.label()))]
    pub async fn export(&self, filters: &Filters) -> Result<Export<R::Model>, ServiceError>
    where
        R::Model: Exportable,
    {
        let rows = self.repo.get_with(filters, &EagerRelation::ALL).await?;
        info!(entity = self.repo.label(), rows = rows.len(), "export_prepared");
        Ok(Export::new(rows, self.cfg.datetime_format.clone()))
    }

    fn t(&self, key: String) -> String { self.translator.translate(&key) }

    async fn commit(&self, tx: R::Tx, key: String) -> Outcome {
        match tx.commit().await {
            Ok(()) => {
                info!(entity = self.repo.label(), event = "committed", message = %key, "transaction_committed");
                Outcome::success(self.t(key))
            }
            Err(e) => self.exception(e),
        }
    }

    async fn rollback(&self, tx: R::Tx, outcome: Outcome) -> Outcome {
        if let Err(e) = tx.rollback().await {
            warn!(entity = self.repo.label(), error = %e, "rollback_failed");
        }
        info!(entity = self.repo.label(), event = "rolled_back", message = %outcome.message, "transaction_rolled_back");
        outcome
    }

    async fn fail(&self, tx: R::Tx, err: ServiceError) -> Outcome {
        self.repo.handle_exception(&err);
        self.rollback(tx, Outcome::exception(err.message())).await
    }

    fn exception(&self, err: ServiceError) -> Outcome {
        self.repo.handle_exception(&err);
        Outcome::exception(err.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::Trashed;
    use crate::outcome::{Level, ALERT, ERROR, NOTIFICATION};
    use crate::repository::mock::MockRepository;
    use crate::requests::OrganizationRequest;
    use models::{organization, user, Enabled};

    type Svc = CrudService<MockRepository>;

    fn svc_with(repo: MockRepository) -> Svc {
        CrudService::new(Arc::new(repo), ServiceConfig::default(), Arc::new(Translator::identity()))
    }

    fn named(name: &str) -> OrganizationRequest {
        OrganizationRequest { name: Some(name.into()), ..OrganizationRequest::default() }
    }

    async fn seeded(svc: &Svc, names: &[&str]) {
        for name in names {
            assert!(svc.store(named(name), Some(1)).await.status);
        }
    }

    #[tokio::test]
    async fn store_commits_and_reports_success() -> Result<(), anyhow::Error> {
        let svc = svc_with(MockRepository::new());
        let outcome = svc.store(named("Acme"), Some(1)).await;
        assert_eq!(outcome, Outcome::success("New Organization Created"));
        assert_eq!(outcome.title, NOTIFICATION);

        let rows = svc.repository().rows()?;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].created_by, Some(1));
        assert_eq!(rows[0].enabled, Enabled::Yes);
        Ok(())
    }

    #[tokio::test]
    async fn store_rejected_input_rolls_back() -> Result<(), anyhow::Error> {
        let svc = svc_with(MockRepository::new());
        let outcome = svc.store(OrganizationRequest::default(), None).await;
        assert!(!outcome.status);
        assert_eq!(outcome.message, "New Organization Creation Failed");
        assert_eq!((outcome.level, outcome.title.as_str()), (Level::Error, ALERT));
        assert!(svc.repository().rows()?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn write_failures_take_the_exception_path() -> Result<(), anyhow::Error> {
        let svc = svc_with(MockRepository::new());
        seeded(&svc, &["Acme"]).await;
        svc.repository().set_fail_writes(true);

        let outcome = svc.store(named("Globex"), None).await;
        assert!(!outcome.status);
        assert_eq!((outcome.level, outcome.title.as_str()), (Level::Warning, ERROR));
        assert_eq!(outcome.message, "simulated write failure");

        assert_eq!(svc.update(named("Initech"), 1, None).await.title, ERROR);
        assert_eq!(svc.destroy(1, None).await.title, ERROR);
        assert_eq!(svc.restore(1).await.title, ERROR);

        let rows = svc.repository().rows()?;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Acme");
        assert!(!rows[0].is_trashed());
        Ok(())
    }

    #[tokio::test]
    async fn update_changes_only_submitted_fields() -> Result<(), anyhow::Error> {
        let svc = svc_with(MockRepository::new());
        seeded(&svc, &["Acme"]).await;

        let input = OrganizationRequest { remarks: Some("Road runner supplies".into()), ..Default::default() };
        let outcome = svc.update(input, 1, Some(2)).await;
        assert_eq!(outcome, Outcome::success("Organization Info Updated"));

        let row = svc.get_by_id(1, false).await?.expect("row exists");
        assert_eq!(row.name, "Acme");
        assert_eq!(row.remarks.as_deref(), Some("Road runner supplies"));
        assert_eq!((row.created_by, row.updated_by), (Some(1), Some(2)));
        Ok(())
    }

    #[tokio::test]
    async fn update_missing_or_trashed_row_is_not_found() -> Result<(), anyhow::Error> {
        let svc = svc_with(MockRepository::new());
        seeded(&svc, &["Acme"]).await;

        let missing = svc.update(named("Ghost"), 42, None).await;
        assert_eq!(missing, Outcome::not_found("Organization Model Not Found"));
        assert_eq!((missing.level, missing.title.as_str()), (Level::Warning, ALERT));

        assert!(svc.destroy(1, None).await.status);
        let trashed = svc.update(named("Acme 2"), 1, None).await;
        assert_eq!(trashed.message, "Organization Model Not Found");
        assert_eq!(svc.get_by_id(1, true).await?.map(|m| m.name), Some("Acme".to_string()));
        Ok(())
    }

    #[tokio::test]
    async fn destroy_and_restore_round_trip() -> Result<(), anyhow::Error> {
        let svc = svc_with(MockRepository::new());
        seeded(&svc, &["Acme"]).await;

        assert_eq!(svc.destroy(1, Some(3)).await, Outcome::success("Organization is Trashed"));
        assert!(svc.get_by_id(1, false).await?.is_none());
        let trashed = svc.get_by_id(1, true).await?.expect("kept after soft delete");
        assert_eq!(trashed.deleted_by, Some(3));

        let again = svc.destroy(1, Some(3)).await;
        assert_eq!(again, Outcome::failure("Organization is Delete Failed"));

        assert_eq!(svc.restore(1).await, Outcome::success("Organization is Restored"));
        let restored = svc.get_by_id(1, false).await?.expect("visible again");
        assert!(restored.deleted_at.is_none());
        assert!(restored.deleted_by.is_none());

        assert_eq!(svc.restore(1).await, Outcome::failure("Organization is Restoration Failed"));
        assert_eq!(svc.destroy(99, None).await.message, "Organization is Delete Failed");
        Ok(())
    }

    #[tokio::test]
    async fn messages_go_through_the_catalog() {
        let catalog = r#"{"New Organization Created": "নতুন সংস্থা তৈরি হয়েছে"}"#;
        let translator = Translator::from_json_str("bn", catalog).expect("valid catalog");
        let svc = CrudService::new(Arc::new(MockRepository::new()), ServiceConfig::default(), Arc::new(translator));

        let outcome = svc.store(named("Acme"), None).await;
        assert_eq!(outcome.message, "নতুন সংস্থা তৈরি হয়েছে");
        assert_eq!(outcome.title, NOTIFICATION);
        assert_eq!(svc.restore(1).await.message, "Organization is Restoration Failed");
    }

    #[tokio::test]
    async fn paginate_uses_configured_page_size() -> Result<(), anyhow::Error> {
        let svc = svc_with(MockRepository::new());
        let names: Vec<String> = (1..=23).map(|i| format!("Org {i:02}")).collect();
        seeded(&svc, &names.iter().map(String::as_str).collect::<Vec<_>>()).await;

        let page = svc.paginate(&Filters { page: Some(3), ..Filters::default() }, &[]).await?;
        assert_eq!((page.total, page.per_page, page.current_page, page.last_page), (23, 10, 3, 3));
        assert_eq!(page.data.len(), 3);
        assert_eq!(page.data[0].item.name, "Org 21");

        let first = svc.paginate(&Filters { page: Some(0), ..Filters::default() }, &[]).await?;
        assert_eq!(first.current_page, 1);
        Ok(())
    }

    #[tokio::test]
    async fn get_all_applies_filters_and_relations() -> Result<(), anyhow::Error> {
        let repo = MockRepository::new();
        repo.add_user(user::Model { id: 1, name: "Admin".into(), email: "admin@example.com".into(), created_at: None, updated_at: None })?;
        let svc = svc_with(repo);
        seeded(&svc, &["Acme", "Acme West", "Globex"]).await;
        assert!(svc.destroy(2, Some(1)).await.status);

        let live = svc.get_all(&Filters { search: Some("Acme".into()), ..Filters::default() }, &[EagerRelation::CreatedBy]).await?;
        assert_eq!(live.len(), 1);
        assert_eq!(live[0].creator.as_ref().map(|u| u.name.as_str()), Some("Admin"));

        let only = Filters { trashed: Trashed::Only, ..Filters::default() };
        let trashed = svc.get_all(&only, &[EagerRelation::DeletedBy]).await?;
        assert_eq!(trashed.len(), 1);
        assert_eq!(trashed[0].item.name, "Acme West");
        assert_eq!(trashed[0].destroyer.as_ref().map(|u| u.id), Some(1));

        let sorted = svc
            .get_all(&Filters { sort: Some("name".into()), direction: crate::filters::Direction::Desc, trashed: Trashed::With, ..Filters::default() }, &[])
            .await?;
        let names: Vec<_> = sorted.iter().map(|r| r.item.name.as_str()).collect();
        assert_eq!(names, vec!["Globex", "Acme West", "Acme"]);
        Ok(())
    }

    #[tokio::test]
    async fn export_projects_filtered_rows() -> Result<(), anyhow::Error> {
        let seed = organization::Model {
            id: 5,
            name: "Acme".into(),
            remarks: Some("hq".into()),
            enabled: Enabled::No,
            created_by: None,
            updated_by: None,
            deleted_by: None,
            created_at: None,
            updated_at: None,
            deleted_at: None,
        };
        let svc = svc_with(MockRepository::with_rows([seed]));
        let export = svc.export(&Filters::default()).await?;
        assert_eq!(export.len(), 1);
        let rows = export.for_super_admin(true).rows();
        assert_eq!(rows[0].get("#"), Some("5"));
        assert_eq!(rows[0].get("Enabled"), Some("No"));
        assert_eq!(rows[0].get("Created By"), Some(""));

        assert!(svc.store(named("Globex"), None).await.status);
        assert_eq!(svc.get_by_id(6, false).await?.map(|m| m.id), Some(6));
        Ok(())
    }
}
