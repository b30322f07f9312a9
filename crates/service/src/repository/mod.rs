//! Data access seam of the CRUD services.
//!
//! `CrudService` is written against [`Repository`]; `SeaOrmRepository`
//! serves every organization table and `mock::MockRepository` keeps
//! organizations in memory for tests and examples.

use async_trait::async_trait;
use models::Lifecycle;
use sea_orm::DatabaseTransaction;
use serde::Serialize;
use tracing::error;

use crate::errors::ServiceError;
use crate::filters::Filters;
use crate::pagination::Page;
use crate::relations::{EagerRelation, Loaded};

pub mod mock;
pub mod seaorm;

pub use seaorm::SeaOrmRepository;

/// Transaction handle opened by [`Repository::begin`].
#[async_trait]
pub trait UnitOfWork: Send + Sync + Sized {
    async fn commit(self) -> Result<(), ServiceError>;
    async fn rollback(self) -> Result<(), ServiceError>;
}

#[async_trait]
impl UnitOfWork for DatabaseTransaction {
    async fn commit(self) -> Result<(), ServiceError> {
        DatabaseTransaction::commit(self).await.map_err(ServiceError::from)
    }

    async fn rollback(self) -> Result<(), ServiceError> {
        DatabaseTransaction::rollback(self).await.map_err(ServiceError::from)
    }
}

#[async_trait]
pub trait Repository: Send + Sync {
    type Model: Lifecycle + Clone + Serialize + Send + Sync + 'static;
    type Input: Send + 'static;
    type Tx: UnitOfWork;

    /// Entity label used in messages and log fields.
    fn label(&self) -> &'static str;

    async fn begin(&self) -> Result<Self::Tx, ServiceError>;

    async fn get_with(&self, filters: &Filters, relations: &[EagerRelation]) -> Result<Vec<Loaded<Self::Model>>, ServiceError>;

    async fn paginate_with(
        &self,
        filters: &Filters,
        relations: &[EagerRelation],
        per_page: u64,
    ) -> Result<Page<Loaded<Self::Model>>, ServiceError>;

    /// `purge` includes soft-deleted rows.
    async fn show(&self, id: i32, purge: bool) -> Result<Option<Self::Model>, ServiceError>;

    /// Non-deleted row as seen by `tx`.
    async fn find_in(&self, tx: &Self::Tx, id: i32) -> Result<Option<Self::Model>, ServiceError>;

    async fn create(&self, tx: &Self::Tx, input: Self::Input, actor: Option<i32>) -> Result<Self::Model, ServiceError>;

    /// Returns whether a non-deleted row was changed.
    async fn update(&self, tx: &Self::Tx, id: i32, input: Self::Input, actor: Option<i32>) -> Result<bool, ServiceError>;

    /// Soft delete. Returns whether a live row was trashed.
    async fn delete(&self, tx: &Self::Tx, id: i32, actor: Option<i32>) -> Result<bool, ServiceError>;

    /// Returns whether a trashed row was brought back.
    async fn restore(&self, tx: &Self::Tx, id: i32) -> Result<bool, ServiceError>;

    fn handle_exception(&self, err: &ServiceError) {
        error!(entity = self.label(), error = %err, event = "exception", "repository_exception");
    }
}
