//! In-memory organization repository.
//!
//! Writes go to a staged copy of the store held by the transaction and only
//! become visible on commit. `set_fail_writes` makes every write fail with a
//! database error so the exception path can be exercised.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use models::{organization, user, Enabled, Fillable, Resource};
use sea_orm::{IntoActiveModel, TryIntoModel};

use super::{Repository, UnitOfWork};
use crate::errors::ServiceError;
use crate::filters::{Direction, Filters};
use crate::pagination::{Page, Pagination};
use crate::relations::{attach, EagerRelation, Loaded};
use crate::requests::{FormRequest, OrganizationRequest};

#[derive(Clone, Debug, Default)]
struct Store {
    rows: BTreeMap<i32, organization::Model>,
    next_id: i32,
}

fn lock<T>(m: &Mutex<T>) -> Result<MutexGuard<'_, T>, ServiceError> {
    m.lock().map_err(|_| ServiceError::Db("mock store poisoned".into()))
}

pub struct MockTx {
    committed: Arc<Mutex<Store>>,
    staged: Mutex<Store>,
}

#[async_trait]
impl UnitOfWork for MockTx {
    async fn commit(self) -> Result<(), ServiceError> {
        let staged = self.staged.into_inner().map_err(|_| ServiceError::Db("mock store poisoned".into()))?;
        *lock(&self.committed)? = staged;
        Ok(())
    }

    async fn rollback(self) -> Result<(), ServiceError> { Ok(()) }
}

#[derive(Default)]
pub struct MockRepository {
    committed: Arc<Mutex<Store>>,
    users: Mutex<HashMap<i32, user::Model>>,
    fail_writes: AtomicBool,
}

impl MockRepository {
    pub fn new() -> Self { Self::default() }

    /// Seed committed rows; ids continue after the largest seeded id.
    pub fn with_rows(rows: impl IntoIterator<Item = organization::Model>) -> Self {
        let mut store = Store::default();
        for row in rows {
            store.next_id = store.next_id.max(row.id);
            store.rows.insert(row.id, row);
        }
        Self { committed: Arc::new(Mutex::new(store)), ..Self::default() }
    }

    pub fn add_user(&self, u: user::Model) -> Result<(), ServiceError> {
        lock(&self.users)?.insert(u.id, u);
        Ok(())
    }

    pub fn set_fail_writes(&self, fail: bool) { self.fail_writes.store(fail, Ordering::SeqCst); }

    /// Committed rows, soft-deleted ones included.
    pub fn rows(&self) -> Result<Vec<organization::Model>, ServiceError> {
        Ok(lock(&self.committed)?.rows.values().cloned().collect())
    }

    fn check_writable(&self) -> Result<(), ServiceError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(ServiceError::Db("simulated write failure".into()));
        }
        Ok(())
    }

    fn filtered(&self, filters: &Filters) -> Result<Vec<organization::Model>, ServiceError> {
        let store = lock(&self.committed)?;
        let mut rows: Vec<_> = store.rows.values().filter(|m| matches(m, filters)).cloned().collect();
        sort(&mut rows, filters);
        Ok(rows)
    }

    fn load(&self, rows: Vec<organization::Model>, relations: &[EagerRelation]) -> Result<Vec<Loaded<organization::Model>>, ServiceError> {
        let users = lock(&self.users)?;
        Ok(attach(rows, relations, &users, &HashMap::new()))
    }
}

fn matches(m: &organization::Model, f: &Filters) -> bool {
    if let Some(term) = f.search_term() {
        let hit = m.name.contains(term) || m.remarks.as_deref().is_some_and(|r| r.contains(term));
        if !hit {
            return false;
        }
    }
    if f.enabled.is_some_and(|e| e != m.enabled) {
        return false;
    }
    f.admits_trashed(m.is_trashed())
}

fn sort(rows: &mut [organization::Model], f: &Filters) {
    match f.sort.as_deref() {
        Some("name") => rows.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id))),
        Some("enabled") => rows.sort_by(|a, b| a.enabled.as_str().cmp(b.enabled.as_str()).then(a.id.cmp(&b.id))),
        Some("created_at") => rows.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id))),
        _ => rows.sort_by_key(|m| m.id),
    }
    if f.direction == Direction::Desc {
        rows.reverse();
    }
}

fn blank(id: i32) -> organization::Model {
    organization::Model {
        id,
        name: String::new(),
        remarks: None,
        enabled: Enabled::Yes,
        created_by: None,
        updated_by: None,
        deleted_by: None,
        created_at: None,
        updated_at: None,
        deleted_at: None,
    }
}

#[async_trait]
impl Repository for MockRepository {
    type Model = organization::Model;
    type Input = OrganizationRequest;
    type Tx = MockTx;

    fn label(&self) -> &'static str { organization::Entity::LABEL }

    async fn begin(&self) -> Result<MockTx, ServiceError> {
        let snapshot = lock(&self.committed)?.clone();
        Ok(MockTx { committed: Arc::clone(&self.committed), staged: Mutex::new(snapshot) })
    }

    async fn get_with(&self, filters: &Filters, relations: &[EagerRelation]) -> Result<Vec<Loaded<organization::Model>>, ServiceError> {
        let rows = self.filtered(filters)?;
        self.load(rows, relations)
    }

    async fn paginate_with(
        &self,
        filters: &Filters,
        relations: &[EagerRelation],
        per_page: u64,
    ) -> Result<Page<Loaded<organization::Model>>, ServiceError> {
        let (idx, per) = Pagination::sized(filters.page(), per_page).normalize();
        let rows = self.filtered(filters)?;
        let total = rows.len() as u64;
        let skip = usize::try_from(idx * per).unwrap_or(usize::MAX);
        let window = rows.into_iter().skip(skip).take(per as usize).collect();
        Ok(Page::new(self.load(window, relations)?, total, idx, per))
    }

    async fn show(&self, id: i32, purge: bool) -> Result<Option<organization::Model>, ServiceError> {
        let store = lock(&self.committed)?;
        Ok(store.rows.get(&id).filter(|m| purge || !m.is_trashed()).cloned())
    }

    async fn find_in(&self, tx: &MockTx, id: i32) -> Result<Option<organization::Model>, ServiceError> {
        let store = lock(&tx.staged)?;
        Ok(store.rows.get(&id).filter(|m| !m.is_trashed()).cloned())
    }

    async fn create(&self, tx: &MockTx, input: OrganizationRequest, actor: Option<i32>) -> Result<organization::Model, ServiceError> {
        self.check_writable()?;
        input.validate()?;
        let mut store = lock(&tx.staged)?;
        let mut am = blank(store.next_id + 1).into_active_model();
        input.fill(&mut am);
        organization::Entity::stamp_created(&mut am, Utc::now().into(), actor);
        let model = am.try_into_model()?;
        store.next_id = model.id;
        store.rows.insert(model.id, model.clone());
        Ok(model)
    }

    async fn update(&self, tx: &MockTx, id: i32, input: OrganizationRequest, actor: Option<i32>) -> Result<bool, ServiceError> {
        self.check_writable()?;
        input.validate_submitted()?;
        let mut store = lock(&tx.staged)?;
        let Some(current) = store.rows.get(&id).filter(|m| !m.is_trashed()).cloned() else {
            return Ok(false);
        };
        let mut am = current.into_active_model();
        input.fill(&mut am);
        organization::Entity::stamp_updated(&mut am, Utc::now().into(), actor);
        store.rows.insert(id, am.try_into_model()?);
        Ok(true)
    }

    async fn delete(&self, tx: &MockTx, id: i32, actor: Option<i32>) -> Result<bool, ServiceError> {
        self.check_writable()?;
        let mut store = lock(&tx.staged)?;
        match store.rows.get_mut(&id) {
            Some(row) if !row.is_trashed() => {
                row.deleted_at = Some(Utc::now().into());
                row.deleted_by = actor;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn restore(&self, tx: &MockTx, id: i32) -> Result<bool, ServiceError> {
        self.check_writable()?;
        let mut store = lock(&tx.staged)?;
        match store.rows.get_mut(&id) {
            Some(row) if row.is_trashed() => {
                row.deleted_at = None;
                row.deleted_by = None;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str) -> OrganizationRequest {
        OrganizationRequest { name: Some(name.into()), ..OrganizationRequest::default() }
    }

    #[tokio::test]
    async fn staged_writes_are_invisible_until_commit() -> Result<(), anyhow::Error> {
        let repo = MockRepository::new();
        let tx = repo.begin().await?;
        let created = repo.create(&tx, request("Acme"), Some(1)).await?;
        assert_eq!(created.id, 1);
        assert!(repo.show(created.id, true).await?.is_none());
        assert!(repo.find_in(&tx, created.id).await?.is_some());

        tx.commit().await?;
        let found = repo.show(created.id, false).await?.expect("committed");
        assert_eq!(found.created_by, Some(1));
        Ok(())
    }

    #[tokio::test]
    async fn rollback_discards_staged_rows() -> Result<(), anyhow::Error> {
        let repo = MockRepository::new();
        let tx = repo.begin().await?;
        repo.create(&tx, request("Acme"), None).await?;
        tx.rollback().await?;
        assert!(repo.rows()?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn blank_name_is_rejected() -> Result<(), anyhow::Error> {
        let repo = MockRepository::new();
        let tx = repo.begin().await?;
        let err = repo.create(&tx, OrganizationRequest::default(), None).await.unwrap_err();
        assert!(err.is_expected());
        assert!(err.to_string().contains("The name field is required."));
        Ok(())
    }

    #[tokio::test]
    async fn failure_injection_hits_every_write() -> Result<(), anyhow::Error> {
        let repo = MockRepository::with_rows([blank(3)]);
        repo.set_fail_writes(true);
        let tx = repo.begin().await?;
        assert!(repo.create(&tx, request("Acme"), None).await.is_err());
        assert!(repo.delete(&tx, 3, None).await.is_err());
        assert!(!repo.restore(&tx, 3).await.unwrap_err().is_expected());
        Ok(())
    }
}
