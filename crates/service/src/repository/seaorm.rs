use std::marker::PhantomData;

use async_trait::async_trait;
use chrono::Utc;
use models::{Fillable, Lifecycle, Resource};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction,
    IntoActiveModel, PaginatorTrait, QueryFilter, TransactionTrait,
};
use serde::Serialize;
use tracing::debug;

use super::Repository;
use crate::errors::ServiceError;
use crate::filters::{self, Filters};
use crate::pagination::{Page, Pagination};
use crate::relations::{self, EagerRelation, Loaded};
use crate::requests::FormRequest;

/// SeaORM-backed repository for any organization table `E`, filled from
/// request type `I`.
pub struct SeaOrmRepository<E, I> {
    pub db: DatabaseConnection,
    _marker: PhantomData<fn() -> (E, I)>,
}

impl<E, I> SeaOrmRepository<E, I> {
    pub fn new(db: DatabaseConnection) -> Self { Self { db, _marker: PhantomData } }
}

impl<E, I> Clone for SeaOrmRepository<E, I> {
    fn clone(&self) -> Self { Self::new(self.db.clone()) }
}

fn now() -> DateTimeWithTimeZone { Utc::now().into() }

async fn find_live<E, C>(db: &C, id: i32) -> Result<Option<E::Model>, ServiceError>
where
    E: Resource,
    C: ConnectionTrait,
{
    let row = E::find()
        .filter(E::id_column().eq(id))
        .filter(E::deleted_at_column().is_null())
        .one(db)
        .await?;
    Ok(row)
}

#[async_trait]
impl<E, I> Repository for SeaOrmRepository<E, I>
where
    E: Resource,
    E::Model: Lifecycle + IntoActiveModel<E::ActiveModel> + Serialize + Clone + Sync,
    E::ActiveModel: Send + Sync,
    I: Fillable<E::ActiveModel> + FormRequest + Send + 'static,
{
    type Model = E::Model;
    type Input = I;
    type Tx = DatabaseTransaction;

    fn label(&self) -> &'static str { E::LABEL }

    async fn begin(&self) -> Result<DatabaseTransaction, ServiceError> {
        Ok(self.db.begin().await?)
    }

    async fn get_with(&self, filters: &Filters, relations: &[EagerRelation]) -> Result<Vec<Loaded<E::Model>>, ServiceError> {
        let rows = filters::apply(E::find(), filters).all(&self.db).await?;
        relations::load(&self.db, rows, relations).await
    }

    async fn paginate_with(
        &self,
        filters: &Filters,
        relations: &[EagerRelation],
        per_page: u64,
    ) -> Result<Page<Loaded<E::Model>>, ServiceError> {
        let (idx, per) = Pagination::sized(filters.page(), per_page).normalize();
        let paginator = filters::apply(E::find(), filters).paginate(&self.db, per);
        let total = paginator.num_items().await?;
        let rows = paginator.fetch_page(idx).await?;
        let data = relations::load(&self.db, rows, relations).await?;
        Ok(Page::new(data, total, idx, per))
    }

    async fn show(&self, id: i32, purge: bool) -> Result<Option<E::Model>, ServiceError> {
        if !purge {
            return find_live::<E, _>(&self.db, id).await;
        }
        Ok(E::find().filter(E::id_column().eq(id)).one(&self.db).await?)
    }

    async fn find_in(&self, tx: &DatabaseTransaction, id: i32) -> Result<Option<E::Model>, ServiceError> {
        find_live::<E, _>(tx, id).await
    }

    async fn create(&self, tx: &DatabaseTransaction, input: I, actor: Option<i32>) -> Result<E::Model, ServiceError> {
        input.validate()?;
        let mut am = <E::ActiveModel as ActiveModelBehavior>::new();
        input.fill(&mut am);
        E::stamp_created(&mut am, now(), actor);
        let model = am.insert(tx).await?;
        debug!(entity = E::LABEL, id = model.key(), "row_inserted");
        Ok(model)
    }

    async fn update(&self, tx: &DatabaseTransaction, id: i32, input: I, actor: Option<i32>) -> Result<bool, ServiceError> {
        input.validate_submitted()?;
        let mut am = <E::ActiveModel as ActiveModelTrait>::default();
        input.fill(&mut am);
        E::stamp_updated(&mut am, now(), actor);
        let res = E::update_many()
            .set(am)
            .filter(E::id_column().eq(id))
            .filter(E::deleted_at_column().is_null())
            .exec(tx)
            .await?;
        Ok(res.rows_affected > 0)
    }

    async fn delete(&self, tx: &DatabaseTransaction, id: i32, actor: Option<i32>) -> Result<bool, ServiceError> {
        let res = E::update_many()
            .col_expr(E::deleted_at_column(), Expr::value(Some(now())))
            .col_expr(E::deleted_by_column(), Expr::value(actor))
            .filter(E::id_column().eq(id))
            .filter(E::deleted_at_column().is_null())
            .exec(tx)
            .await?;
        Ok(res.rows_affected > 0)
    }

    async fn restore(&self, tx: &DatabaseTransaction, id: i32) -> Result<bool, ServiceError> {
        let res = E::update_many()
            .col_expr(E::deleted_at_column(), Expr::value(Option::<DateTimeWithTimeZone>::None))
            .col_expr(E::deleted_by_column(), Expr::value(Option::<i32>::None))
            .filter(E::id_column().eq(id))
            .filter(E::deleted_at_column().is_not_null())
            .exec(tx)
            .await?;
        Ok(res.rows_affected > 0)
    }
}
