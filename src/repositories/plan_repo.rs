//! Plan repository for async database operations.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

#[cfg(test)]
use mockall::automock;

use crate::db::AsyncDbPool;
use crate::error::{AppResult, StoreResult};
use crate::models::{Plan, PlanInput};
use crate::schema::plans;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait PlanRepository: Send + Sync {
    /// All plans ordered by id
    async fn find_all(&self) -> AppResult<Vec<Plan>>;

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Plan>>;

    async fn insert(&self, input: PlanInput) -> StoreResult<Plan>;

    async fn update(&self, id: i64, input: PlanInput) -> StoreResult<Plan>;

    async fn delete(&self, id: i64) -> StoreResult<usize>;
}

#[derive(Clone)]
pub struct PgPlanRepository {
    pool: AsyncDbPool,
}

impl PgPlanRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlanRepository for PgPlanRepository {
    async fn find_all(&self) -> AppResult<Vec<Plan>> {
        let mut conn = self.pool.get().await?;

        Ok(plans::table
            .order(plans::id.asc())
            .select(Plan::as_select())
            .load(&mut conn)
            .await?)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Plan>> {
        let mut conn = self.pool.get().await?;

        Ok(plans::table
            .find(id)
            .select(Plan::as_select())
            .first(&mut conn)
            .await
            .optional()?)
    }

    async fn insert(&self, input: PlanInput) -> StoreResult<Plan> {
        let mut conn = self.pool.get().await?;

        Ok(diesel::insert_into(plans::table)
            .values(&input)
            .returning(Plan::as_returning())
            .get_result(&mut conn)
            .await?)
    }

    async fn update(&self, id: i64, input: PlanInput) -> StoreResult<Plan> {
        let mut conn = self.pool.get().await?;

        Ok(diesel::update(plans::table.find(id))
            .set(&input)
            .returning(Plan::as_returning())
            .get_result(&mut conn)
            .await?)
    }

    async fn delete(&self, id: i64) -> StoreResult<usize> {
        let mut conn = self.pool.get().await?;

        Ok(diesel::delete(plans::table.find(id))
            .execute(&mut conn)
            .await?)
    }
}
