//! Streak repository for async database operations.

use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

#[cfg(test)]
use mockall::automock;

use crate::db::AsyncDbPool;
use crate::error::{AppResult, StoreResult};
use crate::models::{Streak, StreakChangeset};
use crate::schema::streaks;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait StreakRepository: Send + Sync {
    async fn find_all(&self) -> AppResult<Vec<Streak>>;

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Streak>>;

    async fn find_by_app_user(&self, app_user_id: i64) -> AppResult<Vec<Streak>>;

    /// Streaks whose initial date is strictly before `date`
    async fn find_by_initial_date_before(&self, date: NaiveDate) -> AppResult<Vec<Streak>>;

    async fn insert(&self, changeset: StreakChangeset) -> StoreResult<Streak>;

    async fn update(&self, id: i64, changeset: StreakChangeset) -> StoreResult<Streak>;

    async fn delete(&self, id: i64) -> StoreResult<usize>;
}

#[derive(Clone)]
pub struct PgStreakRepository {
    pool: AsyncDbPool,
}

impl PgStreakRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StreakRepository for PgStreakRepository {
    async fn find_all(&self) -> AppResult<Vec<Streak>> {
        let mut conn = self.pool.get().await?;

        Ok(streaks::table
            .order(streaks::id.asc())
            .select(Streak::as_select())
            .load(&mut conn)
            .await?)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Streak>> {
        let mut conn = self.pool.get().await?;

        Ok(streaks::table
            .find(id)
            .select(Streak::as_select())
            .first(&mut conn)
            .await
            .optional()?)
    }

    async fn find_by_app_user(&self, app_user_id: i64) -> AppResult<Vec<Streak>> {
        let mut conn = self.pool.get().await?;

        Ok(streaks::table
            .filter(streaks::app_user_id.eq(app_user_id))
            .order(streaks::id.asc())
            .select(Streak::as_select())
            .load(&mut conn)
            .await?)
    }

    async fn find_by_initial_date_before(&self, date: NaiveDate) -> AppResult<Vec<Streak>> {
        let mut conn = self.pool.get().await?;

        Ok(streaks::table
            .filter(streaks::initial_date.lt(date))
            .order(streaks::id.asc())
            .select(Streak::as_select())
            .load(&mut conn)
            .await?)
    }

    async fn insert(&self, changeset: StreakChangeset) -> StoreResult<Streak> {
        let mut conn = self.pool.get().await?;

        Ok(diesel::insert_into(streaks::table)
            .values(&changeset)
            .returning(Streak::as_returning())
            .get_result(&mut conn)
            .await?)
    }

    async fn update(&self, id: i64, changeset: StreakChangeset) -> StoreResult<Streak> {
        let mut conn = self.pool.get().await?;

        Ok(diesel::update(streaks::table.find(id))
            .set(&changeset)
            .returning(Streak::as_returning())
            .get_result(&mut conn)
            .await?)
    }

    async fn delete(&self, id: i64) -> StoreResult<usize> {
        let mut conn = self.pool.get().await?;

        Ok(diesel::delete(streaks::table.find(id))
            .execute(&mut conn)
            .await?)
    }
}
