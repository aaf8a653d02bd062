//! User account repository for async database operations.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

#[cfg(test)]
use mockall::automock;

use crate::db::AsyncDbPool;
use crate::error::{AppResult, StoreResult};
use crate::models::{AppUser, AppUserChangeset};
use crate::schema::app_users;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait AppUserRepository: Send + Sync {
    /// All users ordered by id
    async fn find_all(&self) -> AppResult<Vec<AppUser>>;

    async fn find_by_id(&self, id: i64) -> AppResult<Option<AppUser>>;

    async fn find_by_username(&self, username: &str) -> AppResult<Option<AppUser>>;

    async fn find_by_email(&self, email: &str) -> AppResult<Option<AppUser>>;

    async fn find_by_plan(&self, plan_id: i64) -> AppResult<Vec<AppUser>>;

    async fn find_by_user_role(&self, user_role_id: i64) -> AppResult<Vec<AppUser>>;

    /// Users ordered by points, then level (both descending), then id
    async fn leaderboard(&self) -> AppResult<Vec<AppUser>>;

    async fn insert(&self, changeset: AppUserChangeset) -> StoreResult<AppUser>;

    async fn update(&self, id: i64, changeset: AppUserChangeset) -> StoreResult<AppUser>;

    async fn delete(&self, id: i64) -> StoreResult<usize>;
}

#[derive(Clone)]
pub struct PgAppUserRepository {
    pool: AsyncDbPool,
}

impl PgAppUserRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AppUserRepository for PgAppUserRepository {
    async fn find_all(&self) -> AppResult<Vec<AppUser>> {
        let mut conn = self.pool.get().await?;

        Ok(app_users::table
            .order(app_users::id.asc())
            .select(AppUser::as_select())
            .load(&mut conn)
            .await?)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<AppUser>> {
        let mut conn = self.pool.get().await?;

        Ok(app_users::table
            .find(id)
            .select(AppUser::as_select())
            .first(&mut conn)
            .await
            .optional()?)
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<AppUser>> {
        let mut conn = self.pool.get().await?;

        Ok(app_users::table
            .filter(app_users::username.eq(username))
            .select(AppUser::as_select())
            .first(&mut conn)
            .await
            .optional()?)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<AppUser>> {
        let mut conn = self.pool.get().await?;

        Ok(app_users::table
            .filter(app_users::email.eq(email))
            .select(AppUser::as_select())
            .first(&mut conn)
            .await
            .optional()?)
    }

    async fn find_by_plan(&self, plan_id: i64) -> AppResult<Vec<AppUser>> {
        let mut conn = self.pool.get().await?;

        Ok(app_users::table
            .filter(app_users::plan_id.eq(plan_id))
            .order(app_users::id.asc())
            .select(AppUser::as_select())
            .load(&mut conn)
            .await?)
    }

    async fn find_by_user_role(&self, user_role_id: i64) -> AppResult<Vec<AppUser>> {
        let mut conn = self.pool.get().await?;

        Ok(app_users::table
            .filter(app_users::user_role_id.eq(user_role_id))
            .order(app_users::id.asc())
            .select(AppUser::as_select())
            .load(&mut conn)
            .await?)
    }

    async fn leaderboard(&self) -> AppResult<Vec<AppUser>> {
        let mut conn = self.pool.get().await?;

        Ok(app_users::table
            .order((
                app_users::points.desc(),
                app_users::level.desc(),
                app_users::id.asc(),
            ))
            .select(AppUser::as_select())
            .load(&mut conn)
            .await?)
    }

    async fn insert(&self, changeset: AppUserChangeset) -> StoreResult<AppUser> {
        let mut conn = self.pool.get().await?;

        Ok(diesel::insert_into(app_users::table)
            .values(&changeset)
            .returning(AppUser::as_returning())
            .get_result(&mut conn)
            .await?)
    }

    async fn update(&self, id: i64, changeset: AppUserChangeset) -> StoreResult<AppUser> {
        let mut conn = self.pool.get().await?;

        Ok(diesel::update(app_users::table.find(id))
            .set(&changeset)
            .returning(AppUser::as_returning())
            .get_result(&mut conn)
            .await?)
    }

    async fn delete(&self, id: i64) -> StoreResult<usize> {
        let mut conn = self.pool.get().await?;

        Ok(diesel::delete(app_users::table.find(id))
            .execute(&mut conn)
            .await?)
    }
}
