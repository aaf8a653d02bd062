//! Role repository for async database operations.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

#[cfg(test)]
use mockall::automock;

use crate::db::AsyncDbPool;
use crate::error::{AppResult, StoreResult};
use crate::models::{UserRole, UserRoleInput};
use crate::schema::user_roles;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRoleRepository: Send + Sync {
    /// All roles ordered by id
    async fn find_all(&self) -> AppResult<Vec<UserRole>>;

    async fn find_by_id(&self, id: i64) -> AppResult<Option<UserRole>>;

    async fn insert(&self, input: UserRoleInput) -> StoreResult<UserRole>;

    async fn update(&self, id: i64, input: UserRoleInput) -> StoreResult<UserRole>;

    /// Returns the number of deleted rows (0 or 1)
    async fn delete(&self, id: i64) -> StoreResult<usize>;
}

/// PostgreSQL implementation of [`UserRoleRepository`].
///
/// `AsyncDbPool` is an `Arc` internally, so cloning is cheap.
#[derive(Clone)]
pub struct PgUserRoleRepository {
    pool: AsyncDbPool,
}

impl PgUserRoleRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRoleRepository for PgUserRoleRepository {
    async fn find_all(&self) -> AppResult<Vec<UserRole>> {
        let mut conn = self.pool.get().await?;

        Ok(user_roles::table
            .order(user_roles::id.asc())
            .select(UserRole::as_select())
            .load(&mut conn)
            .await?)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<UserRole>> {
        let mut conn = self.pool.get().await?;

        Ok(user_roles::table
            .find(id)
            .select(UserRole::as_select())
            .first(&mut conn)
            .await
            .optional()?)
    }

    async fn insert(&self, input: UserRoleInput) -> StoreResult<UserRole> {
        let mut conn = self.pool.get().await?;

        Ok(diesel::insert_into(user_roles::table)
            .values(&input)
            .returning(UserRole::as_returning())
            .get_result(&mut conn)
            .await?)
    }

    async fn update(&self, id: i64, input: UserRoleInput) -> StoreResult<UserRole> {
        let mut conn = self.pool.get().await?;

        Ok(diesel::update(user_roles::table.find(id))
            .set(&input)
            .returning(UserRole::as_returning())
            .get_result(&mut conn)
            .await?)
    }

    async fn delete(&self, id: i64) -> StoreResult<usize> {
        let mut conn = self.pool.get().await?;

        Ok(diesel::delete(user_roles::table.find(id))
            .execute(&mut conn)
            .await?)
    }
}
