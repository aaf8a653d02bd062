//! Theme repository for async database operations.
//!
//! Theme names are matched ignoring case; uniqueness is enforced by the
//! `themes_name_lower_idx` index.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

#[cfg(test)]
use mockall::automock;

use crate::db::AsyncDbPool;
use crate::error::{AppResult, StoreResult};
use crate::models::{Theme, ThemeInput};
use crate::schema::themes;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait ThemeRepository: Send + Sync {
    async fn find_all(&self) -> AppResult<Vec<Theme>>;

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Theme>>;

    /// Case-insensitive exact match on the name
    async fn find_by_name(&self, name: &str) -> AppResult<Option<Theme>>;

    async fn insert(&self, input: ThemeInput) -> StoreResult<Theme>;

    async fn update(&self, id: i64, input: ThemeInput) -> StoreResult<Theme>;

    async fn delete(&self, id: i64) -> StoreResult<usize>;
}

/// Escapes `LIKE` wildcards so the pattern matches the literal name.
pub(crate) fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

#[derive(Clone)]
pub struct PgThemeRepository {
    pool: AsyncDbPool,
}

impl PgThemeRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ThemeRepository for PgThemeRepository {
    async fn find_all(&self) -> AppResult<Vec<Theme>> {
        let mut conn = self.pool.get().await?;

        Ok(themes::table
            .order(themes::id.asc())
            .select(Theme::as_select())
            .load(&mut conn)
            .await?)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Theme>> {
        let mut conn = self.pool.get().await?;

        Ok(themes::table
            .find(id)
            .select(Theme::as_select())
            .first(&mut conn)
            .await
            .optional()?)
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Theme>> {
        let mut conn = self.pool.get().await?;

        Ok(themes::table
            .filter(themes::name.ilike(escape_like(name)))
            .select(Theme::as_select())
            .first(&mut conn)
            .await
            .optional()?)
    }

    async fn insert(&self, input: ThemeInput) -> StoreResult<Theme> {
        let mut conn = self.pool.get().await?;

        Ok(diesel::insert_into(themes::table)
            .values(&input)
            .returning(Theme::as_returning())
            .get_result(&mut conn)
            .await?)
    }

    async fn update(&self, id: i64, input: ThemeInput) -> StoreResult<Theme> {
        let mut conn = self.pool.get().await?;

        Ok(diesel::update(themes::table.find(id))
            .set(&input)
            .returning(Theme::as_returning())
            .get_result(&mut conn)
            .await?)
    }

    async fn delete(&self, id: i64) -> StoreResult<usize> {
        let mut conn = self.pool.get().await?;

        Ok(diesel::delete(themes::table.find(id))
            .execute(&mut conn)
            .await?)
    }
}
