//! Sudoku document repository.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

#[cfg(test)]
use mockall::automock;

use crate::db::AsyncDbPool;
use crate::error::{AppResult, StoreResult};
use crate::models::{NewSudoku, Sudoku, SudokuDocument};
use crate::schema::sudokus;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait SudokuRepository: Send + Sync {
    /// All documents, oldest first
    async fn find_all(&self) -> AppResult<Vec<Sudoku>>;

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Sudoku>>;

    async fn insert(&self, sudoku: NewSudoku) -> StoreResult<Sudoku>;

    /// Replaces the stored document; id and creation time are kept.
    async fn update(&self, id: &str, document: SudokuDocument) -> StoreResult<Sudoku>;

    async fn delete(&self, id: &str) -> StoreResult<usize>;
}

#[derive(Clone)]
pub struct PgSudokuRepository {
    pool: AsyncDbPool,
}

impl PgSudokuRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SudokuRepository for PgSudokuRepository {
    async fn find_all(&self) -> AppResult<Vec<Sudoku>> {
        let mut conn = self.pool.get().await?;

        Ok(sudokus::table
            .order((sudokus::created_at.asc(), sudokus::id.asc()))
            .select(Sudoku::as_select())
            .load(&mut conn)
            .await?)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Sudoku>> {
        let mut conn = self.pool.get().await?;

        Ok(sudokus::table
            .find(id)
            .select(Sudoku::as_select())
            .first(&mut conn)
            .await
            .optional()?)
    }

    async fn insert(&self, sudoku: NewSudoku) -> StoreResult<Sudoku> {
        let mut conn = self.pool.get().await?;

        Ok(diesel::insert_into(sudokus::table)
            .values(&sudoku)
            .returning(Sudoku::as_returning())
            .get_result(&mut conn)
            .await?)
    }

    async fn update(&self, id: &str, document: SudokuDocument) -> StoreResult<Sudoku> {
        let mut conn = self.pool.get().await?;

        Ok(diesel::update(sudokus::table.find(id))
            .set(sudokus::document.eq(document))
            .returning(Sudoku::as_returning())
            .get_result(&mut conn)
            .await?)
    }

    async fn delete(&self, id: &str) -> StoreResult<usize> {
        let mut conn = self.pool.get().await?;

        Ok(diesel::delete(sudokus::table.find(id))
            .execute(&mut conn)
            .await?)
    }
}
