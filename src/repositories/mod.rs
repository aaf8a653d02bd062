//! Repository layer for data access operations.
//!
//! Each entity has an async repository trait and a PostgreSQL
//! implementation over the shared connection pool. Reads return
//! `AppResult`; writes return `StoreResult` so constraint violations reach
//! the handlers as typed values.

mod app_user_repo;
mod plan_repo;
mod streak_repo;
mod sudoku_repo;
mod theme_repo;
mod user_role_repo;

use std::sync::Arc;

pub use app_user_repo::{AppUserRepository, PgAppUserRepository};
pub use plan_repo::{PgPlanRepository, PlanRepository};
pub use streak_repo::{PgStreakRepository, StreakRepository};
pub use sudoku_repo::{PgSudokuRepository, SudokuRepository};
pub use theme_repo::{PgThemeRepository, ThemeRepository};
pub use user_role_repo::{PgUserRoleRepository, UserRoleRepository};

#[cfg(test)]
pub use app_user_repo::MockAppUserRepository;
#[cfg(test)]
pub use plan_repo::MockPlanRepository;
#[cfg(test)]
pub use streak_repo::MockStreakRepository;
#[cfg(test)]
pub use sudoku_repo::MockSudokuRepository;
#[cfg(test)]
pub use theme_repo::MockThemeRepository;
#[cfg(test)]
pub use user_role_repo::MockUserRoleRepository;

pub use crate::error::{StoreError, StoreResult};

use crate::db::AsyncDbPool;

/// Aggregates all repositories for convenient access.
///
/// Cloning only bumps reference counts.
#[derive(Clone)]
pub struct Repositories {
    pub user_roles: Arc<dyn UserRoleRepository>,
    pub plans: Arc<dyn PlanRepository>,
    pub app_users: Arc<dyn AppUserRepository>,
    pub themes: Arc<dyn ThemeRepository>,
    pub streaks: Arc<dyn StreakRepository>,
    pub sudokus: Arc<dyn SudokuRepository>,
}

impl Repositories {
    /// Creates PostgreSQL-backed repositories sharing one pool.
    pub fn new(pool: AsyncDbPool) -> Self {
        Self {
            user_roles: Arc::new(PgUserRoleRepository::new(pool.clone())),
            plans: Arc::new(PgPlanRepository::new(pool.clone())),
            app_users: Arc::new(PgAppUserRepository::new(pool.clone())),
            themes: Arc::new(PgThemeRepository::new(pool.clone())),
            streaks: Arc::new(PgStreakRepository::new(pool.clone())),
            sudokus: Arc::new(PgSudokuRepository::new(pool)),
        }
    }
}
