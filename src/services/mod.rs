//! Service layer for business logic operations.
//!
//! Services wrap their repository: reads return `Option`/`Vec` and leave
//! the 404 decision to the handlers, writes return `StoreResult` so the
//! handlers can phrase constraint conflicts. The partial-update flow lives
//! here.

mod app_user_service;
mod plan_service;
mod streak_service;
mod sudoku_service;
mod theme_service;
mod user_role_service;

pub use app_user_service::AppUserService;
pub use plan_service::PlanService;
pub use streak_service::StreakService;
pub use sudoku_service::SudokuService;
pub use theme_service::ThemeService;
pub use user_role_service::UserRoleService;

use validator::Validate;

use crate::error::FieldErrors;
use crate::models::Patch;
use crate::repositories::Repositories;
use crate::utils::verify_fields;

/// Result of a partial update.
#[derive(Debug, PartialEq)]
pub enum PatchOutcome<T> {
    /// No entity with the given id
    NotFound,
    /// The merged entity violates constraints on touched fields; nothing was saved
    Invalid(FieldErrors),
    Saved(T),
}

/// Merges `patch` onto `target` and re-validates the touched fields.
///
/// Null violations reported by the merge take precedence over constraint
/// messages for the same field.
pub(crate) fn merge_patch<I, P>(mut target: I, patch: P) -> Result<I, FieldErrors>
where
    I: Validate,
    P: Patch<I>,
{
    let touched = patch.touched_fields();
    let mut errors = patch.apply(&mut target);
    for (field, message) in verify_fields(&target, &touched) {
        errors.entry(field).or_insert(message);
    }

    if errors.is_empty() {
        Ok(target)
    } else {
        Err(errors)
    }
}

/// Aggregates all services for convenient access.
///
/// This struct is designed to be used as Axum application state.
/// Cloning only bumps reference counts.
#[derive(Clone)]
pub struct Services {
    pub user_roles: UserRoleService,
    pub plans: PlanService,
    pub app_users: AppUserService,
    pub themes: ThemeService,
    pub streaks: StreakService,
    pub sudokus: SudokuService,
}

impl Services {
    /// Creates a new Services instance from Repositories.
    pub fn new(repos: Repositories) -> Self {
        Self {
            user_roles: UserRoleService::new(repos.user_roles),
            plans: PlanService::new(repos.plans),
            app_users: AppUserService::new(repos.app_users),
            themes: ThemeService::new(repos.themes),
            streaks: StreakService::new(repos.streaks),
            sudokus: SudokuService::new(repos.sudokus),
        }
    }
}
