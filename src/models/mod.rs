mod app_user;
pub mod patch;
mod plan;
mod reference;
mod streak;
mod sudoku;
mod theme;
mod user_role;

pub use app_user::{AppUser, AppUserChangeset, AppUserInput, AppUserPatch, AppUserResponse};
pub use patch::Patch;
pub use plan::{Plan, PlanInput, PlanPatch};
pub use reference::EntityRef;
pub use streak::{Streak, StreakChangeset, StreakInput, StreakPatch, StreakResponse};
pub use sudoku::{Difficulty, GRID_SIZE, NewSudoku, Sudoku, SudokuDocument};
pub use theme::{Theme, ThemeInput, ThemePatch};
pub use user_role::{UserRole, UserRoleInput};
