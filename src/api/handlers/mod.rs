//! HTTP request handlers, one module per resource.

pub mod app_user;
pub mod health;
pub mod plan;
pub mod streak;
pub mod sudoku;
pub mod theme;
pub mod user_role;
