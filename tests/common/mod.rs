//! In-memory repositories and request helpers for router tests.
//!
//! `MemoryStore` enforces the same unique and foreign key rules as the
//! PostgreSQL schema, reporting them as `StoreError` values.

#![allow(dead_code)]

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, Response, StatusCode};
use chrono::{NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;
use tower::ServiceExt;

use delfis_api::AppState;
use delfis_api::api::routes::create_router;
use delfis_api::error::{AppResult, StoreError, StoreResult};
use delfis_api::models::{
    AppUser, AppUserChangeset, NewSudoku, Plan, PlanInput, Streak, StreakChangeset, Sudoku,
    SudokuDocument, Theme, ThemeInput, UserRole, UserRoleInput,
};
use delfis_api::repositories::{
    AppUserRepository, PlanRepository, Repositories, StreakRepository, SudokuRepository,
    ThemeRepository, UserRoleRepository,
};
use delfis_api::services::Services;

#[derive(Default)]
pub struct Tables {
    next_id: i64,
    pub user_roles: Vec<UserRole>,
    pub plans: Vec<Plan>,
    pub app_users: Vec<AppUser>,
    pub themes: Vec<Theme>,
    pub streaks: Vec<Streak>,
    pub sudokus: Vec<Sudoku>,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

fn unique(field: &str, value: &str) -> StoreError {
    StoreError::UniqueViolation {
        field: field.to_string(),
        value: value.to_string(),
    }
}

fn reference(field: &str) -> StoreError {
    StoreError::ReferenceViolation {
        field: field.to_string(),
    }
}

impl MemoryStore {
    pub fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap()
    }

    fn check_user(tables: &Tables, id: Option<i64>, user: &AppUserChangeset) -> StoreResult<()> {
        let others = tables.app_users.iter().filter(|u| Some(u.id) != id);
        for other in others {
            if other.username == user.username {
                return Err(unique("username", &user.username));
            }
            if other.email == user.email {
                return Err(unique("email", &user.email));
            }
        }
        if let Some(plan_id) = user.plan_id {
            if !tables.plans.iter().any(|p| p.id == plan_id) {
                return Err(reference("plan_id"));
            }
        }
        if !tables.user_roles.iter().any(|r| r.id == user.user_role_id) {
            return Err(reference("user_role_id"));
        }
        Ok(())
    }

    fn check_streak(tables: &Tables, streak: &StreakChangeset) -> StoreResult<()> {
        if !tables.app_users.iter().any(|u| u.id == streak.app_user_id) {
            return Err(reference("app_user_id"));
        }
        Ok(())
    }
}

#[async_trait]
impl UserRoleRepository for MemoryStore {
    async fn find_all(&self) -> AppResult<Vec<UserRole>> {
        Ok(self.tables().user_roles.clone())
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<UserRole>> {
        Ok(self.tables().user_roles.iter().find(|r| r.id == id).cloned())
    }

    async fn insert(&self, input: UserRoleInput) -> StoreResult<UserRole> {
        let mut tables = self.tables();
        if tables.user_roles.iter().any(|r| r.name == input.name) {
            return Err(unique("name", &input.name));
        }
        let role = UserRole {
            id: tables.next_id(),
            name: input.name,
        };
        tables.user_roles.push(role.clone());
        Ok(role)
    }

    async fn update(&self, id: i64, input: UserRoleInput) -> StoreResult<UserRole> {
        let mut tables = self.tables();
        if tables.user_roles.iter().any(|r| r.id != id && r.name == input.name) {
            return Err(unique("name", &input.name));
        }
        let role = tables
            .user_roles
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| StoreError::Failure(delfis_api::error::AppError::not_found("role")))?;
        role.name = input.name;
        Ok(role.clone())
    }

    async fn delete(&self, id: i64) -> StoreResult<usize> {
        let mut tables = self.tables();
        if tables.app_users.iter().any(|u| u.user_role_id == id) {
            return Err(reference("user_role_id"));
        }
        let before = tables.user_roles.len();
        tables.user_roles.retain(|r| r.id != id);
        Ok(before - tables.user_roles.len())
    }
}

#[async_trait]
impl PlanRepository for MemoryStore {
    async fn find_all(&self) -> AppResult<Vec<Plan>> {
        Ok(self.tables().plans.clone())
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Plan>> {
        Ok(self.tables().plans.iter().find(|p| p.id == id).cloned())
    }

    async fn insert(&self, input: PlanInput) -> StoreResult<Plan> {
        let mut tables = self.tables();
        if tables.plans.iter().any(|p| p.name == input.name) {
            return Err(unique("name", &input.name));
        }
        let plan = Plan {
            id: tables.next_id(),
            name: input.name,
            description: input.description,
            price: input.price,
            is_active: input.is_active,
            created_at: now(),
        };
        tables.plans.push(plan.clone());
        Ok(plan)
    }

    async fn update(&self, id: i64, input: PlanInput) -> StoreResult<Plan> {
        let mut tables = self.tables();
        if tables.plans.iter().any(|p| p.id != id && p.name == input.name) {
            return Err(unique("name", &input.name));
        }
        let plan = tables
            .plans
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::Failure(delfis_api::error::AppError::not_found("plan")))?;
        plan.name = input.name;
        plan.description = input.description;
        plan.price = input.price;
        plan.is_active = input.is_active;
        Ok(plan.clone())
    }

    async fn delete(&self, id: i64) -> StoreResult<usize> {
        let mut tables = self.tables();
        if tables.app_users.iter().any(|u| u.plan_id == Some(id)) {
            return Err(reference("plan_id"));
        }
        let before = tables.plans.len();
        tables.plans.retain(|p| p.id != id);
        Ok(before - tables.plans.len())
    }
}

#[async_trait]
impl AppUserRepository for MemoryStore {
    async fn find_all(&self) -> AppResult<Vec<AppUser>> {
        Ok(self.tables().app_users.clone())
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<AppUser>> {
        Ok(self.tables().app_users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<AppUser>> {
        Ok(self
            .tables()
            .app_users
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<AppUser>> {
        Ok(self
            .tables()
            .app_users
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_plan(&self, plan_id: i64) -> AppResult<Vec<AppUser>> {
        Ok(self
            .tables()
            .app_users
            .iter()
            .filter(|u| u.plan_id == Some(plan_id))
            .cloned()
            .collect())
    }

    async fn find_by_user_role(&self, user_role_id: i64) -> AppResult<Vec<AppUser>> {
        Ok(self
            .tables()
            .app_users
            .iter()
            .filter(|u| u.user_role_id == user_role_id)
            .cloned()
            .collect())
    }

    async fn leaderboard(&self) -> AppResult<Vec<AppUser>> {
        let mut users = self.tables().app_users.clone();
        users.sort_by(|a, b| {
            b.points
                .cmp(&a.points)
                .then(b.level.cmp(&a.level))
                .then(a.id.cmp(&b.id))
        });
        Ok(users)
    }

    async fn insert(&self, changeset: AppUserChangeset) -> StoreResult<AppUser> {
        let mut tables = self.tables();
        Self::check_user(&tables, None, &changeset)?;
        let user = AppUser {
            id: tables.next_id(),
            name: changeset.name,
            username: changeset.username,
            email: changeset.email,
            password: changeset.password,
            level: changeset.level,
            points: changeset.points,
            coins: changeset.coins,
            birth_date: changeset.birth_date,
            picture_url: changeset.picture_url,
            plan_id: changeset.plan_id,
            user_role_id: changeset.user_role_id,
            created_at: now(),
            updated_at: changeset.updated_at,
        };
        tables.app_users.push(user.clone());
        Ok(user)
    }

    async fn update(&self, id: i64, changeset: AppUserChangeset) -> StoreResult<AppUser> {
        let mut tables = self.tables();
        Self::check_user(&tables, Some(id), &changeset)?;
        let user = tables
            .app_users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| StoreError::Failure(delfis_api::error::AppError::not_found("user")))?;
        user.name = changeset.name;
        user.username = changeset.username;
        user.email = changeset.email;
        user.password = changeset.password;
        user.level = changeset.level;
        user.points = changeset.points;
        user.coins = changeset.coins;
        user.birth_date = changeset.birth_date;
        user.picture_url = changeset.picture_url;
        user.plan_id = changeset.plan_id;
        user.user_role_id = changeset.user_role_id;
        user.updated_at = changeset.updated_at;
        Ok(user.clone())
    }

    async fn delete(&self, id: i64) -> StoreResult<usize> {
        let mut tables = self.tables();
        if tables.streaks.iter().any(|s| s.app_user_id == id) {
            return Err(reference("app_user_id"));
        }
        let before = tables.app_users.len();
        tables.app_users.retain(|u| u.id != id);
        Ok(before - tables.app_users.len())
    }
}

#[async_trait]
impl ThemeRepository for MemoryStore {
    async fn find_all(&self) -> AppResult<Vec<Theme>> {
        Ok(self.tables().themes.clone())
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Theme>> {
        Ok(self.tables().themes.iter().find(|t| t.id == id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Theme>> {
        Ok(self
            .tables()
            .themes
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
            .cloned())
    }

    async fn insert(&self, input: ThemeInput) -> StoreResult<Theme> {
        let mut tables = self.tables();
        if tables.themes.iter().any(|t| t.name.eq_ignore_ascii_case(&input.name)) {
            return Err(unique("name", &input.name));
        }
        let theme = Theme {
            id: tables.next_id(),
            name: input.name,
        };
        tables.themes.push(theme.clone());
        Ok(theme)
    }

    async fn update(&self, id: i64, input: ThemeInput) -> StoreResult<Theme> {
        let mut tables = self.tables();
        if tables
            .themes
            .iter()
            .any(|t| t.id != id && t.name.eq_ignore_ascii_case(&input.name))
        {
            return Err(unique("name", &input.name));
        }
        let theme = tables
            .themes
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| StoreError::Failure(delfis_api::error::AppError::not_found("theme")))?;
        theme.name = input.name;
        Ok(theme.clone())
    }

    async fn delete(&self, id: i64) -> StoreResult<usize> {
        let mut tables = self.tables();
        let before = tables.themes.len();
        tables.themes.retain(|t| t.id != id);
        Ok(before - tables.themes.len())
    }
}

#[async_trait]
impl StreakRepository for MemoryStore {
    async fn find_all(&self) -> AppResult<Vec<Streak>> {
        Ok(self.tables().streaks.clone())
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Streak>> {
        Ok(self.tables().streaks.iter().find(|s| s.id == id).cloned())
    }

    async fn find_by_app_user(&self, app_user_id: i64) -> AppResult<Vec<Streak>> {
        Ok(self
            .tables()
            .streaks
            .iter()
            .filter(|s| s.app_user_id == app_user_id)
            .cloned()
            .collect())
    }

    async fn find_by_initial_date_before(&self, date: NaiveDate) -> AppResult<Vec<Streak>> {
        Ok(self
            .tables()
            .streaks
            .iter()
            .filter(|s| s.initial_date < date)
            .cloned()
            .collect())
    }

    async fn insert(&self, changeset: StreakChangeset) -> StoreResult<Streak> {
        let mut tables = self.tables();
        Self::check_streak(&tables, &changeset)?;
        let streak = Streak {
            id: tables.next_id(),
            initial_date: changeset.initial_date,
            final_date: changeset.final_date,
            app_user_id: changeset.app_user_id,
        };
        tables.streaks.push(streak.clone());
        Ok(streak)
    }

    async fn update(&self, id: i64, changeset: StreakChangeset) -> StoreResult<Streak> {
        let mut tables = self.tables();
        Self::check_streak(&tables, &changeset)?;
        let streak = tables
            .streaks
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| StoreError::Failure(delfis_api::error::AppError::not_found("streak")))?;
        streak.initial_date = changeset.initial_date;
        streak.final_date = changeset.final_date;
        streak.app_user_id = changeset.app_user_id;
        Ok(streak.clone())
    }

    async fn delete(&self, id: i64) -> StoreResult<usize> {
        let mut tables = self.tables();
        let before = tables.streaks.len();
        tables.streaks.retain(|s| s.id != id);
        Ok(before - tables.streaks.len())
    }
}

#[async_trait]
impl SudokuRepository for MemoryStore {
    async fn find_all(&self) -> AppResult<Vec<Sudoku>> {
        Ok(self.tables().sudokus.clone())
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Sudoku>> {
        Ok(self.tables().sudokus.iter().find(|s| s.id == id).cloned())
    }

    async fn insert(&self, sudoku: NewSudoku) -> StoreResult<Sudoku> {
        let stored = Sudoku {
            id: sudoku.id,
            document: sudoku.document,
            created_at: now(),
        };
        self.tables().sudokus.push(stored.clone());
        Ok(stored)
    }

    async fn update(&self, id: &str, document: SudokuDocument) -> StoreResult<Sudoku> {
        let mut tables = self.tables();
        let sudoku = tables
            .sudokus
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| StoreError::Failure(delfis_api::error::AppError::not_found("sudoku")))?;
        sudoku.document = document;
        Ok(sudoku.clone())
    }

    async fn delete(&self, id: &str) -> StoreResult<usize> {
        let mut tables = self.tables();
        let before = tables.sudokus.len();
        tables.sudokus.retain(|s| s.id != id);
        Ok(before - tables.sudokus.len())
    }
}

/// Router over a fresh in-memory store, plus the store for assertions.
pub fn test_app() -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    let repos = Repositories {
        user_roles: store.clone(),
        plans: store.clone(),
        app_users: store.clone(),
        themes: store.clone(),
        streaks: store.clone(),
        sudokus: store.clone(),
    };
    let state = AppState::from_services(Services::new(repos));
    (create_router(state, Duration::from_secs(5)), store)
}

pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    app.clone().oneshot(request).await.unwrap()
}

pub async fn send_raw(app: &Router, method: &str, uri: &str, body: &str) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    app.clone().oneshot(request).await.unwrap()
}

/// Sends the request and returns the status with the decoded JSON body.
pub async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    read(send(app, method, uri, body).await).await
}

pub async fn read(response: Response<Body>) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}
