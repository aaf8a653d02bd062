use std::sync::Arc;

use crate::error::{AppResult, StoreResult};
use crate::models::{UserRole, UserRoleInput};
use crate::repositories::UserRoleRepository;

#[derive(Clone)]
pub struct UserRoleService {
    repo: Arc<dyn UserRoleRepository>,
}

impl UserRoleService {
    pub fn new(repo: Arc<dyn UserRoleRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> AppResult<Vec<UserRole>> {
        self.repo.find_all().await
    }

    pub async fn get(&self, id: i64) -> AppResult<Option<UserRole>> {
        self.repo.find_by_id(id).await
    }

    pub async fn insert(&self, input: UserRoleInput) -> StoreResult<UserRole> {
        self.repo.insert(input).await
    }

    /// Replaces the role's name; `None` when no role has this id.
    pub async fn update(&self, id: i64, input: UserRoleInput) -> StoreResult<Option<UserRole>> {
        if self.repo.find_by_id(id).await?.is_none() {
            return Ok(None);
        }
        self.repo.update(id, input).await.map(Some)
    }

    /// `false` when no role has this id.
    pub async fn delete(&self, id: i64) -> StoreResult<bool> {
        if self.repo.find_by_id(id).await?.is_none() {
            return Ok(false);
        }
        Ok(self.repo.delete(id).await? > 0)
    }
}
