use std::sync::Arc;

use crate::error::{AppResult, StoreResult};
use crate::models::{Theme, ThemeInput, ThemePatch};
use crate::repositories::ThemeRepository;
use crate::services::{PatchOutcome, merge_patch};

#[derive(Clone)]
pub struct ThemeService {
    repo: Arc<dyn ThemeRepository>,
}

impl ThemeService {
    pub fn new(repo: Arc<dyn ThemeRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> AppResult<Vec<Theme>> {
        self.repo.find_all().await
    }

    pub async fn get(&self, id: i64) -> AppResult<Option<Theme>> {
        self.repo.find_by_id(id).await
    }

    /// Lookup ignoring case
    pub async fn get_by_name(&self, name: &str) -> AppResult<Option<Theme>> {
        self.repo.find_by_name(name).await
    }

    pub async fn insert(&self, input: ThemeInput) -> StoreResult<Theme> {
        self.repo.insert(input).await
    }

    pub async fn update(&self, id: i64, input: ThemeInput) -> StoreResult<Option<Theme>> {
        if self.repo.find_by_id(id).await?.is_none() {
            return Ok(None);
        }
        self.repo.update(id, input).await.map(Some)
    }

    pub async fn patch(&self, id: i64, patch: ThemePatch) -> StoreResult<PatchOutcome<Theme>> {
        let Some(current) = self.repo.find_by_id(id).await? else {
            return Ok(PatchOutcome::NotFound);
        };

        match merge_patch(ThemeInput::from(&current), patch) {
            Ok(merged) => Ok(PatchOutcome::Saved(self.repo.update(id, merged).await?)),
            Err(errors) => Ok(PatchOutcome::Invalid(errors)),
        }
    }

    pub async fn delete(&self, id: i64) -> StoreResult<bool> {
        if self.repo.find_by_id(id).await?.is_none() {
            return Ok(false);
        }
        Ok(self.repo.delete(id).await? > 0)
    }
}
