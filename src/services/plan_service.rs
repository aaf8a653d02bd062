use std::sync::Arc;

use crate::error::{AppResult, StoreResult};
use crate::models::{Plan, PlanInput, PlanPatch};
use crate::repositories::PlanRepository;
use crate::services::{PatchOutcome, merge_patch};

#[derive(Clone)]
pub struct PlanService {
    repo: Arc<dyn PlanRepository>,
}

impl PlanService {
    pub fn new(repo: Arc<dyn PlanRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> AppResult<Vec<Plan>> {
        self.repo.find_all().await
    }

    pub async fn get(&self, id: i64) -> AppResult<Option<Plan>> {
        self.repo.find_by_id(id).await
    }

    pub async fn insert(&self, input: PlanInput) -> StoreResult<Plan> {
        self.repo.insert(input).await
    }

    pub async fn update(&self, id: i64, input: PlanInput) -> StoreResult<Option<Plan>> {
        if self.repo.find_by_id(id).await?.is_none() {
            return Ok(None);
        }
        self.repo.update(id, input).await.map(Some)
    }

    pub async fn patch(&self, id: i64, patch: PlanPatch) -> StoreResult<PatchOutcome<Plan>> {
        let Some(current) = self.repo.find_by_id(id).await? else {
            return Ok(PatchOutcome::NotFound);
        };

        match merge_patch(PlanInput::from(&current), patch) {
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
