use std::sync::Arc;

use chrono::NaiveDate;

use crate::error::{AppResult, StoreResult};
use crate::models::{Streak, StreakChangeset, StreakInput, StreakPatch};
use crate::repositories::StreakRepository;
use crate::services::{PatchOutcome, merge_patch};

#[derive(Clone)]
pub struct StreakService {
    repo: Arc<dyn StreakRepository>,
}

impl StreakService {
    pub fn new(repo: Arc<dyn StreakRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> AppResult<Vec<Streak>> {
        self.repo.find_all().await
    }

    pub async fn get(&self, id: i64) -> AppResult<Option<Streak>> {
        self.repo.find_by_id(id).await
    }

    pub async fn list_by_app_user(&self, app_user_id: i64) -> AppResult<Vec<Streak>> {
        self.repo.find_by_app_user(app_user_id).await
    }

    /// Streaks that started strictly before `date`
    pub async fn list_started_before(&self, date: NaiveDate) -> AppResult<Vec<Streak>> {
        self.repo.find_by_initial_date_before(date).await
    }

    pub async fn insert(&self, input: StreakInput) -> StoreResult<Streak> {
        self.repo.insert(StreakChangeset::from(input)).await
    }

    pub async fn update(&self, id: i64, input: StreakInput) -> StoreResult<Option<Streak>> {
        if self.repo.find_by_id(id).await?.is_none() {
            return Ok(None);
        }
        self.repo
            .update(id, StreakChangeset::from(input))
            .await
            .map(Some)
    }

    pub async fn patch(&self, id: i64, patch: StreakPatch) -> StoreResult<PatchOutcome<Streak>> {
        let Some(current) = self.repo.find_by_id(id).await? else {
            return Ok(PatchOutcome::NotFound);
        };

        match merge_patch(StreakInput::from(&current), patch) {
            Ok(merged) => Ok(PatchOutcome::Saved(
                self.repo.update(id, StreakChangeset::from(merged)).await?,
            )),
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

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::eq;

    use crate::repositories::MockStreakRepository;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn streak() -> Streak {
        Streak {
            id: 7,
            initial_date: date("2023-12-01"),
            final_date: Some(date("2024-02-01")),
            app_user_id: 3,
        }
    }

    #[tokio::test]
    async fn test_patch_initial_date_keeps_final_date() {
        let mut repo = MockStreakRepository::new();
        repo.expect_find_by_id().with(eq(7)).returning(|_| Ok(Some(streak())));
        repo.expect_update()
            .withf(|id, changeset| {
                *id == 7
                    && changeset.initial_date == date("2024-01-01")
                    && changeset.final_date == Some(date("2024-02-01"))
                    && changeset.app_user_id == 3
            })
            .times(1)
            .returning(|id, changeset| {
                Ok(Streak {
                    id,
                    initial_date: changeset.initial_date,
                    final_date: changeset.final_date,
                    app_user_id: changeset.app_user_id,
                })
            });

        let service = StreakService::new(Arc::new(repo));
        let patch: StreakPatch = serde_json::from_str(r#"{"initialDate":"2024-01-01"}"#).unwrap();
        assert!(matches!(
            service.patch(7, patch).await.unwrap(),
            PatchOutcome::Saved(_)
        ));
    }

    #[tokio::test]
    async fn test_patch_final_date_before_initial_date_is_invalid() {
        let mut repo = MockStreakRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(Some(streak())));
        repo.expect_update().never();

        let service = StreakService::new(Arc::new(repo));
        let patch: StreakPatch = serde_json::from_str(r#"{"finalDate":"2023-01-01"}"#).unwrap();
        match service.patch(7, patch).await.unwrap() {
            PatchOutcome::Invalid(errors) => assert!(errors.contains_key("finalDate")),
            other => panic!("Expected Invalid, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_patch_initial_date_past_final_date_is_invalid() {
        let mut repo = MockStreakRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(Some(streak())));
        repo.expect_update().never();

        let service = StreakService::new(Arc::new(repo));
        let patch: StreakPatch = serde_json::from_str(r#"{"initialDate":"2025-06-01"}"#).unwrap();
        match service.patch(7, patch).await.unwrap() {
            PatchOutcome::Invalid(errors) => assert!(errors.contains_key("finalDate")),
            other => panic!("Expected Invalid, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_list_started_before_delegates() {
        let mut repo = MockStreakRepository::new();
        repo.expect_find_by_initial_date_before()
            .with(eq(date("2024-01-01")))
            .returning(|_| Ok(vec![streak()]));

        let service = StreakService::new(Arc::new(repo));
        assert_eq!(service.list_started_before(date("2024-01-01")).await.unwrap().len(), 1);
    }
}
