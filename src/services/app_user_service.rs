//! User account service.
//!
//! Every write normalizes the display name, stores an Argon2 hash instead
//! of the plaintext password and refreshes `updated_at`.

use std::sync::Arc;

use chrono::Utc;

use crate::error::{AppResult, StoreResult};
use crate::models::{AppUser, AppUserInput, AppUserPatch};
use crate::repositories::AppUserRepository;
use crate::services::{PatchOutcome, merge_patch};
use crate::utils::password::hash_password;

#[derive(Clone)]
pub struct AppUserService {
    repo: Arc<dyn AppUserRepository>,
}

impl AppUserService {
    pub fn new(repo: Arc<dyn AppUserRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> AppResult<Vec<AppUser>> {
        self.repo.find_all().await
    }

    pub async fn get(&self, id: i64) -> AppResult<Option<AppUser>> {
        self.repo.find_by_id(id).await
    }

    pub async fn get_by_username(&self, username: &str) -> AppResult<Option<AppUser>> {
        self.repo.find_by_username(username).await
    }

    pub async fn get_by_email(&self, email: &str) -> AppResult<Option<AppUser>> {
        self.repo.find_by_email(email).await
    }

    pub async fn list_by_plan(&self, plan_id: i64) -> AppResult<Vec<AppUser>> {
        self.repo.find_by_plan(plan_id).await
    }

    pub async fn list_by_user_role(&self, user_role_id: i64) -> AppResult<Vec<AppUser>> {
        self.repo.find_by_user_role(user_role_id).await
    }

    pub async fn leaderboard(&self) -> AppResult<Vec<AppUser>> {
        self.repo.leaderboard().await
    }

    pub async fn insert(&self, input: AppUserInput) -> StoreResult<AppUser> {
        let hash = hash_password(&input.password)?;
        let changeset = input.into_changeset(hash, Utc::now().naive_utc());
        self.repo.insert(changeset).await
    }

    pub async fn update(&self, id: i64, input: AppUserInput) -> StoreResult<Option<AppUser>> {
        if self.repo.find_by_id(id).await?.is_none() {
            return Ok(None);
        }
        let hash = hash_password(&input.password)?;
        let changeset = input.into_changeset(hash, Utc::now().naive_utc());
        self.repo.update(id, changeset).await.map(Some)
    }

    /// Merges `patch` onto the stored account. The stored hash is kept
    /// unless the patch carries a new password.
    pub async fn patch(&self, id: i64, patch: AppUserPatch) -> StoreResult<PatchOutcome<AppUser>> {
        let Some(current) = self.repo.find_by_id(id).await? else {
            return Ok(PatchOutcome::NotFound);
        };

        let rehash = patch.changes_password();
        let merged = match merge_patch(AppUserInput::from_stored(&current), patch) {
            Ok(merged) => merged,
            Err(errors) => return Ok(PatchOutcome::Invalid(errors)),
        };

        let hash = if rehash {
            hash_password(&merged.password)?
        } else {
            current.password
        };
        let changeset = merged.into_changeset(hash, Utc::now().naive_utc());
        Ok(PatchOutcome::Saved(self.repo.update(id, changeset).await?))
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
    use chrono::NaiveDate;

    use crate::models::{AppUserChangeset, EntityRef};
    use crate::repositories::MockAppUserRepository;
    use crate::utils::password::verify_password;

    const STORED_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHQ$aGFzaA";

    fn stored_user() -> AppUser {
        let now = Utc::now().naive_utc();
        AppUser {
            id: 4,
            name: "ANA".to_string(),
            username: "ana".to_string(),
            email: "ana@delfis.com".to_string(),
            password: STORED_HASH.to_string(),
            level: 2,
            points: 10,
            coins: 1,
            birth_date: NaiveDate::from_ymd_opt(2000, 5, 17).unwrap(),
            picture_url: None,
            plan_id: Some(1),
            user_role_id: 1,
            created_at: now,
            updated_at: now,
        }
    }

    fn row_from(id: i64, changeset: AppUserChangeset) -> AppUser {
        let now = Utc::now().naive_utc();
        AppUser {
            id,
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
            created_at: now,
            updated_at: changeset.updated_at,
        }
    }

    #[tokio::test]
    async fn test_insert_hashes_password_and_normalizes_name() {
        let mut repo = MockAppUserRepository::new();
        repo.expect_insert()
            .withf(|changeset| {
                changeset.name == "ANA SOUZA"
                    && changeset.password != "s3nh4-f0rt3"
                    && verify_password("s3nh4-f0rt3", &changeset.password).unwrap_or(false)
            })
            .times(1)
            .returning(|changeset| Ok(row_from(1, changeset)));

        let service = AppUserService::new(Arc::new(repo));
        let input = AppUserInput {
            name: "  ana souza ".to_string(),
            username: "ana".to_string(),
            email: "ana@delfis.com".to_string(),
            password: "s3nh4-f0rt3".to_string(),
            level: 1,
            points: 0,
            coins: 0,
            birth_date: NaiveDate::from_ymd_opt(2000, 5, 17).unwrap(),
            picture_url: None,
            plan: None,
            user_role: EntityRef::new(1),
        };
        let saved = service.insert(input).await.unwrap();
        assert_eq!(saved.name, "ANA SOUZA");
    }

    #[tokio::test]
    async fn test_patch_without_password_keeps_hash() {
        let mut repo = MockAppUserRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(Some(stored_user())));
        repo.expect_update()
            .withf(|_, changeset| changeset.password == STORED_HASH && changeset.points == 99)
            .times(1)
            .returning(|id, changeset| Ok(row_from(id, changeset)));

        let service = AppUserService::new(Arc::new(repo));
        let patch: AppUserPatch = serde_json::from_str(r#"{"points":99}"#).unwrap();
        assert!(matches!(
            service.patch(4, patch).await.unwrap(),
            PatchOutcome::Saved(_)
        ));
    }

    #[tokio::test]
    async fn test_patch_short_password_is_invalid() {
        let mut repo = MockAppUserRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(Some(stored_user())));
        repo.expect_update().never();

        let service = AppUserService::new(Arc::new(repo));
        let patch: AppUserPatch = serde_json::from_str(r#"{"password":"123"}"#).unwrap();
        match service.patch(4, patch).await.unwrap() {
            PatchOutcome::Invalid(errors) => {
                assert_eq!(errors.len(), 1);
                assert!(errors.contains_key("password"));
            }
            other => panic!("Expected Invalid, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_patch_new_password_is_hashed() {
        let mut repo = MockAppUserRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(Some(stored_user())));
        repo.expect_update()
            .withf(|_, changeset| {
                verify_password("nova-senha-forte", &changeset.password).unwrap_or(false)
            })
            .times(1)
            .returning(|id, changeset| Ok(row_from(id, changeset)));

        let service = AppUserService::new(Arc::new(repo));
        let patch: AppUserPatch =
            serde_json::from_str(r#"{"password":"nova-senha-forte"}"#).unwrap();
        assert!(matches!(
            service.patch(4, patch).await.unwrap(),
            PatchOutcome::Saved(_)
        ));
    }

    #[tokio::test]
    async fn test_delete_missing_user() {
        let mut repo = MockAppUserRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));
        repo.expect_delete().never();

        let service = AppUserService::new(Arc::new(repo));
        assert!(!service.delete(8).await.unwrap());
    }
}
