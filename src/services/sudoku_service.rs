use std::sync::Arc;

use crate::error::{AppResult, StoreResult};
use crate::models::{NewSudoku, Sudoku, SudokuDocument};
use crate::repositories::SudokuRepository;

#[derive(Clone)]
pub struct SudokuService {
    repo: Arc<dyn SudokuRepository>,
}

impl SudokuService {
    pub fn new(repo: Arc<dyn SudokuRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> AppResult<Vec<Sudoku>> {
        self.repo.find_all().await
    }

    pub async fn get(&self, id: &str) -> AppResult<Option<Sudoku>> {
        self.repo.find_by_id(id).await
    }

    /// Stores the document under a freshly generated id.
    pub async fn insert(&self, document: SudokuDocument) -> StoreResult<Sudoku> {
        self.repo.insert(NewSudoku::new(document)).await
    }

    /// Replaces the document of an existing sudoku; `None` when the id is unknown.
    pub async fn update(&self, id: &str, document: SudokuDocument) -> StoreResult<Option<Sudoku>> {
        if self.repo.find_by_id(id).await?.is_none() {
            return Ok(None);
        }
        self.repo.update(id, document).await.map(Some)
    }

    pub async fn delete(&self, id: &str) -> StoreResult<bool> {
        if self.repo.find_by_id(id).await?.is_none() {
            return Ok(false);
        }
        Ok(self.repo.delete(id).await? > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Difficulty;
    use crate::repositories::MockSudokuRepository;

    #[tokio::test]
    async fn test_insert_assigns_id() {
        let mut repo = MockSudokuRepository::new();
        repo.expect_insert()
            .withf(|new| uuid::Uuid::parse_str(&new.id).is_ok())
            .times(1)
            .returning(|new| {
                Ok(Sudoku {
                    id: new.id,
                    document: new.document,
                    created_at: chrono::Utc::now().naive_utc(),
                })
            });

        let service = SudokuService::new(Arc::new(repo));
        let document = SudokuDocument {
            board: vec![vec![0; 9]; 9],
            solution: vec![vec![1; 9]; 9],
            difficulty: Difficulty::Easy,
        };
        let saved = service.insert(document).await.unwrap();
        assert_eq!(saved.id.len(), 36);
    }

    #[tokio::test]
    async fn test_update_missing_document() {
        let mut repo = MockSudokuRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));
        repo.expect_update().never();

        let service = SudokuService::new(Arc::new(repo));
        let document = SudokuDocument {
            board: vec![vec![0; 9]; 9],
            solution: vec![vec![1; 9]; 9],
            difficulty: Difficulty::Hard,
        };
        assert!(service.update("nope", document).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_replaces_document() {
        let stored = Sudoku {
            id: "abc".to_string(),
            document: SudokuDocument {
                board: vec![vec![0; 9]; 9],
                solution: vec![vec![1; 9]; 9],
                difficulty: Difficulty::Easy,
            },
            created_at: chrono::Utc::now().naive_utc(),
        };
        let mut repo = MockSudokuRepository::new();
        let current = stored.clone();
        repo.expect_find_by_id().returning(move |_| Ok(Some(current.clone())));
        repo.expect_update()
            .withf(|id, document| id == "abc" && document.difficulty == Difficulty::Hard)
            .times(1)
            .returning(move |id, document| {
                Ok(Sudoku {
                    id: id.to_string(),
                    document,
                    created_at: stored.created_at,
                })
            });

        let service = SudokuService::new(Arc::new(repo));
        let document = SudokuDocument {
            board: vec![vec![0; 9]; 9],
            solution: vec![vec![1; 9]; 9],
            difficulty: Difficulty::Hard,
        };
        let saved = service.update("abc", document).await.unwrap().unwrap();
        assert_eq!(saved.id, "abc");
        assert_eq!(saved.document.difficulty, Difficulty::Hard);
    }

    #[tokio::test]
    async fn test_delete_missing_document() {
        let mut repo = MockSudokuRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));
        repo.expect_delete().never();

        let service = SudokuService::new(Arc::new(repo));
        assert!(!service.delete("nope").await.unwrap());
    }
}
