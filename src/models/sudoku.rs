//! Sudoku game documents.
//!
//! A sudoku is stored as a single JSONB document keyed by a generated
//! UUID string, next to the relational tables.

use std::io::Write;

use chrono::NaiveDateTime;
use diesel::deserialize::{self, FromSql};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::serialize::{self, Output, ToSql};
use diesel::sql_types::Jsonb;
use diesel::{AsExpression, FromSqlRow};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::schema::sudokus;

/// Side length of a sudoku grid
pub const GRID_SIZE: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// Puzzle content persisted in the `document` column.
///
/// `board` uses 0 for an empty cell; `solution` is fully filled.
#[derive(
    Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, Validate, AsExpression, FromSqlRow,
)]
#[diesel(sql_type = Jsonb)]
#[validate(schema(function = "validate_consistency", skip_on_field_errors = true))]
pub struct SudokuDocument {
    #[validate(custom(function = "validate_board"))]
    pub board: Vec<Vec<u8>>,
    #[validate(custom(function = "validate_solution"))]
    pub solution: Vec<Vec<u8>>,
    pub difficulty: Difficulty,
}

impl ToSql<Jsonb, Pg> for SudokuDocument {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        // jsonb binary format version
        out.write_all(&[1])?;
        serde_json::to_writer(&mut *out, self)?;
        Ok(serialize::IsNull::No)
    }
}

impl FromSql<Jsonb, Pg> for SudokuDocument {
    fn from_sql(bytes: <Pg as diesel::backend::Backend>::RawValue<'_>) -> deserialize::Result<Self> {
        let value = <serde_json::Value as FromSql<Jsonb, Pg>>::from_sql(bytes)?;
        Ok(serde_json::from_value(value)?)
    }
}

fn is_square(grid: &[Vec<u8>]) -> bool {
    grid.len() == GRID_SIZE && grid.iter().all(|row| row.len() == GRID_SIZE)
}

fn grid_error(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(message.into())
}

fn validate_board(board: &[Vec<u8>]) -> Result<(), ValidationError> {
    if !is_square(board) {
        return Err(grid_error("grid_size", "O tabuleiro deve ter 9 linhas de 9 células."));
    }
    if board.iter().flatten().any(|cell| *cell > 9) {
        return Err(grid_error("cell_range", "As células do tabuleiro devem estar entre 0 e 9."));
    }
    Ok(())
}

fn validate_solution(solution: &[Vec<u8>]) -> Result<(), ValidationError> {
    if !is_square(solution) {
        return Err(grid_error("grid_size", "A solução deve ter 9 linhas de 9 células."));
    }
    if solution.iter().flatten().any(|cell| !(1..=9).contains(cell)) {
        return Err(grid_error("cell_range", "As células da solução devem estar entre 1 e 9."));
    }
    Ok(())
}

/// Every given on the board must agree with the solution.
fn validate_consistency(document: &SudokuDocument) -> Result<(), ValidationError> {
    let clashes = document
        .board
        .iter()
        .flatten()
        .zip(document.solution.iter().flatten())
        .any(|(given, solved)| *given != 0 && given != solved);

    if clashes {
        let mut error = grid_error("inconsistent", "O tabuleiro não corresponde à solução.");
        error.add_param("field".into(), &"board");
        return Err(error);
    }
    Ok(())
}

/// Sudoku as stored and returned by the API
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Identifiable, Serialize, ToSchema)]
#[diesel(table_name = sudokus)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[serde(rename_all = "camelCase")]
pub struct Sudoku {
    #[schema(example = "2f1b7a44-9c1e-4a8e-8f33-0b7d6f1c2a10")]
    pub id: String,
    #[serde(flatten)]
    pub document: SudokuDocument,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = sudokus)]
pub struct NewSudoku {
    pub id: String,
    pub document: SudokuDocument,
}

impl NewSudoku {
    /// Assigns a fresh document id.
    pub fn new(document: SudokuDocument) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            document,
        }
    }
}
