use chrono::NaiveDate;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::error::FieldErrors;
use crate::models::EntityRef;
use crate::models::patch::{Patch, double_option, set_optional, set_required, touched};
use crate::schema::streaks;

/// Streak row as stored in `streaks`
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Identifiable)]
#[diesel(table_name = streaks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Streak {
    pub id: i64,
    pub initial_date: NaiveDate,
    pub final_date: Option<NaiveDate>,
    pub app_user_id: i64,
}

/// Streak as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StreakResponse {
    pub id: i64,
    #[schema(value_type = String, format = Date, example = "2024-01-01")]
    pub initial_date: NaiveDate,
    #[schema(value_type = Option<String>, format = Date)]
    pub final_date: Option<NaiveDate>,
    pub app_user: EntityRef,
}

impl From<Streak> for StreakResponse {
    fn from(streak: Streak) -> Self {
        Self {
            id: streak.id,
            initial_date: streak.initial_date,
            final_date: streak.final_date,
            app_user: EntityRef::new(streak.app_user_id),
        }
    }
}

/// Body of streak insert and full update; also the merge target of a patch
#[derive(Debug, Clone, PartialEq, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_date_order", skip_on_field_errors = false))]
pub struct StreakInput {
    #[schema(value_type = String, format = Date, example = "2024-01-01")]
    pub initial_date: NaiveDate,
    #[schema(value_type = Option<String>, format = Date)]
    pub final_date: Option<NaiveDate>,
    pub app_user: EntityRef,
}

/// A streak cannot end before it starts. Reported against `finalDate`,
/// and checked whenever either date changes.
fn validate_date_order(input: &StreakInput) -> Result<(), ValidationError> {
    match input.final_date {
        Some(final_date) if final_date < input.initial_date => {
            let mut error = ValidationError::new("date_order").with_message(
                "A data final não pode ser anterior à data inicial.".into(),
            );
            error.add_param("field".into(), &"finalDate");
            error.add_param("involves".into(), &["initialDate", "finalDate"]);
            Err(error)
        }
        _ => Ok(()),
    }
}

impl From<&Streak> for StreakInput {
    fn from(streak: &Streak) -> Self {
        Self {
            initial_date: streak.initial_date,
            final_date: streak.final_date,
            app_user: EntityRef::new(streak.app_user_id),
        }
    }
}

/// Column values written on insert and update
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = streaks)]
#[diesel(treat_none_as_null = true)]
pub struct StreakChangeset {
    pub initial_date: NaiveDate,
    pub final_date: Option<NaiveDate>,
    pub app_user_id: i64,
}

impl From<StreakInput> for StreakChangeset {
    fn from(input: StreakInput) -> Self {
        Self {
            initial_date: input.initial_date,
            final_date: input.final_date,
            app_user_id: input.app_user.id,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct StreakPatch {
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>, format = Date)]
    pub initial_date: Option<Option<NaiveDate>>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>, format = Date)]
    pub final_date: Option<Option<NaiveDate>>,
}

impl Patch<StreakInput> for StreakPatch {
    fn touched_fields(&self) -> Vec<&'static str> {
        touched(&[
            ("initialDate", self.initial_date.is_some()),
            ("finalDate", self.final_date.is_some()),
        ])
    }

    fn apply(self, target: &mut StreakInput) -> FieldErrors {
        let mut errors = FieldErrors::new();
        set_required(
            &mut errors,
            "initialDate",
            self.initial_date,
            &mut target.initial_date,
        );
        set_optional(self.final_date, &mut target.final_date);
        errors
    }
}
