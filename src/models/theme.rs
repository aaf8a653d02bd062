use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::error::FieldErrors;
use crate::models::patch::{Patch, double_option, set_required, touched};
use crate::schema::themes;

/// Theme row as stored in `themes`; names are unique ignoring case
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Identifiable, Serialize, ToSchema)]
#[diesel(table_name = themes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Theme {
    pub id: i64,
    #[schema(example = "Puzzles")]
    pub name: String,
}

#[derive(
    Debug, Clone, PartialEq, Deserialize, Validate, ToSchema, Insertable, AsChangeset,
)]
#[diesel(table_name = themes)]
#[serde(rename_all = "camelCase")]
pub struct ThemeInput {
    #[validate(length(min = 1, max = 100, message = "O nome deve ter entre 1 e 100 caracteres."))]
    #[schema(example = "Puzzles")]
    pub name: String,
}

impl From<&Theme> for ThemeInput {
    fn from(theme: &Theme) -> Self {
        Self {
            name: theme.name.clone(),
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ThemePatch {
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub name: Option<Option<String>>,
}

impl Patch<ThemeInput> for ThemePatch {
    fn touched_fields(&self) -> Vec<&'static str> {
        touched(&[("name", self.name.is_some())])
    }

    fn apply(self, target: &mut ThemeInput) -> FieldErrors {
        let mut errors = FieldErrors::new();
        set_required(&mut errors, "name", self.name, &mut target.name);
        errors
    }
}
