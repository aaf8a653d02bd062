use bigdecimal::{BigDecimal, Zero};
use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::error::FieldErrors;
use crate::models::patch::{Patch, double_option, set_optional, set_required, touched};
use crate::schema::plans;

/// Subscription plan row as stored in `plans`
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Identifiable, Serialize, ToSchema)]
#[diesel(table_name = plans)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub id: i64,
    #[schema(example = "PREMIUM")]
    pub name: String,
    pub description: Option<String>,
    #[schema(value_type = String, example = "19.90")]
    pub price: BigDecimal,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
}

/// Body of plan insert and full update; also the merge target of a patch
#[derive(
    Debug, Clone, PartialEq, Deserialize, Validate, ToSchema, Insertable, AsChangeset,
)]
#[diesel(table_name = plans)]
#[diesel(treat_none_as_null = true)]
#[serde(rename_all = "camelCase")]
pub struct PlanInput {
    #[validate(length(min = 1, max = 100, message = "O nome deve ter entre 1 e 100 caracteres."))]
    #[schema(example = "PREMIUM")]
    pub name: String,

    #[validate(length(max = 500, message = "A descrição deve ter no máximo 500 caracteres."))]
    pub description: Option<String>,

    #[validate(custom(function = "validate_price"))]
    #[schema(value_type = String, example = "19.90")]
    pub price: BigDecimal,

    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

fn validate_price(price: &BigDecimal) -> Result<(), ValidationError> {
    if price < &BigDecimal::zero() {
        return Err(ValidationError::new("price")
            .with_message("O preço não pode ser negativo.".into()));
    }
    Ok(())
}

impl From<&Plan> for PlanInput {
    fn from(plan: &Plan) -> Self {
        Self {
            name: plan.name.clone(),
            description: plan.description.clone(),
            price: plan.price.clone(),
            is_active: plan.is_active,
        }
    }
}

/// Partial update of a plan
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PlanPatch {
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub name: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub price: Option<Option<BigDecimal>>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<bool>)]
    pub is_active: Option<Option<bool>>,
}

impl Patch<PlanInput> for PlanPatch {
    fn touched_fields(&self) -> Vec<&'static str> {
        touched(&[
            ("name", self.name.is_some()),
            ("description", self.description.is_some()),
            ("price", self.price.is_some()),
            ("isActive", self.is_active.is_some()),
        ])
    }

    fn apply(self, target: &mut PlanInput) -> FieldErrors {
        let mut errors = FieldErrors::new();
        set_required(&mut errors, "name", self.name, &mut target.name);
        set_optional(self.description, &mut target.description);
        set_required(&mut errors, "price", self.price, &mut target.price);
        set_required(&mut errors, "isActive", self.is_active, &mut target.is_active);
        errors
    }
}
