use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::schema::user_roles;

/// Role row as stored in `user_roles`
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Identifiable, Serialize, ToSchema)]
#[diesel(table_name = user_roles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRole {
    pub id: i64,
    #[schema(example = "ADMIN")]
    pub name: String,
}

/// Body of role insert and full update
#[derive(
    Debug, Clone, PartialEq, Deserialize, Validate, ToSchema, Insertable, AsChangeset,
)]
#[diesel(table_name = user_roles)]
#[serde(rename_all = "camelCase")]
pub struct UserRoleInput {
    #[validate(length(min = 1, max = 50, message = "O nome deve ter entre 1 e 50 caracteres."))]
    #[schema(example = "ADMIN")]
    pub name: String,
}
