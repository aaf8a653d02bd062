use chrono::{Local, NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::error::FieldErrors;
use crate::models::EntityRef;
use crate::models::patch::{Patch, double_option, set_optional, set_required, touched};
use crate::schema::app_users;

/// User account row as stored in `app_users`
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Identifiable)]
#[diesel(table_name = app_users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AppUser {
    pub id: i64,
    pub name: String,
    pub username: String,
    pub email: String,
    /// argon2 PHC string
    pub password: String,
    pub level: i32,
    pub points: i32,
    pub coins: i32,
    pub birth_date: NaiveDate,
    pub picture_url: Option<String>,
    pub plan_id: Option<i64>,
    pub user_role_id: i64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// User account as returned by the API; the password hash is never exposed
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppUserResponse {
    pub id: i64,
    #[schema(example = "ANA SOUZA")]
    pub name: String,
    #[schema(example = "ana")]
    pub username: String,
    #[schema(example = "ana@delfis.com")]
    pub email: String,
    pub level: i32,
    pub points: i32,
    pub coins: i32,
    #[schema(value_type = String, format = Date, example = "2000-05-17")]
    pub birth_date: NaiveDate,
    pub picture_url: Option<String>,
    pub plan: Option<EntityRef>,
    pub user_role: EntityRef,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: NaiveDateTime,
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: NaiveDateTime,
}

impl From<AppUser> for AppUserResponse {
    fn from(user: AppUser) -> Self {
        Self {
            id: user.id,
            name: user.name,
            username: user.username,
            email: user.email,
            level: user.level,
            points: user.points,
            coins: user.coins,
            birth_date: user.birth_date,
            picture_url: user.picture_url,
            plan: user.plan_id.map(EntityRef::new),
            user_role: EntityRef::new(user.user_role_id),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

fn default_level() -> i32 {
    1
}

/// Body of user insert and full update; also the merge target of a patch.
///
/// `password` holds the plaintext as received; it is hashed before storage.
#[derive(Debug, Clone, PartialEq, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppUserInput {
    #[validate(custom(function = "validate_stored_name"))]
    #[schema(example = "Ana Souza")]
    pub name: String,

    #[validate(length(min = 3, max = 50, message = "O nome de usuário deve ter entre 3 e 50 caracteres."))]
    #[schema(example = "ana")]
    pub username: String,

    #[validate(email(message = "E-mail inválido."))]
    #[schema(example = "ana@delfis.com")]
    pub email: String,

    #[validate(length(min = 8, max = 128, message = "A senha deve ter entre 8 e 128 caracteres."))]
    #[schema(example = "s3nh4-f0rt3")]
    pub password: String,

    #[serde(default = "default_level")]
    #[validate(range(min = 1, message = "O nível deve ser maior que zero."))]
    pub level: i32,

    #[serde(default)]
    #[validate(range(min = 0, message = "Os pontos não podem ser negativos."))]
    pub points: i32,

    #[serde(default)]
    #[validate(range(min = 0, message = "As moedas não podem ser negativas."))]
    pub coins: i32,

    #[validate(custom(function = "validate_birth_date"))]
    #[schema(value_type = String, format = Date, example = "2000-05-17")]
    pub birth_date: NaiveDate,

    #[validate(url(message = "URL da foto inválida."))]
    pub picture_url: Option<String>,

    pub plan: Option<EntityRef>,

    pub user_role: EntityRef,
}

/// Longest stored name, in characters (`VARCHAR(120)`)
pub const NAME_MAX_CHARS: usize = 120;

/// Checks the name as it will be stored: trimmed and upper-cased, which can
/// grow it ("ß" becomes "SS").
fn validate_stored_name(value: &str) -> Result<(), ValidationError> {
    let stored = AppUserInput::normalize_name(value);
    if stored.is_empty() {
        return Err(ValidationError::new("blank").with_message("O campo não pode estar em branco.".into()));
    }
    if stored.chars().count() > NAME_MAX_CHARS {
        return Err(ValidationError::new("length")
            .with_message("O nome deve ter entre 1 e 120 caracteres.".into()));
    }
    Ok(())
}

fn validate_birth_date(date: &NaiveDate) -> Result<(), ValidationError> {
    if *date >= Local::now().date_naive() {
        return Err(ValidationError::new("past")
            .with_message("A data de nascimento deve estar no passado.".into()));
    }
    Ok(())
}

impl AppUserInput {
    /// Stored form of a display name: trimmed and upper-cased.
    pub fn normalize_name(name: &str) -> String {
        name.trim().to_uppercase()
    }

    /// Merge target built from a stored row. `password` carries the stored
    /// hash until a patch replaces it.
    pub fn from_stored(user: &AppUser) -> Self {
        Self {
            name: user.name.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
            password: user.password.clone(),
            level: user.level,
            points: user.points,
            coins: user.coins,
            birth_date: user.birth_date,
            picture_url: user.picture_url.clone(),
            plan: user.plan_id.map(EntityRef::new),
            user_role: EntityRef::new(user.user_role_id),
        }
    }

    /// Column values for storage; `password_hash` replaces the plaintext.
    pub fn into_changeset(self, password_hash: String, updated_at: NaiveDateTime) -> AppUserChangeset {
        AppUserChangeset {
            name: Self::normalize_name(&self.name),
            username: self.username,
            email: self.email,
            password: password_hash,
            level: self.level,
            points: self.points,
            coins: self.coins,
            birth_date: self.birth_date,
            picture_url: self.picture_url,
            plan_id: self.plan.map(|plan| plan.id),
            user_role_id: self.user_role.id,
            updated_at,
        }
    }
}

/// Column values written on insert and update
#[derive(Debug, Clone, PartialEq, Insertable, AsChangeset)]
#[diesel(table_name = app_users)]
#[diesel(treat_none_as_null = true)]
pub struct AppUserChangeset {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub level: i32,
    pub points: i32,
    pub coins: i32,
    pub birth_date: NaiveDate,
    pub picture_url: Option<String>,
    pub plan_id: Option<i64>,
    pub user_role_id: i64,
    pub updated_at: NaiveDateTime,
}

/// Partial update of a user account. `email` is not updatable.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AppUserPatch {
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub name: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub username: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub password: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i32>)]
    pub level: Option<Option<i32>>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i32>)]
    pub points: Option<Option<i32>>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i32>)]
    pub coins: Option<Option<i32>>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>, format = Date)]
    pub birth_date: Option<Option<NaiveDate>>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub picture_url: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<EntityRef>)]
    pub plan: Option<Option<EntityRef>>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<EntityRef>)]
    pub user_role: Option<Option<EntityRef>>,
}

impl AppUserPatch {
    /// Whether the patch carries a new plaintext password.
    pub fn changes_password(&self) -> bool {
        matches!(self.password, Some(Some(_)))
    }
}

impl Patch<AppUserInput> for AppUserPatch {
    fn touched_fields(&self) -> Vec<&'static str> {
        touched(&[
            ("name", self.name.is_some()),
            ("username", self.username.is_some()),
            ("password", self.password.is_some()),
            ("level", self.level.is_some()),
            ("points", self.points.is_some()),
            ("coins", self.coins.is_some()),
            ("birthDate", self.birth_date.is_some()),
            ("pictureUrl", self.picture_url.is_some()),
            ("plan", self.plan.is_some()),
            ("userRole", self.user_role.is_some()),
        ])
    }

    fn apply(self, target: &mut AppUserInput) -> FieldErrors {
        let mut errors = FieldErrors::new();
        set_required(&mut errors, "name", self.name, &mut target.name);
        set_required(&mut errors, "username", self.username, &mut target.username);
        set_required(&mut errors, "password", self.password, &mut target.password);
        set_required(&mut errors, "level", self.level, &mut target.level);
        set_required(&mut errors, "points", self.points, &mut target.points);
        set_required(&mut errors, "coins", self.coins, &mut target.coins);
        set_required(&mut errors, "birthDate", self.birth_date, &mut target.birth_date);
        set_optional(self.picture_url, &mut target.picture_url);
        set_optional(self.plan, &mut target.plan);
        set_required(&mut errors, "userRole", self.user_role, &mut target.user_role);
        errors
    }
}
