use std::sync::OnceLock;

use regex::Regex;

/// Utility for parsing PostgreSQL constraint violation messages.
///
/// PostgreSQL reports the violated constraint in the primary message and the
/// offending key in the DETAIL line, e.g.
///
/// ```text
/// duplicate key value violates unique constraint "user_roles_name_key"
/// Key (name)=(ADMIN) already exists.
/// ```
///
/// The parser combines both with the constraint name to recover the column
/// and value that caused the violation.
pub struct ConstraintParser;

/// Compiled regex patterns for constraint parsing, cached for performance
struct RegexPatterns {
    key_value: Regex,
    key_column: Regex,
    table_name: Regex,
    constraint_name: Regex,
}

impl RegexPatterns {
    fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            // "Key (field)=(value) already exists." and friends; the key may be
            // an expression such as lower(name::text)
            key_value: Regex::new(
                r"Key \((.+?)\)=\((.*?)\)(?: already exists| is not present| is still referenced|\.|$)",
            )?,
            // Plain column inside an index expression: lower(name::text) -> name
            key_column: Regex::new(r"^(?:\w+\()?([A-Za-z_][A-Za-z0-9_]*)")?,
            table_name: Regex::new(r#"table "([^"]+)""#)?,
            constraint_name: Regex::new(r#"constraint "([^"]+)""#)?,
        })
    }
}

static REGEX_PATTERNS: OnceLock<Option<RegexPatterns>> = OnceLock::new();

impl ConstraintParser {
    /// Gets the cached regex patterns, initializing them if necessary
    fn patterns() -> Option<&'static RegexPatterns> {
        REGEX_PATTERNS
            .get_or_init(|| RegexPatterns::new().ok())
            .as_ref()
    }

    /// Parses a unique constraint violation.
    ///
    /// Returns `(column, value)`. The DETAIL line is preferred; when it is
    /// missing the column is recovered from the constraint name and the value
    /// is reported as `duplicate_value`.
    ///
    /// ```
    /// use delfis_api::error::ConstraintParser;
    ///
    /// let parsed = ConstraintParser::parse_unique_violation(
    ///     "duplicate key value violates unique constraint \"user_roles_name_key\"",
    ///     Some("Key (name)=(ADMIN) already exists."),
    ///     Some("user_roles_name_key"),
    /// );
    /// assert_eq!(parsed, Some(("name".to_string(), "ADMIN".to_string())));
    /// ```
    pub fn parse_unique_violation(
        message: &str,
        details: Option<&str>,
        constraint_name: Option<&str>,
    ) -> Option<(String, String)> {
        let detail_source = details.unwrap_or(message);
        if let Some((column, value)) = Self::extract_key_value(detail_source)
            .or_else(|| Self::extract_key_value(message))
        {
            return Some((column, value));
        }

        let constraint = constraint_name
            .map(str::to_string)
            .or_else(|| Self::extract_constraint_from_message(message))?;
        let tables = Self::extract_tables_from_message(message);
        let column = Self::column_from_constraint_name(&constraint, &tables)?;
        Some((column, "duplicate_value".to_string()))
    }

    /// Parses a foreign key constraint violation.
    ///
    /// Returns `(referencing_table, fk_column)`. Both directions are handled:
    /// an insert pointing at a missing row and a delete of a row that is still
    /// referenced. The foreign key column always comes from the constraint
    /// name (`app_users_plan_id_fkey` -> `plan_id`).
    ///
    /// ```
    /// use delfis_api::error::ConstraintParser;
    ///
    /// let parsed = ConstraintParser::parse_foreign_key_violation(
    ///     "update or delete on table \"user_roles\" violates foreign key constraint \"app_users_user_role_id_fkey\" on table \"app_users\"",
    ///     Some("Key (id)=(1) is still referenced from table \"app_users\"."),
    ///     Some("app_users_user_role_id_fkey"),
    /// );
    /// assert_eq!(parsed, Some(("app_users".to_string(), "user_role_id".to_string())));
    /// ```
    pub fn parse_foreign_key_violation(
        message: &str,
        details: Option<&str>,
        constraint_name: Option<&str>,
    ) -> Option<(String, String)> {
        let constraint = constraint_name
            .map(str::to_string)
            .or_else(|| Self::extract_constraint_from_message(message))?;

        let mut tables = Self::extract_tables_from_message(message);
        if let Some(details) = details {
            tables.extend(Self::extract_tables_from_message(details));
        }

        let table = tables
            .iter()
            .filter(|table| constraint.starts_with(&format!("{}_", table)))
            .max_by_key(|table| table.len())?
            .clone();
        let column = Self::column_from_constraint_name(&constraint, &tables)?;
        Some((table, column))
    }

    /// Strips the owning table prefix and the PostgreSQL suffix from a
    /// default-named constraint.
    ///
    /// `user_roles_name_key` with table `user_roles` -> `name`,
    /// `themes_name_lower_idx` with table `themes` -> `name_lower`.
    pub fn column_from_constraint_name(constraint: &str, tables: &[String]) -> Option<String> {
        let without_suffix = ["_fkey", "_key", "_idx", "_check", "_pkey"]
            .iter()
            .find_map(|suffix| constraint.strip_suffix(suffix))
            .unwrap_or(constraint);

        let rest = tables
            .iter()
            .filter_map(|table| without_suffix.strip_prefix(&format!("{}_", table)))
            .min_by_key(|rest| rest.len())?;

        if rest.is_empty() {
            None
        } else {
            Some(rest.to_string())
        }
    }

    /// Extracts `(column, value)` from a `Key (column)=(value)` fragment.
    pub fn extract_key_value(text: &str) -> Option<(String, String)> {
        let patterns = Self::patterns()?;
        let caps = patterns.key_value.captures(text)?;
        let key = caps.get(1)?.as_str();
        let value = caps.get(2)?.as_str().to_string();
        let column = patterns
            .key_column
            .captures(key)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())?;
        Some((column, value))
    }

    /// Extracts every quoted table name mentioned in the message, in order.
    pub fn extract_tables_from_message(message: &str) -> Vec<String> {
        match Self::patterns() {
            Some(patterns) => patterns
                .table_name
                .captures_iter(message)
                .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_string()))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Extracts the quoted constraint name from the message.
    pub fn extract_constraint_from_message(message: &str) -> Option<String> {
        Self::patterns()?
            .constraint_name
            .captures(message)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }
}
