//! Building blocks for typed partial updates.
//!
//! Each patchable entity has a `*Patch` struct with one slot per updatable
//! attribute. A slot is `Option<Option<T>>`: the outer `None` means the key
//! was absent, `Some(None)` means the key was sent as `null`.

use serde::{Deserialize, Deserializer};

use crate::error::FieldErrors;

/// Message recorded when a required field is explicitly set to `null`.
pub const NULL_NOT_ALLOWED: &str = "O campo não pode ser nulo.";

/// Deserializes a present key into `Some`, keeping `null` as `Some(None)`.
///
/// Used together with `#[serde(default)]` so that absent keys stay `None`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// A sparse field map that can be merged onto a full input shape `T`.
pub trait Patch<T> {
    /// camelCase names of the keys present in the request body.
    fn touched_fields(&self) -> Vec<&'static str>;

    /// Merges the present slots onto `target`.
    ///
    /// Explicit `null` on a required attribute leaves the target untouched and
    /// is reported in the returned map.
    fn apply(self, target: &mut T) -> FieldErrors;

    fn is_empty(&self) -> bool {
        self.touched_fields().is_empty()
    }
}

/// Collects the names whose slot is present.
pub fn touched(slots: &[(&'static str, bool)]) -> Vec<&'static str> {
    slots
        .iter()
        .filter(|(_, present)| *present)
        .map(|(name, _)| *name)
        .collect()
}

/// Writes a slot into a required attribute.
pub fn set_required<V>(
    errors: &mut FieldErrors,
    field: &str,
    slot: Option<Option<V>>,
    target: &mut V,
) {
    match slot {
        Some(Some(value)) => *target = value,
        Some(None) => {
            errors.insert(field.to_string(), NULL_NOT_ALLOWED.to_string());
        }
        None => {}
    }
}

/// Writes a slot into a nullable attribute; `null` clears it.
pub fn set_optional<V>(slot: Option<Option<V>>, target: &mut Option<V>) {
    if let Some(value) = slot {
        *target = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    #[serde(deny_unknown_fields)]
    struct Probe {
        #[serde(default, deserialize_with = "double_option")]
        value: Option<Option<i32>>,
    }

    #[test]
    fn test_double_option_distinguishes_absent_and_null() {
        let absent: Probe = serde_json::from_str("{}").unwrap();
        let null: Probe = serde_json::from_str(r#"{"value":null}"#).unwrap();
        let present: Probe = serde_json::from_str(r#"{"value":3}"#).unwrap();

        assert_eq!(absent.value, None);
        assert_eq!(null.value, Some(None));
        assert_eq!(present.value, Some(Some(3)));
    }

    #[test]
    fn test_set_required_records_null() {
        let mut errors = FieldErrors::new();
        let mut target = 1;

        set_required(&mut errors, "level", Some(None), &mut target);
        assert_eq!(target, 1);
        assert_eq!(errors.get("level").map(String::as_str), Some(NULL_NOT_ALLOWED));

        set_required(&mut errors, "points", Some(Some(7)), &mut target);
        assert_eq!(target, 7);
        assert!(!errors.contains_key("points"));
    }

    #[test]
    fn test_set_optional_clears_on_null() {
        let mut target = Some("a".to_string());
        set_optional(None, &mut target);
        assert_eq!(target.as_deref(), Some("a"));
        set_optional(Some(None), &mut target);
        assert_eq!(target, None);
    }

    #[test]
    fn test_touched_keeps_order() {
        assert_eq!(
            touched(&[("name", true), ("price", false), ("isActive", true)]),
            vec!["name", "isActive"]
        );
    }
}
