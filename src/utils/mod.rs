pub mod field_validator;
pub mod password;
pub mod validate;

pub use field_validator::verify_fields;
pub use validate::{PatchJson, ValidPath, ValidatedJson};
