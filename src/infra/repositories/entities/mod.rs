//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod faculty_profile;
pub mod notification;
pub mod project_request;
pub mod student_profile;
pub mod user;

/// Decode a JSON column holding a list of strings; malformed values read
/// back as empty rather than failing the whole row.
pub(crate) fn string_list(value: sea_orm::prelude::Json) -> Vec<String> {
    serde_json::from_value(value).unwrap_or_default()
}
