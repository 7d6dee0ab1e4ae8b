//! Content-derived identifiers
//!
//! Ids produced here are stable across regeneration runs: the same ordered
//! fields always hash to the same id, so re-applying a mutation never churns
//! identifiers.

use sha1::{Digest, Sha1};

/// Joins fields before hashing
pub const FIELD_SEPARATOR: &str = "-";

/// Lowercase hex SHA-1 of `fields` joined with [`FIELD_SEPARATOR`]
pub fn generate_id<S: AsRef<str>>(fields: &[S]) -> String {
    let mut hasher = Sha1::new();
    for (index, field) in fields.iter().enumerate() {
        if index > 0 {
            hasher.update(FIELD_SEPARATOR.as_bytes());
        }
        hasher.update(field.as_ref().as_bytes());
    }
    hex::encode(hasher.finalize())
}

/// Id of the constraint binding `first_item.first_attribute` to
/// `second_item.second_attribute`
pub fn constraint_id(
    first_item: &str,
    first_attribute: &str,
    second_item: &str,
    second_attribute: &str,
) -> String {
    generate_id(&[first_item, first_attribute, second_item, second_attribute])
}
