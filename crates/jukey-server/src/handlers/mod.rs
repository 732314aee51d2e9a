//! HTTP handlers. Each one validates its parameters, runs one named query and
//! maps the result into an outward model.

pub mod birthdays;
pub mod character;
pub mod health;
pub mod media;
pub mod season;
pub mod staff;
pub mod user;

use crate::error::ApiError;

/// Largest page size accepted from callers (AniList's own maximum).
pub const MAX_PAGE_SIZE: i64 = 50;

/// Reject ids below 1.
pub fn positive_id(id: i64) -> Result<u64, ApiError> {
    u64::try_from(id)
        .ok()
        .filter(|&id| id >= 1)
        .ok_or_else(|| ApiError::BadRequest(format!("id must be a positive integer, got {id}")))
}

/// `value` or `default`, which must lie within `min..=max`.
pub fn bounded(
    name: &str,
    value: Option<i64>,
    default: u32,
    min: i64,
    max: i64,
) -> Result<u32, ApiError> {
    let Some(value) = value else {
        return Ok(default);
    };
    if !(min..=max).contains(&value) {
        return Err(ApiError::BadRequest(format!(
            "{name} must be between {min} and {max}, got {value}"
        )));
    }
    u32::try_from(value)
        .map_err(|_| ApiError::BadRequest(format!("{name} is out of range: {value}")))
}
