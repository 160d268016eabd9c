//! Validation and orchestration on top of a [`Store`](crate::store::Store).
//!
//! The HTTP handlers and the interactive CLI both go through these
//! functions, so every rule here applies to both front ends.

pub mod projects;
pub mod tasks;

use crate::error::AppError;

pub const MAX_NAME_LEN: usize = 100;
pub const MAX_DESCRIPTION_LEN: usize = 150;

/// Trim `value` and require between 1 and `max` characters.
fn required_text(value: &str, field: &str, max: usize) -> Result<String, AppError> {
    let value = value.trim();
    let len = value.chars().count();
    if len == 0 || len > max {
        return Err(AppError::bad_request(format!(
            "{field} must be 1..{max} characters"
        )));
    }
    Ok(value.to_string())
}

/// Blank descriptions are stored as absent.
fn optional_description(value: Option<&str>) -> Result<Option<String>, AppError> {
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    if value.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(AppError::bad_request(format!(
            "Description must be at most {MAX_DESCRIPTION_LEN} characters"
        )));
    }
    Ok(Some(value.to_string()))
}
