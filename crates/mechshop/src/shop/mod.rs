//! Shop operations: the CRUD behind each menu entry.
//!
//! Every operation validates its input before touching the database and
//! uses bound parameters for all user-supplied values.

mod cars;
mod customers;
mod mechanics;
mod requests;

use crate::error::{Result, ShopError};

/// Rejects blank values for required text fields and returns the trimmed text.
pub(crate) fn require_text(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ShopError::Validation(format!("{} must not be empty", field)));
    }
    Ok(trimmed.to_string())
}

/// Rejects zero and negative values.
pub(crate) fn require_positive(field: &str, value: i64) -> Result<i64> {
    if value <= 0 {
        return Err(ShopError::Validation(format!(
            "{} must be a positive number (got {})",
            field, value
        )));
    }
    Ok(value)
}
