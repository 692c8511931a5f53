//! Input checks shared by the create/update handlers.

use crate::error::CoreError;

/// Require a string field to contain something other than whitespace.
pub fn validate_non_blank(value: &str, field: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

/// Hours must be a finite, non-negative number.
pub fn validate_hours(value: f64, field: &str) -> Result<(), CoreError> {
    if !value.is_finite() || value < 0.0 {
        return Err(CoreError::Validation(format!(
            "{field} must be a non-negative number, got {value}"
        )));
    }
    Ok(())
}

/// Rates, budgets and forecasts are whole, non-negative numbers.
pub fn validate_non_negative(value: i64, field: &str) -> Result<(), CoreError> {
    if value < 0 {
        return Err(CoreError::Validation(format!(
            "{field} must not be negative, got {value}"
        )));
    }
    Ok(())
}

/// Minimal shape check: one `@` with text on both sides and no whitespace.
pub fn validate_email(value: &str) -> Result<(), CoreError> {
    let valid = match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !value.chars().any(char::is_whitespace)
        }
        None => false,
    };
    if !valid {
        return Err(CoreError::Validation(format!(
            "'{value}' is not a valid email address"
        )));
    }
    Ok(())
}
