//! Reusable argument checks shared by the domain and the API boundary.

use crate::errors::{Result, ValidationError};

/// Ensures an identifier is a positive integer.
///
/// `name` is the parameter name reported back to the caller, e.g. `"userId"`.
pub fn ensure_valid_id(id: i32, name: &'static str) -> Result<()> {
    if id < 1 {
        let message = format!("{name} is less than 1.");
        return Err(ValidationError::out_of_range(name, id, message).into());
    }
    Ok(())
}

/// Ensures a required text field is present and not blank.
pub fn ensure_not_empty(value: &str, name: &'static str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(
            ValidationError::InvalidInput(format!("'{name}' must not be empty.")).into(),
        );
    }
    Ok(())
}

/// Ensures a text field holds at most `max` characters, counted as UTF-16
/// code units the way the web clients measure them.
pub fn ensure_max_length(value: &str, max: usize, name: &'static str) -> Result<()> {
    let length = value.encode_utf16().count();
    if length > max {
        return Err(ValidationError::InvalidInput(format!(
            "The length of '{name}' must be {max} characters or fewer. You entered {length} characters."
        ))
        .into());
    }
    Ok(())
}
