//! Validation Utilities

use std::borrow::Cow;

use validator::{ValidationError, ValidationErrors};

use super::error::AppError;

/// Convert validation errors to AppError
pub fn validation_error(errors: ValidationErrors) -> AppError {
    let mut fields: Vec<(String, String)> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                (
                    field.to_string(),
                    e.message.clone().map(|m| m.to_string()).unwrap_or_default(),
                )
            })
        })
        .collect();
    // HashMap iteration order is arbitrary
    fields.sort();

    let message = fields
        .first()
        .map(|(field, msg)| format!("{}: {}", field, msg))
        .unwrap_or_else(|| "Validation failed".into());

    AppError::Validation(message)
}

/// Rejects empty and whitespace-only strings.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message(Cow::Borrowed("Missing data")));
    }
    Ok(())
}
