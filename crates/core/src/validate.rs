//! Required-field validation for form submissions.
//!
//! Every draft type implements [`Validate`]. Callers validate before touching
//! storage, so a rejected submission never mutates a persisted collection.

use serde::Serialize;

/// A single rejected form field.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Name of the offending field, as it appears in the form payload.
    pub field: &'static str,
    /// Message suitable for a notification toast.
    pub message: String,
}

impl ValidationError {
    /// Create a validation error for `field`.
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Implemented by every form payload.
pub trait Validate {
    /// Check the payload, returning the first problem found.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming the field that failed.
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Reject empty or whitespace-only text.
///
/// # Errors
///
/// Returns a "required" [`ValidationError`] for `field`.
pub fn required(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, format!("{field} is required")));
    }
    Ok(())
}

/// Reject an empty list.
///
/// # Errors
///
/// Returns a [`ValidationError`] for `field` when `items` is empty.
pub fn non_empty<T>(field: &'static str, items: &[T]) -> Result<(), ValidationError> {
    if items.is_empty() {
        return Err(ValidationError::new(
            field,
            format!("at least one {field} entry is required"),
        ));
    }
    Ok(())
}
