//! Validation and filtering system
//!
//! Inputs are first normalized with [`filters`], then each field runs through
//! an ordered chain of [`validators`]. A [`FieldReport`] collects at most one
//! error per field, so callers get a complete list in a single pass.

pub mod filters;
pub mod validators;

use crate::core::error::FieldValidationError;
pub use validators::FieldValidator;

/// Accumulates field errors while a record is checked
#[derive(Debug, Default)]
pub struct FieldReport {
    errors: Vec<FieldValidationError>,
}

impl FieldReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `validators` in order against `value`, recording the first failure.
    ///
    /// Returns `true` when the field passed every validator.
    pub fn check(&mut self, field: &str, value: Option<&str>, validators: &[&FieldValidator]) -> bool {
        for validator in validators {
            if let Err(message) = validator(field, value) {
                self.push(field, message);
                return false;
            }
        }
        true
    }

    /// Record an error computed outside the validator chain
    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(FieldValidationError::new(field, message));
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_errors(self) -> Vec<FieldValidationError> {
        self.errors
    }
}
