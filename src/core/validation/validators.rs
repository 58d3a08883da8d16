//! Reusable field validators
//!
//! A validator receives the field name and its (already filtered) raw value
//! and either accepts it or returns the message to report for that field.
//! Apart from [`required`], validators accept a missing value so they can be
//! chained after it.

use crate::core::field::FieldFormat;

/// Signature shared by every validator
pub type FieldValidator = dyn Fn(&str, Option<&str>) -> Result<(), String> + Send + Sync;

/// Validator: field must be present and not blank
pub fn required() -> impl Fn(&str, Option<&str>) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: Option<&str>| match value {
        Some(v) if !v.trim().is_empty() => Ok(()),
        _ => Err(format!("{} is required", field)),
    }
}

/// Validator: character count must be within `min..=max`
pub fn char_length(
    min: usize,
    max: usize,
) -> impl Fn(&str, Option<&str>) -> Result<(), String> + Send + Sync + Clone {
    move |field: &str, value: Option<&str>| {
        let Some(s) = value else {
            return Ok(());
        };
        let len = s.chars().count();
        if len < min {
            Err(format!(
                "{} must have at least {} characters (got {})",
                field, min, len
            ))
        } else if len > max {
            Err(format!(
                "{} must not exceed {} characters (got {})",
                field, max, len
            ))
        } else {
            Ok(())
        }
    }
}

/// Validator: character count must not exceed `max`
pub fn max_chars(max: usize) -> impl Fn(&str, Option<&str>) -> Result<(), String> + Send + Sync + Clone {
    char_length(0, max)
}

/// Validator: value must match a [`FieldFormat`]
pub fn format(
    format: FieldFormat,
    message: &'static str,
) -> impl Fn(&str, Option<&str>) -> Result<(), String> + Send + Sync + Clone {
    move |_: &str, value: Option<&str>| match value {
        Some(s) if !format.is_match(s) => Err(message.to_string()),
        _ => Ok(()),
    }
}

/// Validator: value must be one of the allowed wire names
pub fn one_of(
    allowed: &'static [&'static str],
) -> impl Fn(&str, Option<&str>) -> Result<(), String> + Send + Sync + Clone {
    move |field: &str, value: Option<&str>| match value {
        Some(s) if !allowed.contains(&s) => Err(format!(
            "{} must be one of: {} (got '{}')",
            field,
            allowed.join(", "),
            s
        )),
        _ => Ok(()),
    }
}
