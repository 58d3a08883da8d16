//! Reusable field filters
//!
//! These filters normalize raw input values before validation

/// Filter: trim surrounding whitespace
pub fn trim(value: Option<String>) -> Option<String> {
    value.map(|s| s.trim().to_string())
}

/// Filter: trim and convert to lowercase
pub fn lowercase(value: Option<String>) -> Option<String> {
    trim(value).map(|s| s.to_lowercase())
}

/// Filter: trim, turning blank strings into a missing value
pub fn empty_as_none(value: Option<String>) -> Option<String> {
    trim(value).filter(|s| !s.is_empty())
}
