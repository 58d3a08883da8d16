//! Field formats for text validation

use regex::Regex;
use std::sync::OnceLock;

/// Text formats an appointment field may be required to match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldFormat {
    /// `name@domain.tld`, with a 2–3 letter final label
    Email,
    /// 10 or 11 digits, no separators (area code + number)
    Phone,
    /// 24-hour `HH:mm`
    Time24h,
}

impl FieldFormat {
    /// Check a raw string against this format
    pub fn is_match(&self, value: &str) -> bool {
        match self {
            FieldFormat::Email => Self::email_regex().is_match(value),
            FieldFormat::Phone => Self::phone_regex().is_match(value),
            FieldFormat::Time24h => Self::time_regex().is_match(value),
        }
    }

    fn email_regex() -> &'static Regex {
        static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
        EMAIL_REGEX.get_or_init(|| {
            Regex::new(r"^(?-u:\w+([.-]?\w+)*@\w+([.-]?\w+)*(\.\w{2,3})+)$").unwrap()
        })
    }

    fn phone_regex() -> &'static Regex {
        static PHONE_REGEX: OnceLock<Regex> = OnceLock::new();
        PHONE_REGEX.get_or_init(|| Regex::new(r"^[0-9]{10,11}$").unwrap())
    }

    fn time_regex() -> &'static Regex {
        static TIME_REGEX: OnceLock<Regex> = OnceLock::new();
        TIME_REGEX.get_or_init(|| Regex::new(r"^([01][0-9]|2[0-3]):([0-5][0-9])$").unwrap())
    }
}
