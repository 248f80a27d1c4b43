//! Login identifier canonicalisation
//!
//! A person signs in (and requests one-time codes) with either an email
//! address or a phone number. Every lookup and every keyed record goes
//! through [`canonical_login_identifier`] so that differently formatted
//! inputs for the same contact meet in one place.

use thiserror::Error;

pub const PHONE_MIN_DIGITS: usize = 3;
pub const PHONE_MAX_DIGITS: usize = 20;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PhoneFormatError {
    #[error("Phone number is required")]
    Empty,

    #[error("Phone number may only contain digits and separators")]
    InvalidCharacter,

    #[error(
        "Phone number must have between {} and {} digits",
        PHONE_MIN_DIGITS,
        PHONE_MAX_DIGITS
    )]
    DigitCount,
}

/// Compact a phone number to an optional leading `+` followed by digits.
///
/// Spaces, dashes, dots and parentheses are accepted as separators and
/// dropped.
pub fn compact_phone(raw: &str) -> Result<String, PhoneFormatError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(PhoneFormatError::Empty);
    }

    let (prefix, rest) = match raw.strip_prefix('+') {
        Some(rest) => ("+", rest),
        None => ("", raw),
    };

    let mut digits = String::with_capacity(rest.len());
    for c in rest.chars() {
        match c {
            '0'..='9' => digits.push(c),
            ' ' | '-' | '.' | '(' | ')' => {}
            _ => return Err(PhoneFormatError::InvalidCharacter),
        }
    }

    if !(PHONE_MIN_DIGITS..=PHONE_MAX_DIGITS).contains(&digits.len()) {
        return Err(PhoneFormatError::DigitCount);
    }

    Ok(format!("{prefix}{digits}"))
}

/// Emails are lowercased; anything that parses as a phone number is
/// compacted; other input is only trimmed.
pub fn canonical_login_identifier(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.contains('@') {
        return trimmed.to_lowercase();
    }
    compact_phone(trimmed).unwrap_or_else(|_| trimmed.to_string())
}
