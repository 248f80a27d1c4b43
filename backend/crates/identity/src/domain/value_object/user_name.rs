//! User Name Value Object
//!
//! Display handle of an identity record. Unique across records,
//! compared case-insensitively.
//!
//! Rules (after NFKC normalisation and trimming):
//! - 3 to 30 characters
//! - ASCII letters, digits and `_ . - +`
//! - at least one letter or digit

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use unicode_normalization::UnicodeNormalization;

pub const USER_NAME_MIN_LENGTH: usize = 3;
pub const USER_NAME_MAX_LENGTH: usize = 30;

const ALLOWED_SPECIAL_CHARS: &[char] = &['_', '.', '-', '+'];

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserName {
    /// As entered (normalised)
    original: String,
    /// Lowercase form used for uniqueness
    canonical: String,
}

impl UserName {
    pub fn new(raw: impl AsRef<str>) -> AppResult<Self> {
        let normalized: String = raw.as_ref().nfkc().collect();
        let name = normalized.trim();

        let len = name.chars().count();
        if len < USER_NAME_MIN_LENGTH || len > USER_NAME_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "User name must be between {} and {} characters",
                USER_NAME_MIN_LENGTH, USER_NAME_MAX_LENGTH
            )));
        }

        if !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || ALLOWED_SPECIAL_CHARS.contains(&c))
        {
            return Err(AppError::bad_request(
                "User name may only contain letters, digits and _ . - +",
            ));
        }

        if !name.chars().any(|c| c.is_ascii_alphanumeric()) {
            return Err(AppError::bad_request(
                "User name must contain at least one letter or digit",
            ));
        }

        Ok(Self {
            original: name.to_string(),
            canonical: name.to_ascii_lowercase(),
        })
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(original: impl Into<String>) -> Self {
        let original = original.into();
        let canonical = original.to_ascii_lowercase();
        Self {
            original,
            canonical,
        }
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn canonical(&self) -> &str {
        &self.canonical
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}
