//! First / last name of the person behind an identity record

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};

const PERSON_NAME_MAX_LENGTH: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonName(String);

impl PersonName {
    /// `field` names the input in error messages ("First name", "Last name").
    pub fn new(raw: impl AsRef<str>, field: &'static str) -> AppResult<Self> {
        let name = raw.as_ref().trim();
        if name.is_empty() {
            return Err(AppError::bad_request(format!("{field} cannot be empty")));
        }
        if name.chars().count() > PERSON_NAME_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "{field} must be at most {PERSON_NAME_MAX_LENGTH} characters"
            )));
        }
        if name.chars().any(char::is_control) {
            return Err(AppError::bad_request(format!(
                "{field} contains invalid characters"
            )));
        }
        Ok(Self(name.to_string()))
    }

    pub fn from_db(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PersonName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_person_name() {
        assert_eq!(PersonName::new("  Ada ", "First name").unwrap().as_str(), "Ada");
        let err = PersonName::new("   ", "Last name").unwrap_err();
        assert_eq!(err.message(), "Last name cannot be empty");
        assert!(PersonName::new("Ada\u{0000}", "First name").is_err());
    }
}
