//! Phone Number Value Object
//!
//! Mandatory on every identity record and usable as a login identifier in
//! place of the email. Stored in a compact form: an optional leading `+`
//! followed by digits only.

use kernel::error::app_error::{AppError, AppResult};
use platform::identifier::compact_phone;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Accepts common formatting (spaces, dashes, dots, parentheses) and
    /// strips it.
    pub fn new(raw: impl AsRef<str>) -> AppResult<Self> {
        compact_phone(raw.as_ref())
            .map(Self)
            .map_err(|e| AppError::bad_request(e.to_string()))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(phone: impl Into<String>) -> Self {
        Self(phone.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_normalization() {
        assert_eq!(PhoneNumber::new("555").unwrap().as_str(), "555");
        assert_eq!(
            PhoneNumber::new("+1 (555) 010-9999").unwrap().as_str(),
            "+15550109999"
        );
    }

    #[test]
    fn test_phone_invalid() {
        assert!(PhoneNumber::new("").is_err());
        assert!(PhoneNumber::new("12").is_err());
        assert!(PhoneNumber::new("555-CALL-NOW").is_err());
        assert!(PhoneNumber::new("1".repeat(21)).is_err());
    }

    #[test]
    fn test_phone_error_messages() {
        assert_eq!(
            PhoneNumber::new("555-CALL-NOW").unwrap_err().message(),
            "Phone number may only contain digits and separators"
        );
        assert_eq!(
            PhoneNumber::new("12").unwrap_err().message(),
            "Phone number must have between 3 and 20 digits"
        );
    }
}
