//! Value objects

use std::fmt;
use std::str::FromStr;

use crate::error::OtpError;

/// Numeric one-time code, fixed width, no leading zero
#[derive(Clone, PartialEq, Eq)]
pub struct OtpCode(String);

impl OtpCode {
    /// Uniform over `[10^(width-1), 10^width - 1]`
    pub fn generate(width: u32) -> Self {
        let width = width.clamp(4, 9);
        let low = 10u32.pow(width - 1);
        let high = 10u32.pow(width) - 1;
        Self(platform::crypto::random_in_range(low, high).to_string())
    }

    pub fn from_stored(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Exact match, compared in constant time
    pub fn matches(&self, candidate: &str) -> bool {
        platform::crypto::constant_time_eq(self.0.as_bytes(), candidate.as_bytes())
    }
}

// Codes never reach logs through Debug
impl fmt::Debug for OtpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("OtpCode(******)")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryMethod {
    Email,
    Sms,
}

impl FromStr for DeliveryMethod {
    type Err = OtpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "email" => Ok(DeliveryMethod::Email),
            "sms" => Ok(DeliveryMethod::Sms),
            _ => Err(OtpError::InvalidDeliveryMethod),
        }
    }
}

/// Contact values on file for an identity record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactDetails {
    pub email: Option<String>,
    pub phone_number: Option<String>,
}

impl ContactDetails {
    /// Picks the address for the channel; `None` when the record has no value for it
    pub fn destination(&self, method: DeliveryMethod) -> Option<Destination> {
        let present = |v: &Option<String>| {
            v.as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_owned)
        };
        match method {
            DeliveryMethod::Email => present(&self.email).map(Destination::Email),
            DeliveryMethod::Sms => present(&self.phone_number).map(Destination::Phone),
        }
    }
}

/// Where a code is sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Email(String),
    Phone(String),
}

impl Destination {
    pub fn address(&self) -> &str {
        match self {
            Destination::Email(a) | Destination::Phone(a) => a,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_codes_have_fixed_width() {
        for _ in 0..200 {
            let code = OtpCode::generate(6);
            assert_eq!(code.as_str().len(), 6);
            let n: u32 = code.as_str().parse().unwrap();
            assert!((100_000..=999_999).contains(&n));
        }
    }

    #[test]
    fn match_is_exact() {
        let code = OtpCode::from_stored("123456");
        assert!(code.matches("123456"));
        assert!(!code.matches("123457"));
        assert!(!code.matches(" 123456"));
        assert!(!code.matches(""));
    }

    #[test]
    fn debug_hides_the_code() {
        let code = OtpCode::from_stored("123456");
        assert!(!format!("{code:?}").contains("123456"));
    }

    #[test]
    fn delivery_method_is_case_insensitive() {
        assert_eq!("EMAIL".parse::<DeliveryMethod>().unwrap(), DeliveryMethod::Email);
        assert_eq!(" sms ".parse::<DeliveryMethod>().unwrap(), DeliveryMethod::Sms);
        assert!(matches!(
            "pigeon".parse::<DeliveryMethod>(),
            Err(OtpError::InvalidDeliveryMethod)
        ));
    }

    #[test]
    fn destination_requires_contact_value() {
        let contact = ContactDetails {
            email: None,
            phone_number: Some("555".into()),
        };
        assert_eq!(contact.destination(DeliveryMethod::Email), None);
        assert_eq!(
            contact.destination(DeliveryMethod::Sms),
            Some(Destination::Phone("555".into()))
        );

        let blank = ContactDetails {
            email: Some("  ".into()),
            phone_number: None,
        };
        assert_eq!(blank.destination(DeliveryMethod::Email), None);
    }
}
