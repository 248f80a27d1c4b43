use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of roles; every identity record holds exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserRole {
    #[serde(rename = "ADMIN")]
    Administrator,
    #[serde(rename = "DOCTOR")]
    Clinician,
    #[serde(rename = "PATIENT")]
    Patient,
}

impl UserRole {
    pub const ALL: &'static [UserRole] = &[
        UserRole::Administrator,
        UserRole::Clinician,
        UserRole::Patient,
    ];

    #[inline]
    pub const fn code(&self) -> &'static str {
        use UserRole::*;
        match self {
            Administrator => "ADMIN",
            Clinician => "DOCTOR",
            Patient => "PATIENT",
        }
    }

    /// Parse a role from free-form input.
    ///
    /// Case-insensitive; accepts the stored codes and the long names
    /// `administrator` / `clinician`. Anything else is a validation error.
    pub fn from_code(code: &str) -> AppResult<Self> {
        use UserRole::*;
        match code.trim().to_ascii_uppercase().as_str() {
            "ADMIN" | "ADMINISTRATOR" => Ok(Administrator),
            "DOCTOR" | "CLINICIAN" => Ok(Clinician),
            "PATIENT" => Ok(Patient),
            _ => Err(AppError::bad_request(format!("Unknown role: {}", code.trim()))
                .with_action("Use one of ADMIN, DOCTOR, PATIENT")),
        }
    }
}

impl FromStr for UserRole {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        Self::from_code(s)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
