//! User Entity
//!
//! One identity record: who the person is, how they log in, and the single
//! role they hold.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    Email, PersonName, PhoneNumber, UserId, UserName, UserPassword, UserRole,
};

#[derive(Debug, Clone)]
pub struct User {
    /// Surrogate key, immutable once assigned
    pub user_id: UserId,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub user_name: UserName,
    /// Unique among records that set it
    pub email: Option<Email>,
    /// Unique, alternate login identifier
    pub phone_number: PhoneNumber,
    pub password: UserPassword,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated registration profile
#[derive(Debug)]
pub struct NewUser {
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub user_name: UserName,
    pub email: Option<Email>,
    pub phone_number: PhoneNumber,
    pub role: UserRole,
}

impl User {
    pub fn new(profile: NewUser, password: UserPassword, now: DateTime<Utc>) -> Self {
        Self {
            user_id: UserId::new(),
            first_name: profile.first_name,
            last_name: profile.last_name,
            user_name: profile.user_name,
            email: profile.email,
            phone_number: profile.phone_number,
            password,
            role: profile.role,
            created_at: now,
            updated_at: now,
        }
    }

    /// Canonical login identifier: the email when set, else the phone number.
    ///
    /// This is the token subject and what ownership checks compare against.
    pub fn login_identifier(&self) -> &str {
        match &self.email {
            Some(email) => email.as_str(),
            None => self.phone_number.as_str(),
        }
    }

    /// Whether `identifier` (already normalised) names this record
    pub fn answers_to(&self, identifier: &str) -> bool {
        self.email.as_ref().is_some_and(|e| e.as_str() == identifier)
            || self.phone_number.as_str() == identifier
    }

    pub fn set_role(&mut self, role: UserRole, now: DateTime<Utc>) {
        self.role = role;
        self.updated_at = now;
    }
}

/// Normalise free-form login input the same way the value objects do, so it
/// can be compared with stored email / phone values.
///
/// Input containing `@` is treated as an email and lowercased; anything that
/// parses as a phone number is compacted; everything else is only trimmed.
pub fn normalize_login_identifier(raw: &str) -> String {
    platform::identifier::canonical_login_identifier(raw)
}
