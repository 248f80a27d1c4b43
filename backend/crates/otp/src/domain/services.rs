//! Domain services

use chrono::Duration;

use crate::domain::value_objects::OtpCode;

pub const EMAIL_SUBJECT: &str = "Your OTP Code";

/// Key under which the challenge for `raw` is stored.
///
/// Shares the login canonicalisation, so any spelling of a contact that
/// signs in as the same person also reaches the same challenge.
pub fn challenge_key(raw: &str) -> String {
    platform::identifier::canonical_login_identifier(raw)
}

/// Body of the delivered message
pub fn delivery_text(code: &OtpCode, ttl: Duration) -> String {
    let minutes = ttl.num_minutes().max(1);
    let unit = if minutes == 1 { "minute" } else { "minutes" };
    format!("Your OTP is: {}. It is valid for {minutes} {unit}.", code.as_str())
}
