//! Request parameters
//!
//! Accepted from the query string or an urlencoded body.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestOtpParams {
    #[serde(alias = "identifier")]
    pub email_or_phone_number: String,
    pub delivery_method: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpParams {
    #[serde(alias = "identifier")]
    pub email_or_phone_number: String,
    #[serde(alias = "code")]
    pub otp: String,
}
