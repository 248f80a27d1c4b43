pub mod config;
pub mod request_otp;
pub mod verify_otp;

pub use request_otp::{OtpSent, RequestOtpInput, RequestOtpUseCase};
pub use verify_otp::{VerifyOtpInput, VerifyOtpUseCase};
