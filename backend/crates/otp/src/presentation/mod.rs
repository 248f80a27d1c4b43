pub mod dto;
pub mod extract;
pub mod handlers;
pub mod router;

pub use handlers::OtpState;
pub use router::otp_router;
