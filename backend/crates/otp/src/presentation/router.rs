//! OTP router

use axum::Router;
use axum::routing::post;

use crate::domain::repository::{ContactDirectory, OtpNotifier, OtpRepository};
use crate::presentation::handlers::{self, OtpState};

/// Routes relative to the mount point (`/api/otp`). No authentication.
pub fn otp_router<R, C, N>(state: OtpState<R, C, N>) -> Router
where
    R: OtpRepository + Send + Sync + 'static,
    C: ContactDirectory + Send + Sync + 'static,
    N: OtpNotifier + Send + Sync + 'static,
{
    Router::new()
        .route("/request", post(handlers::request_otp::<R, C, N>))
        .route("/verify", post(handlers::verify_otp::<R, C, N>))
        .with_state(state)
}
