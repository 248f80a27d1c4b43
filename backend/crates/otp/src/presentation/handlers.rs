//! HTTP handlers

use std::sync::Arc;

use axum::extract::State;

use crate::application::config::OtpConfig;
use crate::application::{RequestOtpInput, RequestOtpUseCase, VerifyOtpInput, VerifyOtpUseCase};
use crate::domain::repository::{ContactDirectory, OtpNotifier, OtpRepository};
use crate::error::OtpResult;
use crate::presentation::dto::{RequestOtpParams, VerifyOtpParams};
use crate::presentation::extract::Params;

pub const VERIFIED: &str = "OTP verified successfully";

pub struct OtpState<R, C, N> {
    pub repo: Arc<R>,
    pub contacts: Arc<C>,
    pub notifier: Arc<N>,
    pub config: OtpConfig,
}

impl<R, C, N> OtpState<R, C, N> {
    pub fn new(repo: R, contacts: C, notifier: N, config: OtpConfig) -> Self {
        Self {
            repo: Arc::new(repo),
            contacts: Arc::new(contacts),
            notifier: Arc::new(notifier),
            config,
        }
    }
}

impl<R, C, N> Clone for OtpState<R, C, N> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            contacts: self.contacts.clone(),
            notifier: self.notifier.clone(),
            config: self.config.clone(),
        }
    }
}

/// POST /api/otp/request
pub async fn request_otp<R, C, N>(
    State(state): State<OtpState<R, C, N>>,
    Params(params): Params<RequestOtpParams>,
) -> OtpResult<String>
where
    R: OtpRepository + Send + Sync + 'static,
    C: ContactDirectory + Send + Sync + 'static,
    N: OtpNotifier + Send + Sync + 'static,
{
    let use_case = RequestOtpUseCase::new(
        state.repo.clone(),
        state.contacts.clone(),
        state.notifier.clone(),
        state.config.clone(),
    );

    let sent = use_case
        .execute(RequestOtpInput {
            identifier: params.email_or_phone_number,
            delivery_method: params.delivery_method,
        })
        .await?;

    Ok(sent.to_string())
}

/// POST /api/otp/verify
pub async fn verify_otp<R, C, N>(
    State(state): State<OtpState<R, C, N>>,
    Params(params): Params<VerifyOtpParams>,
) -> OtpResult<String>
where
    R: OtpRepository + Send + Sync + 'static,
    C: ContactDirectory + Send + Sync + 'static,
    N: OtpNotifier + Send + Sync + 'static,
{
    VerifyOtpUseCase::new(state.repo.clone())
        .execute(VerifyOtpInput {
            identifier: params.email_or_phone_number,
            code: params.otp,
        })
        .await?;

    Ok(VERIFIED.to_string())
}
