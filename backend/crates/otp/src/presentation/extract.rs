//! Parameter extractor

use axum::extract::{Form, FromRequest, Query, Request};
use serde::de::DeserializeOwned;

use crate::error::OtpError;

/// Query string when present, urlencoded body otherwise
pub struct Params<T>(pub T);

impl<S, T> FromRequest<S> for Params<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = OtpError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if req.uri().query().is_some_and(|q| !q.is_empty()) {
            let Query(params) = Query::<T>::try_from_uri(req.uri())
                .map_err(|e| OtpError::BadRequest(e.body_text()))?;
            return Ok(Params(params));
        }

        let Form(params) = Form::<T>::from_request(req, state)
            .await
            .map_err(|e| OtpError::BadRequest(e.body_text()))?;
        Ok(Params(params))
    }
}
