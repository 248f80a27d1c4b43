//! Identity Middleware
//!
//! - [`authenticate`] runs on every request: a valid bearer token becomes a
//!   [`Principal`] in the request extensions. A missing, forged or expired
//!   token leaves the request anonymous; rejecting it is the policy's job.
//! - [`enforce`] runs on protected routes and applies their [`AccessRule`].

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{ConnectInfo, FromRequestParts, Path, Request, State};
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use platform::client::{extract_bearer_token, extract_client_ip};
use platform::crypto::fingerprint;

use crate::application::access_policy::{AccessPolicy, AccessRule};
use crate::application::token::TokenService;
use crate::domain::entity::principal::Principal;
use crate::domain::repository::ResourceOwnership;
use crate::error::AuthError;

/// Path parameter owner rules read the resource id from
pub const RESOURCE_ID_PARAM: &str = "id";

pub async fn authenticate(
    State(tokens): State<TokenService>,
    mut request: Request,
    next: Next,
) -> Response {
    // Never trust a principal that did not come from this request's token.
    request.extensions_mut().remove::<Principal>();

    let outcome = extract_bearer_token(request.headers())
        .map(|token| (tokens.validate(token), fingerprint(token.as_bytes())));

    match outcome {
        Some((Ok(principal), _)) => {
            tracing::debug!(subject = %principal.subject, role = %principal.role, "Bearer token accepted");
            request.extensions_mut().insert(principal);
        }
        Some((Err(AuthError::TokenExpired), token_fp)) => {
            tracing::debug!(token_fp = %token_fp, "Expired bearer token");
        }
        Some((Err(AuthError::TokenInvalid), token_fp)) => {
            tracing::warn!(
                token_fp = %token_fp,
                path = %request.uri().path(),
                "Bearer token failed verification"
            );
        }
        Some((Err(e), _)) => {
            tracing::error!(error = %e, "Bearer token could not be checked");
        }
        None => {}
    }

    next.run(request).await
}

/// State for [`enforce`]: the rule of the routes it guards
pub struct PolicyState<R> {
    pub ownership: Arc<R>,
    pub rule: AccessRule,
}

impl<R> Clone for PolicyState<R> {
    fn clone(&self) -> Self {
        Self {
            ownership: self.ownership.clone(),
            rule: self.rule,
        }
    }
}

pub async fn enforce<R>(State(state): State<PolicyState<R>>, request: Request, next: Next) -> Response
where
    R: ResourceOwnership + Send + Sync + 'static,
{
    let (mut parts, body) = request.into_parts();

    let resource_id = if state.rule.requires_resource_id() {
        resource_id(&mut parts).await
    } else {
        None
    };

    let principal = parts.extensions.get::<Principal>().cloned();
    let policy = AccessPolicy::new(state.ownership.clone());

    match policy
        .evaluate(&state.rule, principal.as_ref(), resource_id.as_deref())
        .await
    {
        Ok(()) => next.run(Request::from_parts(parts, body)).await,
        Err(err) => {
            audit_denial(&parts, principal.as_ref(), &err);
            err.into_response()
        }
    }
}

async fn resource_id(parts: &mut Parts) -> Option<String> {
    let Path(mut params) = Path::<HashMap<String, String>>::from_request_parts(parts, &())
        .await
        .ok()?;
    params.remove(RESOURCE_ID_PARAM)
}

fn audit_denial(parts: &Parts, principal: Option<&Principal>, err: &AuthError) {
    let direct_ip = parts
        .extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip());
    let client_ip = extract_client_ip(&parts.headers, direct_ip)
        .map(|ip| ip.to_string())
        .unwrap_or_default();
    let path = parts.uri.path();
    let method = parts.method.as_str();

    match (err, principal) {
        (AuthError::Forbidden, Some(p)) => tracing::warn!(
            subject = %p.subject,
            role = %p.role,
            method,
            path,
            client_ip = %client_ip,
            "Access denied: forbidden"
        ),
        (AuthError::Unauthenticated, _) => tracing::warn!(
            method,
            path,
            client_ip = %client_ip,
            "Access denied: unauthenticated"
        ),
        _ => tracing::error!(error = %err, method, path, "Access check failed"),
    }
}
