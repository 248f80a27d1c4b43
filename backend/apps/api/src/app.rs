//! Router composition

use std::sync::Arc;

use axum::http::{HeaderValue, Method, header};
use axum::routing::get;
use axum::{Json, Router};
use identity::domain::repository::{CredentialStore, ResourceOwnership};
use identity::infra::MailWelcomeNotifier;
use identity::presentation::{IdentityState, identity_routes, with_authentication};
use identity::AuthConfig;
use otp::{ChannelNotifier, OtpConfig, OtpRepository, OtpState, otp_router};
use platform::mail::MailTransport;
use platform::sms::LogSmsSender;
use serde_json::{Value, json};
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::contacts::IdentityContacts;

/// Everything the router needs besides storage
pub struct Services {
    pub auth: AuthConfig,
    pub otp: OtpConfig,
    pub mailer: MailTransport,
    pub frontend_origins: Vec<HeaderValue>,
}

/// Full HTTP surface over the given stores
pub fn build_router<S, O>(store: S, otp_store: O, services: Services) -> Router
where
    S: CredentialStore + ResourceOwnership + Send + Sync + 'static,
    O: OtpRepository + Send + Sync + 'static,
{
    let identity = IdentityState::new(
        store,
        MailWelcomeNotifier::new(services.mailer.clone()),
        services.auth,
    );
    let tokens = identity.tokens.clone();

    let otp = OtpState::new(
        otp_store,
        IdentityContacts::new(Arc::clone(&identity.repo)),
        ChannelNotifier::new(services.mailer, LogSmsSender),
        services.otp,
    );

    let routes = identity_routes(identity)
        .nest("/api/otp", otp_router(otp))
        .route("/health", get(health));

    with_authentication(routes, tokens)
        .layer(TraceLayer::new_for_http())
        .layer(cors(services.frontend_origins))
}

fn cors(origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
