//! Identity Routers
//!
//! Access rules are attached where routes are defined:
//!
//! | Prefix | Rule |
//! |---|---|
//! | `/api/v1/auth` | public (`/me` resolves the principal itself) |
//! | `/api/v1/admin` | administrator |
//! | `/api/v1/doctor` | clinician |
//! | `/api/v1/patient` | patient |
//! | `/api/v1/patients/{id}` | owner, administrator or clinician |

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post, put},
};
use std::sync::Arc;

use crate::application::access_policy::AccessRule;
use crate::application::token::TokenService;
use crate::domain::repository::{
    CredentialStore, ResourceKind, ResourceOwnership, WelcomeNotifier,
};
use crate::domain::value_object::UserRole;
use crate::presentation::handlers::{self, IdentityState};
use crate::presentation::middleware::{PolicyState, authenticate, enforce};

pub const ADMIN_ONLY: AccessRule = AccessRule::Roles(&[UserRole::Administrator]);
pub const CLINICIAN_ONLY: AccessRule = AccessRule::Roles(&[UserRole::Clinician]);
pub const PATIENT_ONLY: AccessRule = AccessRule::Roles(&[UserRole::Patient]);
pub const PATIENT_RECORD: AccessRule = AccessRule::OwnerOrRoles {
    resource: ResourceKind::Patient,
    roles: &[UserRole::Administrator, UserRole::Clinician],
};

/// Guard every route of `router` with `rule`.
///
/// Applied as a route layer, so unknown paths still fall through to 404.
pub fn protect<R>(router: Router, ownership: Arc<R>, rule: AccessRule) -> Router
where
    R: ResourceOwnership + Send + Sync + 'static,
{
    router.route_layer(from_fn_with_state(
        PolicyState { ownership, rule },
        enforce::<R>,
    ))
}

/// Outermost layer: resolve bearer tokens for every route, public ones
/// included.
pub fn with_authentication(router: Router, tokens: TokenService) -> Router {
    router.layer(from_fn_with_state(tokens, authenticate))
}

/// Public auth routes
pub fn auth_router<R, N>(state: IdentityState<R, N>) -> Router
where
    R: CredentialStore + ResourceOwnership + Send + Sync + 'static,
    N: WelcomeNotifier + Send + Sync + 'static,
{
    Router::new()
        .route("/login", post(handlers::login::<R, N>))
        .route("/register", post(handlers::register::<R, N>))
        .route("/me", get(handlers::me::<R, N>))
        .with_state(state)
}

pub fn admin_router<R, N>(state: IdentityState<R, N>) -> Router
where
    R: CredentialStore + ResourceOwnership + Send + Sync + 'static,
    N: WelcomeNotifier + Send + Sync + 'static,
{
    let ownership = state.repo.clone();
    let router = Router::new()
        .route("/users/{id}/role", put(handlers::change_role::<R, N>))
        .route("/principal", get(handlers::principal))
        .with_state(state);

    protect(router, ownership, ADMIN_ONLY)
}

pub fn patient_records_router<R, N>(state: IdentityState<R, N>) -> Router
where
    R: CredentialStore + ResourceOwnership + Send + Sync + 'static,
    N: WelcomeNotifier + Send + Sync + 'static,
{
    let ownership = state.repo.clone();
    let router = Router::new()
        .route("/{id}", get(handlers::get_patient::<R, N>))
        .with_state(state);

    protect(router, ownership, PATIENT_RECORD)
}

/// Role area with only the principal probe; other crates merge their
/// routes under the same prefix and guard.
fn role_area<R>(ownership: Arc<R>, rule: AccessRule) -> Router
where
    R: ResourceOwnership + Send + Sync + 'static,
{
    let router = Router::new().route("/principal", get(handlers::principal));
    protect(router, ownership, rule)
}

/// Every identity route under `/api/v1`, without the authentication layer.
pub fn identity_routes<R, N>(state: IdentityState<R, N>) -> Router
where
    R: CredentialStore + ResourceOwnership + Send + Sync + 'static,
    N: WelcomeNotifier + Send + Sync + 'static,
{
    let ownership = state.repo.clone();

    Router::new()
        .nest("/api/v1/auth", auth_router(state.clone()))
        .nest("/api/v1/admin", admin_router(state.clone()))
        .nest("/api/v1/doctor", role_area(ownership.clone(), CLINICIAN_ONLY))
        .nest("/api/v1/patient", role_area(ownership, PATIENT_ONLY))
        .nest("/api/v1/patients", patient_records_router(state))
}
