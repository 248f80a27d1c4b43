//! HTTP Handlers

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::config::AuthConfig;
use crate::application::token::TokenService;
use crate::application::{
    ChangeRoleInput, ChangeRoleUseCase, CurrentUserUseCase, LoginInput, LoginUseCase,
    RegisterInput, RegisterUseCase,
};
use crate::domain::entity::principal::Principal;
use crate::domain::repository::{
    CredentialStore, ResourceKind, ResourceOwnership, WelcomeNotifier,
};
use crate::domain::value_object::UserId;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    ChangeRoleRequest, LoginRequest, LoginResponse, PatientResponse, RegisterRequest,
    UserResponse,
};
use crate::presentation::extract::{CurrentPrincipal, MaybePrincipal};

/// Shared state for identity handlers
pub struct IdentityState<R, N> {
    pub repo: Arc<R>,
    pub notifier: Arc<N>,
    pub tokens: TokenService,
    pub config: Arc<AuthConfig>,
}

impl<R, N> IdentityState<R, N> {
    pub fn new(repo: R, notifier: N, config: AuthConfig) -> Self {
        let config = Arc::new(config);
        Self {
            repo: Arc::new(repo),
            notifier: Arc::new(notifier),
            tokens: TokenService::new(config.clone()),
            config,
        }
    }
}

impl<R, N> Clone for IdentityState<R, N> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            notifier: self.notifier.clone(),
            tokens: self.tokens.clone(),
            config: self.config.clone(),
        }
    }
}

// ============================================================================
// Auth
// ============================================================================

/// POST /api/v1/auth/login
pub async fn login<R, N>(
    State(state): State<IdentityState<R, N>>,
    Json(req): Json<LoginRequest>,
) -> AuthResult<Json<LoginResponse>>
where
    R: CredentialStore + ResourceOwnership + Send + Sync + 'static,
    N: WelcomeNotifier + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(state.repo.clone(), state.tokens.clone(), state.config.clone());

    let output = use_case
        .execute(LoginInput {
            identifier: req.identifier,
            password: req.password,
        })
        .await?;

    Ok(Json(LoginResponse {
        token: output.token.token,
        token_type: "Bearer",
        expires_at: output.token.expires_at,
        user: UserResponse::from(&output.user),
    }))
}

/// POST /api/v1/auth/register
pub async fn register<R, N>(
    State(state): State<IdentityState<R, N>>,
    Json(req): Json<RegisterRequest>,
) -> AuthResult<(StatusCode, Json<UserResponse>)>
where
    R: CredentialStore + ResourceOwnership + Send + Sync + 'static,
    N: WelcomeNotifier + Send + Sync + 'static,
{
    let use_case =
        RegisterUseCase::new(state.repo.clone(), state.notifier.clone(), state.config.clone());

    let user = use_case
        .execute(RegisterInput {
            first_name: req.first_name,
            last_name: req.last_name,
            user_name: req.user_name,
            email: req.email,
            phone_number: req.phone_number,
            password: req.password,
            role: req.role,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

/// GET /api/v1/auth/me
pub async fn me<R, N>(
    State(state): State<IdentityState<R, N>>,
    MaybePrincipal(principal): MaybePrincipal,
) -> AuthResult<Json<UserResponse>>
where
    R: CredentialStore + ResourceOwnership + Send + Sync + 'static,
    N: WelcomeNotifier + Send + Sync + 'static,
{
    let user = CurrentUserUseCase::new(state.repo.clone())
        .execute(principal.as_ref())
        .await?;

    Ok(Json(UserResponse::from(&user)))
}

// ============================================================================
// Administration
// ============================================================================

/// PUT /api/v1/admin/users/{id}/role
pub async fn change_role<R, N>(
    State(state): State<IdentityState<R, N>>,
    CurrentPrincipal(actor): CurrentPrincipal,
    Path(user_id): Path<Uuid>,
    Json(req): Json<ChangeRoleRequest>,
) -> AuthResult<Json<UserResponse>>
where
    R: CredentialStore + ResourceOwnership + Send + Sync + 'static,
    N: WelcomeNotifier + Send + Sync + 'static,
{
    let user = ChangeRoleUseCase::new(state.repo.clone())
        .execute(
            &actor,
            ChangeRoleInput {
                user_id: UserId::from_uuid(user_id),
                role: req.role,
            },
        )
        .await?;

    Ok(Json(UserResponse::from(&user)))
}

// ============================================================================
// Patient records
// ============================================================================

/// GET /api/v1/patients/{id}
///
/// Reached only after the owner-or-role rule passed.
pub async fn get_patient<R, N>(
    State(state): State<IdentityState<R, N>>,
    Path(patient_id): Path<String>,
) -> AuthResult<Json<PatientResponse>>
where
    R: CredentialStore + ResourceOwnership + Send + Sync + 'static,
    N: WelcomeNotifier + Send + Sync + 'static,
{
    let owner = state
        .repo
        .owner_of(ResourceKind::Patient, &patient_id)
        .await?
        .ok_or(AuthError::PatientNotFound)?;

    let user = state
        .repo
        .find_by_id(&owner.user_id)
        .await?
        .ok_or(AuthError::PatientNotFound)?;

    Ok(Json(PatientResponse {
        patient_id,
        owner: UserResponse::from(&user),
    }))
}

// ============================================================================
// Role areas
// ============================================================================

/// GET /api/v1/{admin,doctor,patient}/principal
///
/// Echoes the principal the role guard admitted.
pub async fn principal(CurrentPrincipal(principal): CurrentPrincipal) -> Json<Principal> {
    Json(principal)
}
