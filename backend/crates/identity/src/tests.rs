//! Router-level scenarios over the in-memory store

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::WelcomeNotifier;
use crate::domain::value_object::{PatientId, UserId};
use crate::error::{AuthError, AuthResult};
use crate::infra::memory::MemoryCredentialStore;
use crate::presentation::handlers::IdentityState;
use crate::presentation::router::{identity_routes, with_authentication};

#[derive(Clone, Default)]
struct RecordingNotifier {
    sent: Arc<Mutex<Vec<String>>>,
}

impl WelcomeNotifier for RecordingNotifier {
    async fn send_welcome(&self, user: &User) -> AuthResult<()> {
        if let Some(email) = &user.email {
            self.sent.lock().unwrap().push(email.to_string());
        }
        Ok(())
    }
}

struct FailingNotifier;

impl WelcomeNotifier for FailingNotifier {
    async fn send_welcome(&self, _user: &User) -> AuthResult<()> {
        Err(AuthError::Internal("smtp relay refused connection".to_string()))
    }
}

struct TestApp {
    router: Router,
    store: MemoryCredentialStore,
    notifier: RecordingNotifier,
}

fn test_app() -> TestApp {
    let store = MemoryCredentialStore::new();
    let notifier = RecordingNotifier::default();
    let state = IdentityState::new(store.clone(), notifier.clone(), AuthConfig::development());
    let router = with_authentication(identity_routes(state.clone()), state.tokens.clone());
    TestApp {
        router,
        store,
        notifier,
    }
}

async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

fn profile(user_name: &str, email: Option<&str>, phone: &str, role: &str) -> Value {
    json!({
        "firstName": "Test",
        "lastName": "Person",
        "userName": user_name,
        "email": email,
        "phoneNumber": phone,
        "password": "pw123456",
        "role": role,
    })
}

async fn register(app: &TestApp, body: Value) -> (StatusCode, Value) {
    send(&app.router, Method::POST, "/api/v1/auth/register", None, Some(body)).await
}

async fn login(app: &TestApp, identifier: &str, password: &str) -> (StatusCode, Value) {
    send(
        &app.router,
        Method::POST,
        "/api/v1/auth/login",
        None,
        Some(json!({ "identifier": identifier, "password": password })),
    )
    .await
}

async fn token_for(app: &TestApp, identifier: &str) -> String {
    let (status, body) = login(app, identifier, "pw123456").await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    body["token"].as_str().unwrap().to_string()
}

fn user_id(body: &Value) -> UserId {
    body["id"].as_str().unwrap().parse().unwrap()
}

#[tokio::test]
async fn register_login_me_scenario() {
    let app = test_app();

    let (status, registered) = register(&app, profile("alice", Some("a@x.com"), "555", "PATIENT")).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(registered["email"], "a@x.com");
    assert_eq!(registered["role"], "PATIENT");
    assert!(registered.get("password").is_none());

    let (status, logged_in) = login(&app, "a@x.com", "pw123456").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(logged_in["tokenType"], "Bearer");
    let token = logged_in["token"].as_str().unwrap();

    let (status, me) = send(&app.router, Method::GET, "/api/v1/auth/me", Some(token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me, registered);

    let (wrong_password, wrong_password_body) = login(&app, "a@x.com", "pw1234567").await;
    let (unknown_user, unknown_user_body) = login(&app, "b@x.com", "pw123456").await;
    assert_eq!(wrong_password, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password_body, unknown_user_body);
    assert_eq!(wrong_password_body["detail"], "Invalid credentials");
}

#[tokio::test]
async fn login_accepts_phone_number() {
    let app = test_app();
    register(&app, profile("bob", None, "+1 555 0100", "DOCTOR")).await;

    let (status, body) = login(&app, "+15550100", "pw123456").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["role"], "DOCTOR");
}

#[tokio::test]
async fn duplicate_email_is_rejected_without_side_effects() {
    let app = test_app();
    register(&app, profile("alice", Some("a@x.com"), "555", "PATIENT")).await;

    let (status, body) = register(&app, profile("alice2", Some("A@X.com"), "556", "PATIENT")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Email is already in use");
    assert_eq!(app.store.len().await, 1);
    assert_eq!(app.notifier.sent.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn registration_validates_at_the_boundary() {
    let app = test_app();

    let (status, body) = register(&app, profile("carol", Some("c@x.com"), "557", "SUPERUSER")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().unwrap().contains("Unknown role"));

    let (status, _) = register(&app, profile("carol", Some("not-an-email"), "557", "PATIENT")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = register(&app, json!({ "email": "c@x.com" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert_eq!(app.store.len().await, 0);
}

#[tokio::test]
async fn welcome_failure_does_not_fail_registration() {
    let store = MemoryCredentialStore::new();
    let state = IdentityState::new(store.clone(), FailingNotifier, AuthConfig::development());
    let router = with_authentication(identity_routes(state.clone()), state.tokens.clone());

    let (status, _) = send(
        &router,
        Method::POST,
        "/api/v1/auth/register",
        None,
        Some(profile("dave", Some("d@x.com"), "558", "PATIENT")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn me_requires_a_valid_token() {
    let app = test_app();
    register(&app, profile("alice", Some("a@x.com"), "555", "PATIENT")).await;
    let token = token_for(&app, "a@x.com").await;

    let (status, _) = send(&app.router, Method::GET, "/api/v1/auth/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let mut tampered = token.clone();
    let last = tampered.pop().unwrap();
    tampered.push(if last == 'A' { 'g' } else { 'A' });
    let (status, _) = send(&app.router, Method::GET, "/api/v1/auth/me", Some(&tampered), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app.router, Method::GET, "/api/v1/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn patient_record_ownership() {
    let app = test_app();
    let (_, alice) = register(&app, profile("alice", Some("a@x.com"), "555", "PATIENT")).await;
    let (_, bob) = register(&app, profile("bob", None, "556", "PATIENT")).await;
    register(&app, profile("house", Some("doc@x.com"), "557", "DOCTOR")).await;

    let alice_record = PatientId::new();
    let bob_record = PatientId::new();
    app.store.link_patient(alice_record, user_id(&alice)).await;
    app.store.link_patient(bob_record, user_id(&bob)).await;

    let alice_token = token_for(&app, "a@x.com").await;
    let bob_token = token_for(&app, "556").await;
    let doctor_token = token_for(&app, "doc@x.com").await;

    let own = format!("/api/v1/patients/{alice_record}");
    let other = format!("/api/v1/patients/{bob_record}");

    let (status, body) = send(&app.router, Method::GET, &own, Some(&alice_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["owner"]["email"], "a@x.com");

    let (status, _) = send(&app.router, Method::GET, &other, Some(&alice_token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Owner without an email is matched on the phone number
    let (status, _) = send(&app.router, Method::GET, &other, Some(&bob_token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app.router, Method::GET, &other, Some(&doctor_token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app.router, Method::GET, &own, None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let missing = format!("/api/v1/patients/{}", PatientId::new());
    let (status, _) = send(&app.router, Method::GET, &missing, Some(&doctor_token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn role_prefixes_are_guarded() {
    let app = test_app();
    register(&app, profile("alice", Some("a@x.com"), "555", "PATIENT")).await;
    register(&app, profile("house", Some("doc@x.com"), "557", "DOCTOR")).await;
    let patient = token_for(&app, "a@x.com").await;
    let doctor = token_for(&app, "doc@x.com").await;

    let cases = [
        ("/api/v1/patient/principal", Some(&patient), StatusCode::OK),
        ("/api/v1/patient/principal", Some(&doctor), StatusCode::FORBIDDEN),
        ("/api/v1/doctor/principal", Some(&doctor), StatusCode::OK),
        ("/api/v1/doctor/principal", Some(&patient), StatusCode::FORBIDDEN),
        ("/api/v1/admin/principal", Some(&doctor), StatusCode::FORBIDDEN),
        ("/api/v1/admin/principal", None, StatusCode::UNAUTHORIZED),
    ];

    for (uri, token, expected) in cases {
        let (status, _) = send(&app.router, Method::GET, uri, token.map(String::as_str), None).await;
        assert_eq!(status, expected, "{uri}");
    }
}

#[tokio::test]
async fn role_change_applies_on_next_login() {
    let app = test_app();
    register(&app, profile("root", Some("admin@x.com"), "500", "ADMIN")).await;
    let (_, bob) = register(&app, profile("bob", Some("b@x.com"), "556", "PATIENT")).await;

    let admin = token_for(&app, "admin@x.com").await;
    let old_bob = token_for(&app, "b@x.com").await;

    let uri = format!("/api/v1/admin/users/{}/role", user_id(&bob));

    let (status, _) = send(&app.router, Method::PUT, &uri, Some(&old_bob), Some(json!({ "role": "ADMIN" }))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(&app.router, Method::PUT, &uri, Some(&admin), Some(json!({ "role": "doctor" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "DOCTOR");

    // Old token still carries PATIENT
    let (status, _) = send(&app.router, Method::GET, "/api/v1/doctor/principal", Some(&old_bob), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let new_bob = token_for(&app, "b@x.com").await;
    let (status, principal) = send(&app.router, Method::GET, "/api/v1/doctor/principal", Some(&new_bob), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(principal["role"], "DOCTOR");

    let (status, _) = send(&app.router, Method::PUT, &uri, Some(&admin), Some(json!({ "role": "nurse" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let missing = format!("/api/v1/admin/users/{}/role", UserId::new());
    let (status, _) = send(&app.router, Method::PUT, &missing, Some(&admin), Some(json!({ "role": "ADMIN" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
