//! End-to-end tests driving the router in-process.

use std::sync::Arc;
use std::time::Duration;

use account_service::auth::CredentialService;
use account_service::config::{AuthConfig, HashCost};
use account_service::database::MemoryStore;
use account_service::{app, AppState};
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

fn test_app() -> (Router, AppState) {
    let config = AuthConfig {
        jwt_secret: "integration-secret".into(),
        token_lifetime: Duration::from_secs(600),
        hash_cost: HashCost {
            memory_kib: 8,
            iterations: 1,
            parallelism: 1,
        },
    };
    let credentials = CredentialService::new(Arc::new(MemoryStore::new()), &config).unwrap();
    let state = AppState::new(credentials);
    (app(state.clone()), state)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let is_json = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"));
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if is_json {
        serde_json::from_slice(&bytes).unwrap()
    } else {
        Value::String(String::from_utf8_lossy(&bytes).into_owned())
    };
    (status, body)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn with_token(method: Method, uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

async fn count(state: &AppState) -> usize {
    state.credentials.accounts().count().await.unwrap()
}

async fn register_and_login(app: &Router, username: &str, password: &str) -> String {
    let credentials = json!({ "username": username, "password": password });
    let (status, _) = send(app, post_json("/register", credentials.clone())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(app, post_json("/login", credentials)).await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn registers_a_new_user_once() {
    let (app, state) = test_app();

    let (status, body) = send(
        &app,
        post_json("/register", json!({ "username": "Danny", "password": "11111111" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({ "message": "Account created successfully." }));
    assert!(state.credentials.accounts().find_by_username("Danny").await.is_ok());

    let (status, body) = send(
        &app,
        post_json("/register", json!({ "username": "Danny", "password": "22222222" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());

    assert_eq!(count(&state).await, 1);
}

#[tokio::test]
async fn rejects_short_password() {
    let (app, state) = test_app();

    let (status, body) = send(
        &app,
        post_json("/register", json!({ "username": "Vdra#", "password": "1111111" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({
            "message": "User validation failed: password: The password must consist of at least 8 characters."
        })
    );
    assert_eq!(count(&state).await, 0);
}

#[tokio::test]
async fn rejects_missing_or_empty_fields() {
    let (app, state) = test_app();

    for payload in [
        json!({ "username": "Benjamin" }),
        json!({ "password": "11111114233" }),
        json!({ "username": "", "password": "" }),
    ] {
        let (status, body) = send(&app, post_json("/register", payload.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "payload {payload}");
        assert!(
            body["message"].as_str().unwrap().starts_with("User validation failed:"),
            "payload {payload}"
        );
    }

    assert_eq!(count(&state).await, 0);
}

#[tokio::test]
async fn rejects_body_that_is_not_json() {
    let (app, state) = test_app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/register")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("username=Danny"))
        .unwrap();

    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());
    assert_eq!(count(&state).await, 0);
}

#[tokio::test]
async fn login_issues_a_token_for_the_account() {
    let (app, state) = test_app();
    let token = register_and_login(&app, "Danny", "11111111").await;

    let account = state.credentials.accounts().find_by_username("Danny").await.unwrap();
    let claims = state.credentials.verify_token(&token).unwrap();
    assert_eq!(claims.id, account.id);
}

#[tokio::test]
async fn login_failures_are_indistinguishable() {
    let (app, _state) = test_app();
    register_and_login(&app, "Danny", "11111111").await;

    let unknown = send(
        &app,
        post_json("/login", json!({ "username": "Nobody", "password": "11111111" })),
    )
    .await;
    let wrong = send(
        &app,
        post_json("/login", json!({ "username": "Danny", "password": "wrong-password" })),
    )
    .await;

    assert_eq!(unknown.0, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown, wrong);
    assert_eq!(unknown.1, json!({ "message": "Invalid login credentials." }));
}

#[tokio::test]
async fn dashboard_requires_a_token() {
    let (app, _state) = test_app();

    let request = Request::builder().uri("/dashboard").body(Body::empty()).unwrap();
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, with_token(Method::GET, "/dashboard", "garbage")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn dashboard_echoes_the_authorized_account() {
    let (app, _state) = test_app();
    let token = register_and_login(&app, "Danny", "11111111").await;

    let (status, body) = send(&app, with_token(Method::GET, "/dashboard", &token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["userData"]["username"], json!("Danny"));
    assert!(body["userData"]["id"].is_string());
    assert!(body["userData"].get("password").is_none());
    assert!(body["userData"].get("passwordHash").is_none());
}

#[tokio::test]
async fn deleting_an_account_is_final() {
    let (app, state) = test_app();
    let token = register_and_login(&app, "Danny", "11111111").await;

    let (status, body) = send(&app, with_token(Method::DELETE, "/account", &token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "success": true, "message": "Account deleted successfully" })
    );
    assert_eq!(count(&state).await, 0);

    let (status, _) = send(&app, with_token(Method::GET, "/dashboard", &token)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app,
        post_json("/login", json!({ "username": "Danny", "password": "11111111" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn root_answers() {
    let (app, _state) = test_app();
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
}
