//! Shared helpers for API integration tests.
//!
//! Each test gets an isolated database from `#[sqlx::test]`; the app is
//! built through the same router builder production uses, so the full
//! middleware stack is exercised.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use sqlx::PgPool;
use tower::ServiceExt;

use relief_api::auth::identity::MockIdentityProvider;
use relief_api::auth::jwt::{generate_access_token, JwtConfig};
use relief_api::config::ServerConfig;
use relief_api::router::build_app_router;
use relief_api::state::AppState;
use relief_core::types::DbId;

/// Fixture OTP accepted by the test identity provider.
pub const TEST_OTP: &str = "123456";

const TEST_JWT_SECRET: &str = "integration-test-secret";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            access_token_expiry_mins: 60,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        identity: Arc::new(MockIdentityProvider::new(TEST_OTP)),
    };
    build_app_router(state, &config)
}

/// Sign an access token for an arbitrary user id and role.
pub fn token_for(user_id: DbId, role: &str) -> String {
    generate_access_token(user_id, role, &test_config().jwt)
        .expect("test token generation must succeed")
}

pub fn admin_token() -> String {
    token_for(1, "admin")
}

pub fn responder_token() -> String {
    token_for(2, "responder")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send a GET request without authentication.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Send a GET request with a Bearer token.
pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .header("authorization", format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Send a JSON request without authentication.
pub async fn send_json(
    app: Router,
    method: &str,
    uri: &str,
    body: &serde_json::Value,
) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(body).unwrap()))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Send a JSON request with a Bearer token.
pub async fn send_json_auth(
    app: Router,
    method: &str,
    uri: &str,
    token: &str,
    body: &serde_json::Value,
) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .header("authorization", format!("Bearer {token}"))
            .body(Body::from(serde_json::to_vec(body).unwrap()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: &serde_json::Value) -> Response<Body> {
    send_json(app, "POST", uri, body).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: &serde_json::Value,
) -> Response<Body> {
    send_json_auth(app, "POST", uri, token, body).await
}

/// Read a response body into JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    use http_body_util::BodyExt;
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
}

// ---------------------------------------------------------------------------
// Fixture seeding (through the API so handlers are exercised end to end)
// ---------------------------------------------------------------------------

/// Create a resource via the API and return its id.
pub async fn seed_resource(app: &Router, name: &str, quantity: i32, priority: &str) -> DbId {
    let response = post_json_auth(
        app.clone(),
        "/api/v1/resources",
        &admin_token(),
        &serde_json::json!({
            "name": name,
            "resource_type": "water",
            "category": "supplies",
            "quantity_current": quantity,
            "lat": 6.9271,
            "lng": 79.8612,
            "priority": priority,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

/// Create a disaster via the API and return its code.
pub async fn seed_disaster(app: &Router, code: &str) -> DbId {
    let response = post_json_auth(
        app.clone(),
        "/api/v1/disasters",
        &admin_token(),
        &serde_json::json!({
            "code": code,
            "name": "Kelani river flooding",
            "severity": "high",
            "lat": 6.95,
            "lng": 79.88,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}
