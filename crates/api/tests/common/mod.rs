#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use marquee_api::auth::jwt::JwtConfig;
use marquee_api::auth::password::hash_password;
use marquee_api::config::{LogFormat, ServerConfig};
use marquee_api::router::build_app_router;
use marquee_api::state::AppState;
use marquee_db::models::admin::{Admin, CreateAdmin};
use marquee_db::models::movie::{CreateMovie, Movie};
use marquee_db::models::user::{CreateUser, User};
use marquee_db::repositories::{AdminRepo, MovieRepo, UserRepo};

/// Password used for every seeded account.
pub const TEST_PASSWORD: &str = "correct-horse-42";

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec![
            "http://localhost:5173".to_string(),
            "http://localhost:5174".to_string(),
        ],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        log_format: LogFormat::Pretty,
        jwt: JwtConfig {
            secret: "test-secret-not-for-production".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
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
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn put_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), None).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Seed helpers
// ---------------------------------------------------------------------------

pub async fn create_test_user(pool: &PgPool, username: &str) -> User {
    let input = CreateUser {
        username: username.to_string(),
        email: format!("{username}@example.com"),
        password_hash: hash_password(TEST_PASSWORD).unwrap(),
        display_name: None,
    };
    UserRepo::create(pool, &input).await.unwrap()
}

pub async fn create_test_admin(pool: &PgPool, username: &str, role: &str) -> Admin {
    let input = CreateAdmin {
        username: username.to_string(),
        email: format!("{username}@marquee.test"),
        password_hash: hash_password(TEST_PASSWORD).unwrap(),
        role: role.to_string(),
    };
    AdminRepo::create(pool, &input).await.unwrap()
}

pub async fn create_test_movie(pool: &PgPool, title: &str) -> Movie {
    let input = CreateMovie {
        title: title.to_string(),
        original_title: None,
        overview: None,
        release_date: None,
        runtime_minutes: Some(120),
        language: Some("en".to_string()),
        poster_url: None,
        backdrop_url: None,
        trailer_url: None,
    };
    MovieRepo::create(pool, &input).await.unwrap()
}

/// Log a seeded user in through the API and return the access token.
pub async fn login_user(pool: &PgPool, username: &str) -> String {
    let app = build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/auth/login",
        serde_json::json!({ "login": username, "password": TEST_PASSWORD }),
    )
    .await;
    let json = body_json(response).await;
    json["access_token"].as_str().unwrap().to_string()
}

/// Log a seeded admin in through the API and return the access token.
pub async fn login_admin(pool: &PgPool, username: &str) -> String {
    let app = build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/admin/auth/login",
        serde_json::json!({ "login": username, "password": TEST_PASSWORD }),
    )
    .await;
    let json = body_json(response).await;
    json["access_token"].as_str().unwrap().to_string()
}

/// Seed a user and return `(user, access_token)`.
pub async fn user_with_token(pool: &PgPool, username: &str) -> (User, String) {
    let user = create_test_user(pool, username).await;
    let token = login_user(pool, username).await;
    (user, token)
}

/// Seed an admin with `role` and return `(admin, access_token)`.
pub async fn admin_with_token(pool: &PgPool, username: &str, role: &str) -> (Admin, String) {
    let admin = create_test_admin(pool, username, role).await;
    let token = login_admin(pool, username).await;
    (admin, token)
}
