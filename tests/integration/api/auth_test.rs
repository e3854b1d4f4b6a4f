//! Authentication API integration tests
//!
//! Tests for signup, login, the auth gate and the profile endpoints.

use std::time::Duration;

use axum::http::{header::AUTHORIZATION, HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use pretty_assertions::assert_eq;

use pulsechat::backend::auth::users::delete_user;
use pulsechat::backend::server::{build_app, ServerConfig};
use pulsechat::shared::{AuthResponse, CheckAuthResponse, UpdateProfileResponse, UsersResponse};

use crate::common::assertions::assert_error_response;
use crate::common::{
    create_test_pool, expired_token, foreign_token, signup_unique_user, signup_user, test_config,
    TestApp,
};

fn token_header(token: &str) -> (HeaderName, HeaderValue) {
    (
        HeaderName::from_static("token"),
        HeaderValue::from_str(token).unwrap(),
    )
}

#[tokio::test]
async fn test_status() {
    let app = TestApp::new().await;
    let response = app.server.get("/api/status").await;
    response.assert_status_ok();
    assert_eq!(response.text(), "Server is live");
}

#[tokio::test]
async fn test_signup_success() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/api/auth/signup")
        .json(&serde_json::json!({
            "fullName": "Ada Lovelace",
            "email": "  Ada@Example.com ",
            "password": "pw",
            "bio": "first programmer"
        }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], true);
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
    assert_eq!(body["userData"]["email"], "ada@example.com");
    assert_eq!(body["userData"]["fullName"], "Ada Lovelace");
    assert!(body["userData"].get("password").is_none());
    assert!(body["userData"].get("passwordHash").is_none());
    assert!(body["userData"].get("password_hash").is_none());

    let token = body["token"].as_str().unwrap();
    let user_id = app.state.tokens.verify(token).unwrap();
    assert_eq!(body["userData"]["_id"], user_id.to_string());
}

#[tokio::test]
async fn test_signup_duplicate_email() {
    let app = TestApp::new().await;
    signup_user(&app.server, "a@x.com", "pw").await;

    let response = app
        .server
        .post("/api/auth/signup")
        .json(&serde_json::json!({"email": "A@x.com", "password": "other"}))
        .await;

    assert_error_response(&response, StatusCode::CONFLICT, "Account already exists");
}

#[tokio::test]
async fn test_signup_invalid_email() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/api/auth/signup")
        .json(&serde_json::json!({"email": "not-an-email", "password": "pw"}))
        .await;

    assert_error_response(&response, StatusCode::BAD_REQUEST, "Invalid email format");
}

#[tokio::test]
async fn test_signup_then_login_tokens_both_verify() {
    let app = TestApp::new().await;
    let user = signup_user(&app.server, "a@x.com", "pw").await;

    let response = app
        .server
        .post("/api/auth/login")
        .json(&serde_json::json!({"email": "a@x.com", "password": "pw"}))
        .await;
    response.assert_status_ok();
    let login: AuthResponse = response.json();
    assert_eq!(login.user_data.id, user.id);

    for token in [&user.token, &login.token] {
        let (name, value) = token_header(token);
        let response = app.server.get("/api/auth/check").add_header(name, value).await;
        response.assert_status_ok();
        let body: CheckAuthResponse = response.json();
        assert_eq!(body.user_data.id, user.id);
    }
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = TestApp::new().await;
    signup_user(&app.server, "a@x.com", "pw").await;

    let response = app
        .server
        .post("/api/auth/login")
        .json(&serde_json::json!({"email": "a@x.com", "password": "wrong"}))
        .await;

    assert_error_response(&response, StatusCode::UNAUTHORIZED, "Invalid credentials");
}

#[tokio::test]
async fn test_login_unknown_email() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/api/auth/login")
        .json(&serde_json::json!({"email": "nobody@x.com", "password": "pw"}))
        .await;

    assert_error_response(&response, StatusCode::UNAUTHORIZED, "Invalid credentials");
}

#[tokio::test]
async fn test_check_without_token() {
    let app = TestApp::new().await;
    let response = app.server.get("/api/auth/check").await;
    assert_error_response(&response, StatusCode::UNAUTHORIZED, "No token provided");
}

#[tokio::test]
async fn test_check_with_bearer_header() {
    let app = TestApp::new().await;
    let user = signup_unique_user(&app.server).await;

    let response = app
        .server
        .get("/api/auth/check")
        .add_header(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", user.token)).unwrap(),
        )
        .await;

    response.assert_status_ok();
}

#[tokio::test]
async fn test_check_with_expired_token() {
    let app = TestApp::new().await;
    let user = signup_unique_user(&app.server).await;

    let (name, value) = token_header(&expired_token(user.id));
    let response = app.server.get("/api/auth/check").add_header(name, value).await;

    assert_error_response(&response, StatusCode::UNAUTHORIZED, "Invalid or expired token");
}

#[tokio::test]
async fn test_check_with_foreign_or_mutated_token() {
    let app = TestApp::new().await;
    let user = signup_unique_user(&app.server).await;

    let mut mutated = user.token.clone().into_bytes();
    let pos = user.token.rfind('.').unwrap() + 5;
    mutated[pos] = if mutated[pos] == b'A' { b'B' } else { b'A' };
    let mutated = String::from_utf8(mutated).unwrap();

    for token in [foreign_token(user.id), mutated, "garbage".to_string()] {
        let (name, value) = token_header(&token);
        let response = app.server.get("/api/auth/check").add_header(name, value).await;
        assert_error_response(&response, StatusCode::UNAUTHORIZED, "Invalid or expired token");
    }
}

#[tokio::test]
async fn test_check_for_deleted_user() {
    let app = TestApp::new().await;
    let user = signup_unique_user(&app.server).await;

    assert!(delete_user(&app.state.db_pool, user.id).await.unwrap());

    let (name, value) = token_header(&user.token);
    let response = app.server.get("/api/auth/check").add_header(name, value).await;

    assert_error_response(&response, StatusCode::UNAUTHORIZED, "User not found");
}

#[tokio::test]
async fn test_update_profile() {
    let app = TestApp::new().await;
    let user = signup_unique_user(&app.server).await;

    let (name, value) = token_header(&user.token);
    let response = app
        .server
        .put("/api/auth/update-profile")
        .add_header(name.clone(), value.clone())
        .json(&serde_json::json!({
            "fullName": "Renamed",
            "profilePic": "https://cdn.test/me.png"
        }))
        .await;

    response.assert_status_ok();
    let body: UpdateProfileResponse = response.json();
    assert_eq!(body.user.full_name, "Renamed");
    assert_eq!(body.user.bio, "testing");
    assert_eq!(body.user.profile_pic.as_deref(), Some("https://cdn.test/me.png"));

    let check: CheckAuthResponse = app
        .server
        .get("/api/auth/check")
        .add_header(name, value)
        .await
        .json();
    assert_eq!(check.user_data.full_name, "Renamed");
}

#[tokio::test]
async fn test_update_profile_requires_a_field() {
    let app = TestApp::new().await;
    let user = signup_unique_user(&app.server).await;

    let (name, value) = token_header(&user.token);
    let response = app
        .server
        .put("/api/auth/update-profile")
        .add_header(name, value)
        .json(&serde_json::json!({}))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_profile_requires_auth() {
    let app = TestApp::new().await;
    let response = app
        .server
        .put("/api/auth/update-profile")
        .json(&serde_json::json!({"bio": "x"}))
        .await;
    assert_error_response(&response, StatusCode::UNAUTHORIZED, "No token provided");
}

#[tokio::test]
async fn test_list_users_excludes_caller() {
    let app = TestApp::new().await;
    let alice = signup_user(&app.server, "alice@x.com", "pw").await;
    let bob = signup_user(&app.server, "bob@x.com", "pw").await;
    let carol = signup_user(&app.server, "carol@x.com", "pw").await;

    let (name, value) = token_header(&alice.token);
    let response = app.server.get("/api/user").add_header(name, value).await;
    response.assert_status_ok();

    let body: UsersResponse = response.json();
    let mut ids: Vec<_> = body.users.iter().map(|u| u.id).collect();
    ids.sort();
    let mut expected = vec![bob.id, carol.id];
    expected.sort();
    assert_eq!(ids, expected);
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let app = TestApp::new().await;
    let response = app.server.get("/api/nope").await;
    assert_error_response(&response, StatusCode::NOT_FOUND, "Route not found");
}

fn assert_body_rejected(response: &axum_test::TestResponse, prefix: &str) {
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST, "body: {}", response.text());
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], false);
    let message = body["message"].as_str().unwrap();
    assert!(message.starts_with(prefix), "unexpected message: {}", message);
}

#[tokio::test]
async fn test_malformed_json_body() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/api/auth/login")
        .bytes("{not json".into())
        .content_type("application/json")
        .await;

    assert_body_rejected(&response, "Failed to parse the request body as JSON");
}

#[tokio::test]
async fn test_wrongly_typed_field() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/api/auth/signup")
        .json(&serde_json::json!({"email": 5, "password": "pw"}))
        .await;

    assert_body_rejected(&response, "Failed to deserialize the JSON body");
}

#[tokio::test]
async fn test_body_without_json_content_type() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/api/auth/login")
        .text(r#"{"email":"a@x.com","password":"pw"}"#)
        .await;

    assert_body_rejected(&response, "Expected request with `Content-Type: application/json`");
}

#[tokio::test]
async fn test_gated_body_rejection_is_structured() {
    let app = TestApp::new().await;
    let user = signup_unique_user(&app.server).await;

    let (name, value) = token_header(&user.token);
    let response = app
        .server
        .put("/api/auth/update-profile")
        .add_header(name, value)
        .json(&serde_json::json!({"bio": ["not", "a", "string"]}))
        .await;

    assert_body_rejected(&response, "Failed to deserialize the JSON body");
}

#[tokio::test]
async fn test_signup_with_oversized_token_ttl() {
    let config = ServerConfig {
        token_ttl: Duration::from_secs(u64::MAX),
        ..test_config()
    };
    let server = TestServer::new(build_app(config, create_test_pool().await)).unwrap();

    let response = server
        .post("/api/auth/signup")
        .json(&serde_json::json!({"email": "a@x.com", "password": "pw"}))
        .await;

    assert_error_response(&response, StatusCode::INTERNAL_SERVER_ERROR, "Internal server error");
}
