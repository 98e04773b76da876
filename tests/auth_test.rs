mod common;

use axum::http::StatusCode;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use serde_json::json;
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use hazard_map::entity::revoked_token;

use common::{Factory, TestApp};

#[tokio::test]
async fn test_register_success() {
    let app = TestApp::new().await;
    let unique_id = Uuid::new_v4();

    let response = app
        .server
        .post("/register")
        .json(&json!({
            "email": format!("test-{}@example.com", unique_id),
            "password": "password123",
            "name": "Test User"
        }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let body: serde_json::Value = response.json();
    assert!(body["access"].as_str().is_some());
    assert!(body["refresh"].as_str().is_some());
    assert_eq!(
        body["user"]["email"].as_str().unwrap(),
        format!("test-{}@example.com", unique_id)
    );
    assert_eq!(body["user"]["name"].as_str().unwrap(), "Test User");
    assert!(body["user"]["id"].as_i64().is_some());
    // The password hash never leaks
    assert!(body["user"].get("password").is_none());
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);

    let auth = factory.create_user().await;

    let response = app
        .server
        .post("/register")
        .json(&json!({
            "email": auth.email,
            "password": "password123",
            "name": "Another User"
        }))
        .await;

    // Unique-constraint violations surface as 400 with a message envelope
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json();
    assert_eq!(body["message"].as_str().unwrap(), "Email already registered");
}

#[tokio::test]
async fn test_register_missing_fields() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/register")
        .json(&json!({
            "email": "",
            "password": "",
            "name": ""
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json();
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("email"));
    assert!(message.contains("password"));
    assert!(message.contains("name"));
}

#[tokio::test]
async fn test_register_invalid_email_format() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/register")
        .json(&json!({
            "email": "not-an-email",
            "password": "password123",
            "name": "Test User"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);

    let email = format!("login-{}@example.com", Uuid::new_v4());
    factory.create_user_with_email(&email, "correct-horse").await;

    let response = app
        .server
        .post("/login")
        .json(&json!({
            "email": email,
            "password": "correct-horse"
        }))
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert!(body["access"].as_str().is_some());
    assert!(body["refresh"].as_str().is_some());
    assert_eq!(body["user"]["email"].as_str().unwrap(), email);
    assert!(body["user"]["full_name"].as_str().is_some());
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);

    let email = format!("login-{}@example.com", Uuid::new_v4());
    factory.create_user_with_email(&email, "correct-horse").await;

    let response = app
        .server
        .post("/login")
        .json(&json!({
            "email": email,
            "password": "battery-staple"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json();
    assert_eq!(
        body["message"].as_str().unwrap(),
        "Login failed, wrong email or password"
    );
}

#[tokio::test]
async fn test_login_unknown_email_uses_same_message() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/login")
        .json(&json!({
            "email": "nobody@example.com",
            "password": "whatever"
        }))
        .await;

    // Never reveals whether the email or the password was wrong
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json();
    assert_eq!(
        body["message"].as_str().unwrap(),
        "Login failed, wrong email or password"
    );
}

#[tokio::test]
async fn test_login_storage_failure_is_a_server_error() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);

    let email = format!("login-{}@example.com", Uuid::new_v4());
    factory.create_user_with_email(&email, "correct-horse").await;

    // A dead database must not masquerade as bad credentials
    app.state.db.clone().close().await.unwrap();

    let response = app
        .server
        .post("/login")
        .json(&json!({
            "email": email,
            "password": "correct-horse"
        }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_refresh_storage_failure_is_a_server_error() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user().await;

    app.state.db.clone().close().await.unwrap();

    let response = app
        .server
        .post("/refresh")
        .json(&json!({ "refresh": auth.refresh }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_logout_success() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user().await;

    let response = app
        .server
        .post("/logout")
        .json(&json!({ "refresh": auth.refresh }))
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["message"].as_str().unwrap(), "Logout successful");
}

#[tokio::test]
async fn test_logout_missing_token() {
    let app = TestApp::new().await;

    let response = app.server.post("/logout").json(&json!({})).await;

    response.assert_status(StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json();
    assert_eq!(
        body["message"].as_str().unwrap(),
        "Refresh token is required"
    );
}

#[tokio::test]
async fn test_logout_malformed_token_gets_generic_message() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/logout")
        .json(&json!({ "refresh": "garbage.token.value" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json();
    assert_eq!(
        body["message"].as_str().unwrap(),
        "Invalid or expired refresh token"
    );
}

#[tokio::test]
async fn test_logout_twice_fails() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user().await;

    app.server
        .post("/logout")
        .json(&json!({ "refresh": auth.refresh }))
        .await
        .assert_status(StatusCode::OK);

    let response = app
        .server
        .post("/logout")
        .json(&json!({ "refresh": auth.refresh }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_logout_rejects_access_token() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user().await;

    // An access token is not a refresh token
    let response = app
        .server
        .post("/logout")
        .json(&json!({ "refresh": auth.access }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_logout_prunes_expired_denylist_rows() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user().await;

    // Seed a denylist row whose token expired long ago
    let expired_jti = Uuid::new_v4();
    revoked_token::ActiveModel {
        jti: Set(expired_jti),
        expires_at: Set(OffsetDateTime::now_utc() - Duration::hours(1)),
        revoked_at: Set(OffsetDateTime::now_utc() - Duration::days(8)),
    }
    .insert(&app.state.db)
    .await
    .unwrap();

    app.server
        .post("/logout")
        .json(&json!({ "refresh": auth.refresh }))
        .await
        .assert_status(StatusCode::OK);

    // The expired row is gone, only the freshly revoked token remains
    let remaining = revoked_token::Entity::find()
        .all(&app.state.db)
        .await
        .unwrap();
    assert_eq!(remaining.len(), 1);
    assert_ne!(remaining[0].jti, expired_jti);
}

#[tokio::test]
async fn test_refresh_issues_new_access_token() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user().await;

    let response = app
        .server
        .post("/refresh")
        .json(&json!({ "refresh": auth.refresh }))
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    let access = body["access"].as_str().unwrap();

    // The minted access token works on a protected route
    let response = app
        .server
        .post("/reports")
        .add_header("Authorization", format!("Bearer {}", access))
        .json(&json!({
            "latitude": "40.0",
            "longitude": "-75.0"
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
}

#[tokio::test]
async fn test_refresh_rejected_after_logout() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user().await;

    app.server
        .post("/logout")
        .json(&json!({ "refresh": auth.refresh }))
        .await
        .assert_status(StatusCode::OK);

    let response = app
        .server
        .post("/refresh")
        .json(&json!({ "refresh": auth.refresh }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}
