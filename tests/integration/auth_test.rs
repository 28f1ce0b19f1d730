//! Integration tests for the token lifecycle.

mod helpers;

use axum::http::StatusCode;

use helpers::{ACME_ADMIN, ACME_GUEST, GLOBEX_USER, TestApp};

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::new().await;
    let body = app.login_body(ACME_ADMIN).await;

    assert!(body["access_token"].is_string());
    assert!(body["refresh_token"].is_string());
    assert!(body["access_expires_at"].is_string());
    assert!(body["refresh_expires_at"].is_string());

    let user = &body["user"];
    assert_eq!(user["email"], "admin@acme.com");
    assert_eq!(user["name"], "Admin ACME");
    assert_eq!(user["role"], "ADMIN");
    assert_eq!(user["tenantId"], "tenant-1");
    assert_eq!(user["tenantName"], "Empresa ACME");
    assert!(user.get("passwordHash").is_none());
}

#[tokio::test]
async fn test_login_email_is_case_insensitive() {
    let app = TestApp::new().await;
    let body = app.login_body(("ADMIN@Acme.com", "admin123")).await;
    assert_eq!(body["user"]["tenantId"], "tenant-1");
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::new().await;

    let wrong_password = app
        .request(
            "POST",
            "/auth/login",
            Some(serde_json::json!({ "email": "admin@acme.com", "password": "nope" })),
            None,
        )
        .await;
    let unknown_email = app
        .request(
            "POST",
            "/auth/login",
            Some(serde_json::json!({ "email": "nobody@acme.com", "password": "nope" })),
            None,
        )
        .await;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.body, unknown_email.body);
    assert_eq!(wrong_password.body["error"], "UNAUTHORIZED");
    assert_eq!(wrong_password.body["message"], "Invalid credentials");
}

#[tokio::test]
async fn test_malformed_login_body_is_bad_request() {
    let app = TestApp::new().await;
    let response = app
        .request(
            "POST",
            "/auth/login",
            Some(serde_json::json!({ "email": "admin@acme.com" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_profile_authenticated() {
    let app = TestApp::new().await;
    let token = app.login(GLOBEX_USER).await;

    let response = app.request("GET", "/auth/profile", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["email"], "user@globex.com");
    assert_eq!(response.body["role"], "USER");
    assert_eq!(response.body["tenantId"], "tenant-2");
    assert_eq!(response.body["tenantName"], "Empresa GLOBEX");
}

#[tokio::test]
async fn test_profile_requires_token() {
    let app = TestApp::new().await;

    let missing = app.request("GET", "/auth/profile", None, None).await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);

    let garbage = app
        .request("GET", "/auth/profile", None, Some("not-a-jwt"))
        .await;
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_token_cannot_be_used_as_access_token() {
    let app = TestApp::new().await;
    let body = app.login_body(ACME_GUEST).await;
    let refresh = body["refresh_token"].as_str().unwrap();

    let response = app.request("GET", "/auth/profile", None, Some(refresh)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_rotates_and_is_single_use() {
    let app = TestApp::new().await;
    let body = app.login_body(ACME_ADMIN).await;
    let first = body["refresh_token"].as_str().unwrap().to_string();

    let rotated = app
        .request(
            "POST",
            "/auth/refresh",
            Some(serde_json::json!({ "refresh_token": first })),
            None,
        )
        .await;
    assert_eq!(rotated.status, StatusCode::OK);
    assert!(rotated.body["access_token"].is_string());
    assert!(rotated.body.get("user").is_none());
    let second = rotated.body["refresh_token"].as_str().unwrap().to_string();
    assert_ne!(first, second);

    // The new access token works.
    let access = rotated.body["access_token"].as_str().unwrap();
    let profile = app.request("GET", "/auth/profile", None, Some(access)).await;
    assert_eq!(profile.status, StatusCode::OK);

    // Replaying the redeemed token fails.
    let replay = app
        .request(
            "POST",
            "/auth/refresh",
            Some(serde_json::json!({ "refresh_token": first })),
            None,
        )
        .await;
    assert_eq!(replay.status, StatusCode::UNAUTHORIZED);
    assert_eq!(replay.body["message"], "Invalid refresh token");

    // The rotated token is still good.
    let next = app
        .request(
            "POST",
            "/auth/refresh",
            Some(serde_json::json!({ "refresh_token": second })),
            None,
        )
        .await;
    assert_eq!(next.status, StatusCode::OK);
}

#[tokio::test]
async fn test_access_token_cannot_refresh() {
    let app = TestApp::new().await;
    let token = app.login(ACME_ADMIN).await;

    let response = app
        .request(
            "POST",
            "/auth/refresh",
            Some(serde_json::json!({ "refresh_token": token })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_revokes_refresh_token() {
    let app = TestApp::new().await;
    let body = app.login_body(ACME_ADMIN).await;
    let access = body["access_token"].as_str().unwrap();
    let refresh = body["refresh_token"].as_str().unwrap();

    let logout = app.request("POST", "/auth/logout", None, Some(access)).await;
    assert_eq!(logout.status, StatusCode::OK);

    let response = app
        .request(
            "POST",
            "/auth/refresh",
            Some(serde_json::json!({ "refresh_token": refresh })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    // Access tokens remain valid until they expire.
    let profile = app.request("GET", "/auth/profile", None, Some(access)).await;
    assert_eq!(profile.status, StatusCode::OK);
}

#[tokio::test]
async fn test_health_endpoints_need_no_auth() {
    let app = TestApp::new().await;

    let health = app.request("GET", "/health", None, None).await;
    assert_eq!(health.status, StatusCode::OK);
    assert_eq!(health.body["status"], "ok");
    assert!(health.body["uptime_seconds"].is_u64());

    let detailed = app.request("GET", "/health/detailed", None, None).await;
    assert_eq!(detailed.status, StatusCode::OK);
    assert_eq!(detailed.body["database"]["provider"], "memory");
    assert_eq!(detailed.body["database"]["status"], "connected");
}
