//! Integration tests for user management.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use helpers::{ACME_ADMIN, ACME_GUEST, ACME_USER, TestApp};

#[tokio::test]
async fn test_list_users_is_tenant_scoped() {
    let app = TestApp::new().await;
    let token = app.login(ACME_USER).await;

    let response = app.request("GET", "/users", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    let users = response.body.as_array().expect("array");
    assert_eq!(users.len(), 3);
    assert!(users.iter().all(|u| u["tenantId"] == "tenant-1"));
    assert!(users.iter().all(|u| u.get("passwordHash").is_none()));
}

#[tokio::test]
async fn test_guest_cannot_list_users() {
    let app = TestApp::new().await;
    let token = app.login(ACME_GUEST).await;

    let response = app.request("GET", "/users", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body["error"], "FORBIDDEN");
}

#[tokio::test]
async fn test_admin_creates_user_in_own_tenant() {
    let app = TestApp::new().await;
    let token = app.login(ACME_ADMIN).await;

    let response = app
        .request(
            "POST",
            "/users",
            Some(json!({
                "name": "Nova Pessoa",
                "email": "nova@acme.com",
                "password": "secret1",
                "role": "USER",
                "tenantId": "tenant-2"
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["tenantId"], "tenant-1");
    assert_eq!(response.body["role"], "USER");

    // The new account can log in.
    let body = app.login_body(("nova@acme.com", "secret1")).await;
    assert_eq!(body["user"]["tenantName"], "Empresa ACME");
}

#[tokio::test]
async fn test_created_user_defaults_to_guest() {
    let app = TestApp::new().await;
    let token = app.login(ACME_ADMIN).await;

    let response = app
        .request(
            "POST",
            "/users",
            Some(json!({ "name": "Visitante", "email": "v@acme.com", "password": "secret1" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["role"], "GUEST");
}

#[tokio::test]
async fn test_create_user_validation_and_conflict() {
    let app = TestApp::new().await;
    let token = app.login(ACME_ADMIN).await;

    let short_password = app
        .request(
            "POST",
            "/users",
            Some(json!({ "name": "Short", "email": "s@acme.com", "password": "123" })),
            Some(&token),
        )
        .await;
    assert_eq!(short_password.status, StatusCode::BAD_REQUEST);

    let bad_email = app
        .request(
            "POST",
            "/users",
            Some(json!({ "name": "Bad", "email": "not-an-email", "password": "secret1" })),
            Some(&token),
        )
        .await;
    assert_eq!(bad_email.status, StatusCode::BAD_REQUEST);
    assert!(bad_email.body["details"].is_object());

    // Login emails are unique across tenants.
    let taken = app
        .request(
            "POST",
            "/users",
            Some(json!({ "name": "Dup", "email": "ADMIN@globex.com", "password": "secret1" })),
            Some(&token),
        )
        .await;
    assert_eq!(taken.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_user_role_cannot_create_users() {
    let app = TestApp::new().await;
    let token = app.login(ACME_USER).await;

    let response = app
        .request(
            "POST",
            "/users",
            Some(json!({ "name": "X Y", "email": "xy@acme.com", "password": "secret1" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_get_update_delete_user() {
    let app = TestApp::new().await;
    let admin = app.login(ACME_ADMIN).await;
    let guest = app.login_body(ACME_GUEST).await;
    let guest_id = guest["user"]["id"].as_str().unwrap();
    let path = format!("/users/{guest_id}");

    let fetched = app.request("GET", &path, None, Some(&admin)).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body["email"], "guest@acme.com");

    let updated = app
        .request(
            "PATCH",
            &path,
            Some(json!({ "name": "Guest Promovido", "role": "USER" })),
            Some(&admin),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["name"], "Guest Promovido");
    assert_eq!(updated.body["role"], "USER");
    assert_eq!(updated.body["email"], "guest@acme.com");

    let deleted = app.request("DELETE", &path, None, Some(&admin)).await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let gone = app.request("GET", &path, None, Some(&admin)).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_password_change_revokes_refresh_token() {
    let app = TestApp::new().await;
    let admin = app.login(ACME_ADMIN).await;
    let user = app.login_body(ACME_USER).await;
    let user_id = user["user"]["id"].as_str().unwrap();
    let refresh = user["refresh_token"].as_str().unwrap();

    let updated = app
        .request(
            "PATCH",
            &format!("/users/{user_id}"),
            Some(json!({ "password": "brand-new-pass" })),
            Some(&admin),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);

    let response = app
        .request(
            "POST",
            "/auth/refresh",
            Some(json!({ "refresh_token": refresh })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    app.login_body(("user@acme.com", "brand-new-pass")).await;
}

#[tokio::test]
async fn test_admin_cannot_demote_or_delete_self() {
    let app = TestApp::new().await;
    let body = app.login_body(ACME_ADMIN).await;
    let token = body["access_token"].as_str().unwrap();
    let path = format!("/users/{}", body["user"]["id"].as_str().unwrap());

    let demote = app
        .request("PATCH", &path, Some(json!({ "role": "GUEST" })), Some(token))
        .await;
    assert_eq!(demote.status, StatusCode::FORBIDDEN);

    let delete = app.request("DELETE", &path, None, Some(token)).await;
    assert_eq!(delete.status, StatusCode::FORBIDDEN);

    // Renaming yourself is fine.
    let rename = app
        .request("PATCH", &path, Some(json!({ "name": "Chefe ACME" })), Some(token))
        .await;
    assert_eq!(rename.status, StatusCode::OK);
}

#[tokio::test]
async fn test_malformed_user_id_is_bad_request() {
    let app = TestApp::new().await;
    let token = app.login(ACME_ADMIN).await;

    let response = app
        .request("GET", "/users/not-a-uuid", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
