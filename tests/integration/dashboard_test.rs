//! Integration tests for dashboard statistics.

mod helpers;

use axum::http::StatusCode;

use helpers::{ACME_GUEST, ACME_USER, GLOBEX_ADMIN, TestApp, new_client};

#[tokio::test]
async fn test_stats_per_tenant() {
    let app = TestApp::new().await;

    let acme = app.login(ACME_GUEST).await;
    let response = app
        .request("GET", "/dashboard/stats", None, Some(&acme))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["total"], 3);
    assert_eq!(response.body["active"], 2);

    let globex = app.login(GLOBEX_ADMIN).await;
    let response = app
        .request("GET", "/dashboard/stats", None, Some(&globex))
        .await;
    assert_eq!(response.body["total"], 3);
    assert_eq!(response.body["active"], 3);
}

#[tokio::test]
async fn test_stats_follow_writes() {
    let app = TestApp::new().await;
    let token = app.login(ACME_USER).await;

    let created = app
        .request(
            "POST",
            "/clients",
            Some(new_client("Cliente Novo", "novo@acme.com")),
            Some(&token),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);

    let response = app
        .request("GET", "/dashboard/stats", None, Some(&token))
        .await;
    assert_eq!(response.body["total"], 4);
    assert_eq!(response.body["active"], 3);
}

#[tokio::test]
async fn test_stats_require_authentication() {
    let app = TestApp::new().await;
    let response = app.request("GET", "/dashboard/stats", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
