//! Cross-tenant access behaves exactly like access to a missing record.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use helpers::{ACME_ADMIN, GLOBEX_ADMIN, GLOBEX_USER, TestApp, new_client};

#[tokio::test]
async fn test_foreign_client_is_not_found() {
    let app = TestApp::new().await;
    let acme = app.login(ACME_ADMIN).await;
    let globex = app.login(GLOBEX_ADMIN).await;
    let acme_client = app.first_client_id(&acme).await;
    let path = format!("/clients/{acme_client}");

    let get = app.request("GET", &path, None, Some(&globex)).await;
    assert_eq!(get.status, StatusCode::NOT_FOUND);

    let patch = app
        .request("PATCH", &path, Some(json!({ "name": "Roubado" })), Some(&globex))
        .await;
    assert_eq!(patch.status, StatusCode::NOT_FOUND);

    let delete = app.request("DELETE", &path, None, Some(&globex)).await;
    assert_eq!(delete.status, StatusCode::NOT_FOUND);

    // Untouched for its owner.
    let owner = app.request("GET", &path, None, Some(&acme)).await;
    assert_eq!(owner.status, StatusCode::OK);
    assert_ne!(owner.body["name"], "Roubado");
}

#[tokio::test]
async fn test_foreign_user_is_not_found() {
    let app = TestApp::new().await;
    let acme = app.login_body(ACME_ADMIN).await;
    let acme_id = acme["user"]["id"].as_str().unwrap();
    let globex = app.login(GLOBEX_ADMIN).await;
    let path = format!("/users/{acme_id}");

    let get = app.request("GET", &path, None, Some(&globex)).await;
    assert_eq!(get.status, StatusCode::NOT_FOUND);

    let patch = app
        .request("PATCH", &path, Some(json!({ "name": "Trocado" })), Some(&globex))
        .await;
    assert_eq!(patch.status, StatusCode::NOT_FOUND);

    let delete = app.request("DELETE", &path, None, Some(&globex)).await;
    assert_eq!(delete.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_user_role_cannot_read_foreign_user() {
    let app = TestApp::new().await;
    let acme = app.login_body(ACME_ADMIN).await;
    let acme_id = acme["user"]["id"].as_str().unwrap();
    let globex_user = app.login(GLOBEX_USER).await;

    let response = app
        .request("GET", &format!("/users/{acme_id}"), None, Some(&globex_user))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_each_tenant_lists_only_its_clients() {
    let app = TestApp::new().await;

    for (account, expected) in [(ACME_ADMIN, 3), (GLOBEX_ADMIN, 3), (("admin@initech.com", "admin123"), 2)] {
        let token = app.login(account).await;
        let response = app.request("GET", "/clients", None, Some(&token)).await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body.as_array().unwrap().len(), expected);
    }
}

#[tokio::test]
async fn test_public_id_taken_in_other_tenant_is_free() {
    let app = TestApp::new().await;
    let acme = app.login(ACME_ADMIN).await;
    let globex = app.login(GLOBEX_ADMIN).await;

    let mut body = new_client("Carla Nunes", "carla@cliente.com");
    body["publicId"] = json!("SHARED01");

    let first = app
        .request("POST", "/clients", Some(body.clone()), Some(&acme))
        .await;
    assert_eq!(first.status, StatusCode::CREATED);

    let second = app
        .request("POST", "/clients", Some(body.clone()), Some(&globex))
        .await;
    assert_eq!(second.status, StatusCode::CREATED);
    assert_eq!(second.body["publicId"], "SHARED01");

    body["email"] = json!("outra@cliente.com");
    let clash = app.request("POST", "/clients", Some(body), Some(&acme)).await;
    assert_eq!(clash.status, StatusCode::CONFLICT);
}
