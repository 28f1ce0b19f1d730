//! Integration tests for client management.

mod helpers;

use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde_json::json;

use helpers::{ACME_ADMIN, ACME_GUEST, ACME_USER, GLOBEX_ADMIN, TestApp, new_client};

#[tokio::test]
async fn test_list_clients_newest_first() {
    let app = TestApp::new().await;
    let token = app.login(ACME_GUEST).await;

    let response = app.request("GET", "/clients", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    let clients = response.body.as_array().expect("array");
    assert_eq!(clients.len(), 3);
    assert!(clients.iter().all(|c| c["tenantId"] == "tenant-1"));

    let created: Vec<DateTime<Utc>> = clients
        .iter()
        .map(|c| c["createdAt"].as_str().unwrap().parse().unwrap())
        .collect();
    assert!(created.windows(2).all(|pair| pair[0] >= pair[1]));
}

#[tokio::test]
async fn test_list_clients_filters() {
    let app = TestApp::new().await;
    let token = app.login(ACME_USER).await;

    let search = app
        .request("GET", "/clients?search=SANTOS", None, Some(&token))
        .await;
    assert_eq!(search.status, StatusCode::OK);
    let found = search.body.as_array().unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["name"], "Maria Santos");

    let inactive = app
        .request("GET", "/clients?active=false", None, Some(&token))
        .await;
    let found = inactive.body.as_array().unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["name"], "Pedro Oliveira");

    // Another tenant's client does not match.
    let foreign = app
        .request("GET", "/clients?search=globex", None, Some(&token))
        .await;
    assert!(foreign.body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_create_client() {
    let app = TestApp::new().await;
    let token = app.login(ACME_USER).await;

    let mut body = new_client("Beatriz Rocha", "beatriz@acme.com");
    body["tenantId"] = json!("tenant-3");

    let response = app.request("POST", "/clients", Some(body), Some(&token)).await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["tenantId"], "tenant-1");
    assert_eq!(response.body["isActive"], true);
    assert_eq!(response.body["address"]["state"], "SP");
    assert_eq!(response.body["imageUrl"], "https://example.com/new.jpg");
    let public_id = response.body["publicId"].as_str().unwrap();
    assert_eq!(public_id.len(), 8);
}

#[tokio::test]
async fn test_guest_cannot_write_clients() {
    let app = TestApp::new().await;
    let token = app.login(ACME_GUEST).await;
    let id = app.first_client_id(&token).await;

    let create = app
        .request(
            "POST",
            "/clients",
            Some(new_client("Sem Acesso", "sem@acme.com")),
            Some(&token),
        )
        .await;
    assert_eq!(create.status, StatusCode::FORBIDDEN);

    let update = app
        .request(
            "PATCH",
            &format!("/clients/{id}"),
            Some(json!({ "name": "Hacked" })),
            Some(&token),
        )
        .await;
    assert_eq!(update.status, StatusCode::FORBIDDEN);

    let delete = app
        .request("DELETE", &format!("/clients/{id}"), None, Some(&token))
        .await;
    assert_eq!(delete.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_create_client_validation() {
    let app = TestApp::new().await;
    let token = app.login(ACME_ADMIN).await;

    let mut blank_address = new_client("Endereço Vazio", "vazio@acme.com");
    blank_address["address"]["street"] = json!("  ");
    let response = app
        .request("POST", "/clients", Some(blank_address), Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");

    let bad_email = app
        .request(
            "POST",
            "/clients",
            Some(new_client("Email Ruim", "nope")),
            Some(&token),
        )
        .await;
    assert_eq!(bad_email.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_client_email_unique_per_tenant() {
    let app = TestApp::new().await;
    let acme = app.login(ACME_ADMIN).await;
    let globex = app.login(GLOBEX_ADMIN).await;

    let duplicate = app
        .request(
            "POST",
            "/clients",
            Some(new_client("Outra Maria", "MARIA.SANTOS@acme.com")),
            Some(&acme),
        )
        .await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);

    let other_tenant = app
        .request(
            "POST",
            "/clients",
            Some(new_client("Maria Santos", "maria.santos@acme.com")),
            Some(&globex),
        )
        .await;
    assert_eq!(other_tenant.status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_update_client_partial_and_nullable_fields() {
    let app = TestApp::new().await;
    let token = app.login(ACME_USER).await;
    let id = app.first_client_id(&token).await;
    let path = format!("/clients/{id}");

    let before = app.request("GET", &path, None, Some(&token)).await;
    assert_eq!(before.status, StatusCode::OK);

    let updated = app
        .request(
            "PATCH",
            &path,
            Some(json!({ "isActive": false, "contact": null })),
            Some(&token),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["isActive"], false);
    assert!(updated.body["contact"].is_null());
    // Absent fields are left alone.
    assert_eq!(updated.body["name"], before.body["name"]);
    assert_eq!(updated.body["imageUrl"], before.body["imageUrl"]);

    let readdressed = app
        .request(
            "PATCH",
            &path,
            Some(json!({
                "address": {
                    "street": "Rua Nova",
                    "neighborhood": "Moema",
                    "number": "1",
                    "state": "SP"
                }
            })),
            Some(&token),
        )
        .await;
    assert_eq!(readdressed.status, StatusCode::OK);
    assert_eq!(readdressed.body["address"]["street"], "Rua Nova");
}

#[tokio::test]
async fn test_delete_client() {
    let app = TestApp::new().await;
    let token = app.login(ACME_ADMIN).await;
    let id = app.first_client_id(&token).await;
    let path = format!("/clients/{id}");

    let deleted = app.request("DELETE", &path, None, Some(&token)).await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);
    assert!(deleted.body.is_null());

    let again = app.request("DELETE", &path, None, Some(&token)).await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_client_body_over_limit() {
    let app = TestApp::new().await;
    let token = app.login(ACME_ADMIN).await;

    let mut body = new_client("Oversized", "big@cliente.com");
    body["contact"] = json!("9".repeat(app.config.server.body_limit_bytes));

    let response = app.request("POST", "/clients", Some(body), Some(&token)).await;
    assert_eq!(response.status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(response.body["error"], "PAYLOAD_TOO_LARGE");
}
