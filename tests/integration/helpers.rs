//! Shared test helpers for integration tests.
//!
//! Every test gets its own in-memory store seeded with the demo dataset,
//! so tests need no database and never share state.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use crm_auth::password::PasswordHasher;
use crm_core::config::{AppConfig, DatabaseProvider};
use crm_database::Repositories;
use crm_service::DemoSeeder;

/// Seeded demo accounts: `(email, password)`.
pub const ACME_ADMIN: (&str, &str) = ("admin@acme.com", "admin123");
pub const ACME_USER: (&str, &str) = ("user@acme.com", "user123");
pub const ACME_GUEST: (&str, &str) = ("guest@acme.com", "guest123");
pub const GLOBEX_ADMIN: (&str, &str) = ("admin@globex.com", "admin123");
pub const GLOBEX_USER: (&str, &str) = ("user@globex.com", "user123");

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Repositories behind the router, for direct assertions
    pub repos: Repositories,
    /// Application config
    pub config: AppConfig,
}

impl TestApp {
    /// Create a new test application with the demo data loaded
    pub async fn new() -> Self {
        let mut config = AppConfig::default();
        config.database.provider = DatabaseProvider::Memory;
        config.auth.jwt_secret = "integration-test-secret".to_string();
        config.auth.argon2_memory_kib = 64;
        config.auth.argon2_iterations = 1;
        config.validate().expect("test config must be valid");

        let repos = Repositories::in_memory();
        let hasher = Arc::new(PasswordHasher::new(&config.auth).expect("hasher"));
        DemoSeeder::new(
            Arc::clone(&repos.users),
            Arc::clone(&repos.clients),
            hasher,
        )
        .run(false)
        .await
        .expect("Failed to seed demo data");

        let state =
            crm_api::build_state(config.clone(), repos.clone()).expect("Failed to build state");
        let router = crm_api::build_app(state);

        Self {
            router,
            repos,
            config,
        }
    }

    /// Login and return the full response body
    pub async fn login_body(&self, (email, password): (&str, &str)) -> Value {
        let response = self
            .request(
                "POST",
                "/auth/login",
                Some(serde_json::json!({ "email": email, "password": password })),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );
        response.body
    }

    /// Login and return JWT access token
    pub async fn login(&self, account: (&str, &str)) -> String {
        self.login_body(account).await["access_token"]
            .as_str()
            .expect("No access_token in login response")
            .to_string()
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");
        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }

    /// Id of the first client of the caller's tenant
    pub async fn first_client_id(&self, token: &str) -> String {
        let response = self.request("GET", "/clients", None, Some(token)).await;
        assert_eq!(response.status, StatusCode::OK);
        response.body[0]["id"]
            .as_str()
            .expect("client id")
            .to_string()
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body (`Null` when empty)
    pub body: Value,
}

/// A client body accepted by `POST /clients`.
pub fn new_client(name: &str, email: &str) -> Value {
    serde_json::json!({
        "name": name,
        "email": email,
        "contact": "(11) 98888-0000",
        "address": {
            "street": "Rua Vergueiro",
            "neighborhood": "Liberdade",
            "number": "100",
            "state": "SP"
        },
        "imageUrl": "https://example.com/new.jpg"
    })
}
