//! Test helpers for complaint-service integration tests.
//!
//! Spawns the real HTTP server on a random port with an in-memory store.

#![allow(dead_code)]

use complaint_service::{
    config::ComplaintConfig,
    services::{InMemoryUserStore, RandomIdGenerator},
    startup::Application,
    AppState,
};
use serde_json::{json, Value};
use std::sync::Arc;

pub const TEST_ADMIN_API_KEY: &str = "test-admin-key-12345";

pub struct TestApp {
    pub address: String,
    pub port: u16,
    client: reqwest::Client,
}

impl TestApp {
    /// Spawn with open admin routes.
    pub async fn spawn() -> Self {
        Self::spawn_with(test_config(None)).await
    }

    /// Spawn with admin routes guarded by [`TEST_ADMIN_API_KEY`].
    pub async fn spawn_with_admin_key() -> Self {
        Self::spawn_with(test_config(Some(TEST_ADMIN_API_KEY))).await
    }

    async fn spawn_with(config: ComplaintConfig) -> Self {
        let state = AppState::with_parts(
            config,
            Arc::new(InMemoryUserStore::new()),
            Arc::new(RandomIdGenerator::with_seed(99)),
        );

        let app = Application::build_with_state(state)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to answer its health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            client,
        }
    }

    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    /// Register a user and return the envelope's `data` (the user).
    pub async fn register(&self, name: &str, email: &str) -> Value {
        let response = self
            .client
            .post(self.url("/register"))
            .json(&json!({ "name": name, "email": email }))
            .send()
            .await
            .expect("Failed to execute register request");
        assert_eq!(response.status(), 201);

        let body: Value = response.json().await.expect("Failed to parse register body");
        body["data"].clone()
    }

    /// Log in and return the session token.
    pub async fn login(&self, secret_code: &str) -> String {
        let response = self
            .client
            .post(self.url("/login"))
            .json(&json!({ "secretCode": secret_code }))
            .send()
            .await
            .expect("Failed to execute login request");
        assert_eq!(response.status(), 200);

        let body: Value = response.json().await.expect("Failed to parse login body");
        body["data"]["sessionToken"]
            .as_str()
            .expect("Login response missing sessionToken")
            .to_string()
    }

    pub async fn submit_complaint(&self, token: &str, title: &str, rating: i64) -> Value {
        let response = self
            .client
            .post(self.url("/submitComplaint"))
            .bearer_auth(token)
            .json(&json!({ "title": title, "summary": "S", "rating": rating }))
            .send()
            .await
            .expect("Failed to execute submit request");
        assert_eq!(response.status(), 201);

        let body: Value = response.json().await.expect("Failed to parse submit body");
        body["data"].clone()
    }

    pub async fn admin_complaints(&self) -> Vec<Value> {
        let body: Value = self
            .client
            .get(self.url("/getAllComplaintsForAdmin"))
            .header("x-admin-api-key", TEST_ADMIN_API_KEY)
            .send()
            .await
            .expect("Failed to execute admin list request")
            .json()
            .await
            .expect("Failed to parse admin list body");

        body["data"]
            .as_array()
            .expect("Admin list data is not an array")
            .clone()
    }
}

pub fn test_config(admin_api_key: Option<&str>) -> ComplaintConfig {
    let mut config = ComplaintConfig::default();
    config.common.port = 0;
    config.service_name = "complaint-service-test".to_string();
    config.log_level = "error".to_string();
    config.security.admin_api_key = admin_api_key.map(str::to_string);
    config
}
