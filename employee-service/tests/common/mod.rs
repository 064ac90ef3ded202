//! Test helpers for employee-service integration tests.
//!
//! `TestApp::spawn` needs a MongoDB reachable at `MONGODB_URI`
//! (default `mongodb://localhost:27017`); each app gets its own database.

#![allow(dead_code)]

use employee_service::config::{EmployeeConfig, MongoConfig};
use employee_service::services::EmployeeDb;
use employee_service::{AppState, Application};
use mongodb::bson::doc;
use reqwest::Client;
use serde_json::Value;
use service_core::config::Config as CoreConfig;
use std::time::Duration;
use uuid::Uuid;

pub fn test_config(db_name: &str) -> EmployeeConfig {
    EmployeeConfig {
        common: CoreConfig {
            port: 0, // Random port for testing
            service_name: "employee-service".to_string(),
            log_level: "debug".to_string(),
            otlp_endpoint: None,
        },
        mongodb: MongoConfig {
            uri: std::env::var("MONGODB_URI")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            database: db_name.to_string(),
            connect_timeout_secs: 5,
        },
    }
}

/// State for router-level tests that never reach the store. The client is
/// built lazily and pointed at a port nothing listens on.
pub async fn offline_state() -> AppState {
    let mut config = test_config("employee_offline");
    config.mongodb.uri = "mongodb://127.0.0.1:1".to_string();
    config.mongodb.connect_timeout_secs = 1;

    let db = EmployeeDb::lazy(
        &config.mongodb.uri,
        &config.mongodb.database,
        Duration::from_secs(1),
    )
    .await
    .expect("Failed to build offline client");

    AppState { config, db }
}

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub db: EmployeeDb,
    pub db_name: String,
    client: Client,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let db_name = format!("employee_test_{}", Uuid::new_v4());

        let app = Application::build(test_config(&db_name))
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let db = app.db().clone();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for HTTP server to be ready by polling health endpoint
        let client = Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            db,
            db_name,
            client,
        }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub async fn list(&self) -> reqwest::Response {
        self.client
            .get(format!("{}/employee", self.address))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn list_json(&self) -> Vec<Value> {
        let response = self.list().await;
        assert_eq!(response.status(), 200);
        response.json().await.expect("Failed to parse JSON")
    }

    pub async fn create(&self, body: &Value) -> reqwest::Response {
        self.client
            .post(format!("{}/employee", self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn update(&self, id: &str, body: &Value) -> reqwest::Response {
        self.client
            .put(format!("{}/employee/{}", self.address, id))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn delete(&self, id: &str) -> reqwest::Response {
        self.client
            .delete(format!("{}/employee/{}", self.address, id))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Create an employee and return its generated id.
    pub async fn create_id(&self, body: &Value) -> String {
        let response = self.create(body).await;
        assert_eq!(response.status(), 201);
        let created: Value = response.json().await.expect("Failed to parse JSON");
        created["id"]
            .as_str()
            .expect("Created employee has no id")
            .to_string()
    }

    pub async fn count(&self) -> u64 {
        self.db
            .employees()
            .count_documents(doc! {}, None)
            .await
            .expect("Failed to count employees")
    }

    /// Drop the per-test database.
    pub async fn cleanup(&self) {
        let _ = self.db.database().drop(None).await;
    }
}
