#![allow(dead_code)]

use invoice_service::config::{InvoiceConfig, StoreBackend, StoreConfig};
use invoice_service::startup::Application;
use serde_json::{json, Value};
use service_core::config::Config as CoreConfig;

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub client: reqwest::Client,
}

impl TestApp {
    /// Spawns the service on a random port with the in-memory store.
    pub async fn spawn() -> Self {
        let config = InvoiceConfig {
            common: CoreConfig { port: 0 },
            store: StoreConfig {
                backend: StoreBackend::Memory,
                mongodb_uri: None,
                mongodb_database: "invoice_test".to_string(),
            },
        };

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");
        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        let client = reqwest::Client::new();
        let health_url = format!("{}/api/health", address);
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

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(format!("{}{}", self.address, path))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post(&self, path: &str, body: &Value) -> reqwest::Response {
        self.client
            .post(format!("{}{}", self.address, path))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn put(&self, path: &str, body: &Value) -> reqwest::Response {
        self.client
            .put(format!("{}{}", self.address, path))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn delete(&self, path: &str) -> reqwest::Response {
        self.client
            .delete(format!("{}{}", self.address, path))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Creates a customer and returns its id.
    pub async fn seed_customer(&self, name: &str, email: &str) -> String {
        let response = self
            .post("/api/customers", &json!({ "name": name, "email": email }))
            .await;
        assert_eq!(response.status().as_u16(), 201);
        let body: Value = response.json().await.expect("Failed to parse JSON");
        body["customer_id"]
            .as_str()
            .expect("Missing customer_id")
            .to_string()
    }

    /// Creates an invoice for the customer and returns its id.
    pub async fn seed_invoice(&self, customer_id: &str, line_items: Value) -> String {
        let response = self
            .post(
                "/api/invoices",
                &json!({
                    "customer_id": customer_id,
                    "issue_date": "2026-01-05",
                    "due_date": "2026-02-04",
                    "line_items": line_items,
                }),
            )
            .await;
        assert_eq!(response.status().as_u16(), 201);
        let body: Value = response.json().await.expect("Failed to parse JSON");
        body["invoice_id"]
            .as_str()
            .expect("Missing invoice_id")
            .to_string()
    }
}
