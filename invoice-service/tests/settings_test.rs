mod common;

use common::TestApp;
use serde_json::{json, Value};

#[tokio::test]
async fn get_without_saved_settings_returns_blank_defaults() {
    let app = TestApp::spawn().await;

    let response = app.get("/api/company-settings").await;
    assert!(response.status().is_success());

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["company_name"], "");
    assert_eq!(body["default_payment_terms"], "Net 30");
    assert_eq!(body["currency"], "USD");
}

#[tokio::test]
async fn settings_round_trip_wholesale() {
    let app = TestApp::spawn().await;

    let response = app
        .post(
            "/api/company-settings",
            &json!({
                "company_name": "Widgets Inc",
                "address": "1 Factory Road",
                "city": "Springfield",
                "state": "IL",
                "zip_code": "62704",
                "country": "USA",
                "phone": "+1 555 0100",
                "default_tax_rate": 8.5,
            }),
        )
        .await;
    assert!(response.status().is_success());

    let body: Value = app.get("/api/company-settings").await.json().await.unwrap();
    assert_eq!(body["company_name"], "Widgets Inc");
    assert_eq!(body["city"], "Springfield");
    assert_eq!(body["default_tax_rate"], 8.5);

    // A second save replaces the record wholesale; omitted fields reset.
    let response = app
        .post(
            "/api/company-settings",
            &json!({ "company_name": "Widgets Inc" }),
        )
        .await;
    assert!(response.status().is_success());

    let body: Value = app.get("/api/company-settings").await.json().await.unwrap();
    assert_eq!(body["city"], "");
    assert_eq!(body["phone"], Value::Null);
    assert_eq!(body["default_tax_rate"], 0.0);
}

#[tokio::test]
async fn missing_company_name_is_rejected() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/company-settings", &json!({ "company_name": "" }))
        .await;
    assert_eq!(response.status().as_u16(), 422);
}
