mod common;

use common::TestApp;
use serde_json::{json, Value};

#[tokio::test]
async fn empty_query_returns_empty_list() {
    let app = TestApp::spawn().await;
    app.seed_customer("Acme Corp", "billing@acme.test").await;

    let body: Value = app.get("/api/search/customers?q=").await.json().await.unwrap();
    assert_eq!(body.as_array().unwrap().len(), 0);

    let body: Value = app.get("/api/search/invoices?q=").await.json().await.unwrap();
    assert_eq!(body.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn customer_search_is_case_insensitive_substring() {
    let app = TestApp::spawn().await;
    app.seed_customer("Acme Corp", "billing@acme.test").await;
    app.seed_customer("Globex", "info@globex.test").await;

    let body: Value = app
        .get("/api/search/customers?q=ACME")
        .await
        .json()
        .await
        .unwrap();
    let matches = body.as_array().unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0]["name"], "Acme Corp");

    // Email matches too.
    let body: Value = app
        .get("/api/search/customers?q=globex.test")
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn invoice_search_matches_number_and_notes() {
    let app = TestApp::spawn().await;
    let customer_id = app.seed_customer("Acme Corp", "billing@acme.test").await;

    let response = app
        .post(
            "/api/invoices",
            &json!({
                "customer_id": customer_id,
                "invoice_number": "INV-CUSTOM-7",
                "issue_date": "2026-01-05",
                "due_date": "2026-02-04",
                "line_items": [],
                "notes": "Quarterly retainer",
            }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 201);

    let body: Value = app
        .get("/api/search/invoices?q=custom-7")
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(body.as_array().unwrap().len(), 1);

    let body: Value = app
        .get("/api/search/invoices?q=retainer")
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(body.as_array().unwrap().len(), 1);

    let body: Value = app
        .get("/api/search/invoices?q=nomatch")
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(body.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn search_results_are_capped_at_ten() {
    let app = TestApp::spawn().await;
    for i in 0..15 {
        app.seed_customer(&format!("Repeat Client {}", i), &format!("c{}@test.io", i))
            .await;
    }

    let body: Value = app
        .get("/api/search/customers?q=repeat")
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(body.as_array().unwrap().len(), 10);
}
