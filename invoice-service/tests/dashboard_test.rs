mod common;

use common::TestApp;
use serde_json::{json, Value};

async fn set_status(app: &TestApp, invoice_id: &str, status: &str) {
    let response = app
        .put(
            &format!("/api/invoices/{}/status", invoice_id),
            &json!({ "status": status }),
        )
        .await;
    assert!(response.status().is_success());
}

fn items(amount: f64) -> Value {
    json!([{ "description": "Work", "quantity": 1, "unit_price": amount }])
}

#[tokio::test]
async fn revenue_excludes_draft_and_cancelled() {
    let app = TestApp::spawn().await;
    let customer_id = app.seed_customer("Acme Corp", "billing@acme.test").await;

    let paid = app.seed_invoice(&customer_id, items(1000.0)).await;
    let sent = app.seed_invoice(&customer_id, items(200.0)).await;
    let overdue = app.seed_invoice(&customer_id, items(30.0)).await;
    let cancelled = app.seed_invoice(&customer_id, items(9999.0)).await;
    let _draft = app.seed_invoice(&customer_id, items(8888.0)).await;

    set_status(&app, &paid, "paid").await;
    set_status(&app, &sent, "sent").await;
    set_status(&app, &overdue, "overdue").await;
    set_status(&app, &cancelled, "cancelled").await;

    let stats: Value = app.get("/api/dashboard/stats").await.json().await.unwrap();
    assert_eq!(stats["total_customers"], 1);
    assert_eq!(stats["total_invoices"], 5);
    assert_eq!(stats["paid_amount"], 1000.0);
    assert_eq!(stats["pending_amount"], 200.0);
    assert_eq!(stats["overdue_amount"], 30.0);
    assert_eq!(stats["total_revenue"], 1230.0);
    assert_eq!(stats["draft_invoices"], 1);
    assert_eq!(stats["sent_invoices"], 1);
    assert_eq!(stats["paid_invoices"], 1);
    assert_eq!(stats["overdue_invoices"], 1);
}

#[tokio::test]
async fn empty_store_yields_zero_stats() {
    let app = TestApp::spawn().await;

    let stats: Value = app.get("/api/dashboard/stats").await.json().await.unwrap();
    assert_eq!(stats["total_customers"], 0);
    assert_eq!(stats["total_invoices"], 0);
    assert_eq!(stats["total_revenue"], 0.0);
}

#[tokio::test]
async fn recent_invoices_are_capped_at_ten_newest() {
    let app = TestApp::spawn().await;
    let customer_id = app.seed_customer("Acme Corp", "billing@acme.test").await;

    for _ in 0..12 {
        app.seed_invoice(&customer_id, items(10.0)).await;
    }

    let body: Value = app
        .get("/api/dashboard/recent-invoices")
        .await
        .json()
        .await
        .unwrap();
    let recent = body.as_array().unwrap();
    assert_eq!(recent.len(), 10);
    assert_eq!(recent[0]["customer_name"], "Acme Corp");
}

#[tokio::test]
async fn recent_invoices_tolerate_deleted_customers() {
    let app = TestApp::spawn().await;
    let customer_id = app.seed_customer("Acme Corp", "billing@acme.test").await;
    app.seed_invoice(&customer_id, items(10.0)).await;
    app.delete(&format!("/api/customers/{}", customer_id)).await;

    let body: Value = app
        .get("/api/dashboard/recent-invoices")
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(body[0]["customer_name"], "Unknown Customer");
}
