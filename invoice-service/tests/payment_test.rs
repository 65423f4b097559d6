mod common;

use common::TestApp;
use serde_json::{json, Value};

async fn pay(app: &TestApp, invoice_id: &str, amount: f64) -> reqwest::Response {
    app.post(
        "/api/payments",
        &json!({
            "invoice_id": invoice_id,
            "amount": amount,
            "payment_date": "2026-01-10",
            "payment_method": "bank_transfer",
        }),
    )
    .await
}

async fn fetch_invoice(app: &TestApp, invoice_id: &str) -> Value {
    app.get(&format!("/api/invoices/{}", invoice_id))
        .await
        .json()
        .await
        .unwrap()
}

#[tokio::test]
async fn partial_then_full_payment_progression() {
    let app = TestApp::spawn().await;
    let customer_id = app.seed_customer("Acme Corp", "billing@acme.test").await;
    let invoice_id = app
        .seed_invoice(
            &customer_id,
            json!([
                { "description": "Consulting", "quantity": 40, "unit_price": 75, "tax_rate": 8.5 },
                { "description": "Courier", "quantity": 1, "unit_price": 15, "tax_rate": 0 },
            ]),
        )
        .await;

    // Total is 3270.00; 1500 leaves it partial.
    assert_eq!(pay(&app, &invoice_id, 1500.0).await.status().as_u16(), 201);
    let body = fetch_invoice(&app, &invoice_id).await;
    assert_eq!(body["amount_paid"], 1500.0);
    assert_eq!(body["payment_status"], "partial");

    // The remaining 1770 settles it exactly.
    assert_eq!(pay(&app, &invoice_id, 1770.0).await.status().as_u16(), 201);
    let body = fetch_invoice(&app, &invoice_id).await;
    assert_eq!(body["amount_paid"], 3270.0);
    assert_eq!(body["payment_status"], "paid");
}

#[tokio::test]
async fn payment_against_missing_invoice_leaves_no_record() {
    let app = TestApp::spawn().await;

    let response = pay(&app, "no-such-invoice", 100.0).await;
    assert_eq!(response.status().as_u16(), 404);

    let body: Value = app
        .get("/api/payments/invoice/no-such-invoice")
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(body.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn payments_are_listed_per_invoice() {
    let app = TestApp::spawn().await;
    let customer_id = app.seed_customer("Acme Corp", "billing@acme.test").await;
    let invoice_id = app
        .seed_invoice(
            &customer_id,
            json!([{ "description": "Widget", "quantity": 1, "unit_price": 500 }]),
        )
        .await;
    let other_id = app
        .seed_invoice(
            &customer_id,
            json!([{ "description": "Widget", "quantity": 1, "unit_price": 500 }]),
        )
        .await;

    pay(&app, &invoice_id, 100.0).await;
    pay(&app, &invoice_id, 200.0).await;
    pay(&app, &other_id, 500.0).await;

    let body: Value = app
        .get(&format!("/api/payments/invoice/{}", invoice_id))
        .await
        .json()
        .await
        .unwrap();
    let payments = body.as_array().unwrap();
    assert_eq!(payments.len(), 2);
    assert!(payments.iter().all(|p| p["invoice_id"] == invoice_id.as_str()));
}

#[tokio::test]
async fn non_positive_payments_are_rejected() {
    let app = TestApp::spawn().await;
    let customer_id = app.seed_customer("Acme Corp", "billing@acme.test").await;
    let invoice_id = app
        .seed_invoice(
            &customer_id,
            json!([{ "description": "Widget", "quantity": 1, "unit_price": 100 }]),
        )
        .await;

    assert_eq!(pay(&app, &invoice_id, 60.0).await.status().as_u16(), 201);

    // A negative amount would roll amount_paid backwards.
    assert_eq!(pay(&app, &invoice_id, -50.0).await.status().as_u16(), 400);
    assert_eq!(pay(&app, &invoice_id, 0.0).await.status().as_u16(), 400);

    let body = fetch_invoice(&app, &invoice_id).await;
    assert_eq!(body["amount_paid"], 60.0);
    assert_eq!(body["payment_status"], "partial");

    // The rejected payments left no records behind.
    let payments: Value = app
        .get(&format!("/api/payments/invoice/{}", invoice_id))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(payments.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn overpayment_marks_the_invoice_paid() {
    let app = TestApp::spawn().await;
    let customer_id = app.seed_customer("Acme Corp", "billing@acme.test").await;
    let invoice_id = app
        .seed_invoice(
            &customer_id,
            json!([{ "description": "Widget", "quantity": 1, "unit_price": 100 }]),
        )
        .await;

    pay(&app, &invoice_id, 150.0).await;

    let body = fetch_invoice(&app, &invoice_id).await;
    assert_eq!(body["amount_paid"], 150.0);
    assert_eq!(body["payment_status"], "paid");
}
