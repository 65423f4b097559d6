mod common;

use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn pdf_download_returns_a_document() {
    let app = TestApp::spawn().await;
    let customer_id = app.seed_customer("Acme Corp", "billing@acme.test").await;
    let invoice_id = app
        .seed_invoice(
            &customer_id,
            json!([
                { "description": "Consulting", "quantity": 40, "unit_price": 75, "tax_rate": 8.5 },
            ]),
        )
        .await;

    let response = app.get(&format!("/api/invoices/{}/pdf", invoice_id)).await;
    assert!(response.status().is_success());
    assert_eq!(
        response.headers()["content-type"].to_str().unwrap(),
        "application/pdf"
    );

    let disposition = response.headers()["content-disposition"].to_str().unwrap();
    assert!(disposition.starts_with("attachment; filename=invoice_INV-"));

    let bytes = response.bytes().await.unwrap();
    assert!(bytes.starts_with(b"%PDF"));
    assert!(bytes.len() > 1000);
}

#[tokio::test]
async fn pdf_for_missing_invoice_is_404_with_no_bytes() {
    let app = TestApp::spawn().await;

    let response = app.get("/api/invoices/no-such-id/pdf").await;
    assert_eq!(response.status().as_u16(), 404);
    assert_ne!(
        response.headers().get("content-type").map(|v| v.as_bytes()),
        Some(b"application/pdf".as_ref())
    );
}

#[tokio::test]
async fn pdf_for_invoice_with_deleted_customer_is_404() {
    let app = TestApp::spawn().await;
    let customer_id = app.seed_customer("Acme Corp", "billing@acme.test").await;
    let invoice_id = app.seed_invoice(&customer_id, json!([])).await;

    app.delete(&format!("/api/customers/{}", customer_id)).await;

    let response = app.get(&format!("/api/invoices/{}/pdf", invoice_id)).await;
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn corrupt_logo_does_not_fail_rendering() {
    let app = TestApp::spawn().await;

    // Valid base64, but not a decodable image.
    let response = app
        .post(
            "/api/company-settings",
            &json!({
                "company_name": "Widgets Inc",
                "logo": "data:image/png;base64,bm90IGFuIGltYWdl",
            }),
        )
        .await;
    assert!(response.status().is_success());

    let customer_id = app.seed_customer("Acme Corp", "billing@acme.test").await;
    let invoice_id = app.seed_invoice(&customer_id, json!([])).await;

    let response = app.get(&format!("/api/invoices/{}/pdf", invoice_id)).await;
    assert!(response.status().is_success());

    let bytes = response.bytes().await.unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}
