use crate::dtos::{InvoicePayload, InvoiceResponse, StatusPayload};
use crate::models::{CompanySettings, Invoice};
use crate::pdf;
use crate::services::totals;
use crate::startup::AppState;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde_json::json;
use service_core::error::AppError;
use validator::Validate;

pub async fn create_invoice(
    State(state): State<AppState>,
    Json(payload): Json<InvoicePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let invoice_number = payload
        .invoice_number
        .clone()
        .unwrap_or_else(|| Invoice::generate_number(Utc::now()));

    let mut invoice = payload.into_invoice(invoice_number);
    totals::recalculate(&mut invoice);

    state.store.insert_invoice(&invoice).await?;

    tracing::info!(
        invoice_id = %invoice.invoice_id,
        invoice_number = %invoice.invoice_number,
        "Invoice created"
    );

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Invoice created successfully",
            "invoice_id": invoice.invoice_id,
            "invoice_number": invoice.invoice_number,
        })),
    ))
}

pub async fn list_invoices(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let invoices = state.store.list_invoices().await?;

    let mut responses = Vec::with_capacity(invoices.len());
    for invoice in invoices {
        let customer_name = state
            .store
            .fetch_customer(&invoice.customer_id)
            .await?
            .map(|c| c.name)
            .or_else(|| Some("Unknown Customer".to_string()));
        responses.push(InvoiceResponse::from_invoice(invoice, customer_name));
    }

    Ok(Json(responses))
}

pub async fn get_invoice(
    State(state): State<AppState>,
    Path(invoice_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let invoice = state
        .store
        .fetch_invoice(&invoice_id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Invoice not found")))?;

    let customer_name = state
        .store
        .fetch_customer(&invoice.customer_id)
        .await?
        .map(|c| c.name);

    Ok(Json(InvoiceResponse::from_invoice(invoice, customer_name)))
}

pub async fn update_invoice(
    State(state): State<AppState>,
    Path(invoice_id): Path<String>,
    Json(payload): Json<InvoicePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let existing = state
        .store
        .fetch_invoice(&invoice_id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Invoice not found")))?;

    let mut invoice = payload.apply_to(&existing);
    totals::recalculate(&mut invoice);

    state.store.replace_invoice(&invoice_id, &invoice).await?;

    Ok(Json(json!({ "message": "Invoice updated successfully" })))
}

pub async fn delete_invoice(
    State(state): State<AppState>,
    Path(invoice_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let deleted = state.store.delete_invoice(&invoice_id).await?;
    if deleted == 0 {
        return Err(AppError::NotFound(anyhow::anyhow!("Invoice not found")));
    }

    tracing::info!(invoice_id = %invoice_id, "Invoice deleted");

    Ok(Json(json!({ "message": "Invoice deleted successfully" })))
}

/// Any status may be set directly; there is no transition guard.
pub async fn update_invoice_status(
    State(state): State<AppState>,
    Path(invoice_id): Path<String>,
    Json(payload): Json<StatusPayload>,
) -> Result<impl IntoResponse, AppError> {
    let matched = state
        .store
        .update_invoice_status(&invoice_id, payload.status)
        .await?;
    if matched == 0 {
        return Err(AppError::NotFound(anyhow::anyhow!("Invoice not found")));
    }

    Ok(Json(json!({ "message": "Invoice status updated successfully" })))
}

pub async fn download_invoice_pdf(
    State(state): State<AppState>,
    Path(invoice_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let invoice = state
        .store
        .fetch_invoice(&invoice_id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Invoice not found")))?;

    // A dangling customer reference is tolerated in list views but a
    // document cannot be issued without a billable party.
    let customer = state
        .store
        .fetch_customer(&invoice.customer_id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Customer not found")))?;

    let settings = state.store.fetch_settings().await?.unwrap_or_else(|| {
        CompanySettings {
            company_name: "Your Company".to_string(),
            ..Default::default()
        }
    });

    let blocks = pdf::compose_invoice(&invoice, &customer, &settings);
    let bytes = pdf::render_pdf(&blocks)?;

    tracing::info!(
        invoice_id = %invoice_id,
        invoice_number = %invoice.invoice_number,
        size = bytes.len(),
        "Invoice PDF generated"
    );

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=invoice_{}.pdf", invoice.invoice_number),
            ),
        ],
        bytes,
    ))
}
