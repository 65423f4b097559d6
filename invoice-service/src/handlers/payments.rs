use crate::dtos::{PaymentPayload, PaymentResponse};
use crate::models::PaymentStatus;
use crate::startup::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use rust_decimal::Decimal;
use serde_json::json;
use service_core::error::AppError;
use validator::Validate;

pub async fn record_payment(
    State(state): State<AppState>,
    Json(payload): Json<PaymentPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    // amount_paid is monotonically non-decreasing; a non-positive payment
    // would roll it backwards.
    if payload.amount <= Decimal::ZERO {
        return Err(AppError::BadRequest(anyhow::anyhow!(
            "Payment amount must be positive"
        )));
    }

    // The target invoice is checked before the insert so a rejected payment
    // leaves no record behind.
    let invoice = state
        .store
        .fetch_invoice(&payload.invoice_id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Invoice not found")))?;

    let payment = payload.into_payment();
    state.store.insert_payment(&payment).await?;

    let amount_paid = invoice.amount_paid + payment.amount;
    let payment_status = if amount_paid >= invoice.total_amount.unwrap_or(Decimal::ZERO) {
        PaymentStatus::Paid
    } else {
        PaymentStatus::Partial
    };

    state
        .store
        .apply_payment(&invoice.invoice_id, amount_paid, payment_status)
        .await?;

    tracing::info!(
        payment_id = %payment.payment_id,
        invoice_id = %payment.invoice_id,
        payment_status = payment_status.as_str(),
        "Payment recorded"
    );

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Payment recorded successfully",
            "payment_id": payment.payment_id,
        })),
    ))
}

pub async fn list_invoice_payments(
    State(state): State<AppState>,
    Path(invoice_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let payments = state.store.payments_for_invoice(&invoice_id).await?;
    let responses: Vec<PaymentResponse> =
        payments.into_iter().map(PaymentResponse::from).collect();
    Ok(Json(responses))
}
