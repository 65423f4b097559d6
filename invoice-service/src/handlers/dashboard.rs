use crate::dtos::{DashboardStats, RecentInvoice};
use crate::models::InvoiceStatus;
use crate::startup::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use service_core::error::AppError;

pub async fn dashboard_stats(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let store = &state.store;

    let total_customers = store.count_customers().await?;
    let total_invoices = store.count_invoices(None).await?;

    let draft_invoices = store.count_invoices(Some(InvoiceStatus::Draft)).await?;
    let sent_invoices = store.count_invoices(Some(InvoiceStatus::Sent)).await?;
    let paid_invoices = store.count_invoices(Some(InvoiceStatus::Paid)).await?;
    let overdue_invoices = store.count_invoices(Some(InvoiceStatus::Overdue)).await?;

    let paid_amount = store.sum_invoice_totals(InvoiceStatus::Paid).await?;
    let pending_amount = store.sum_invoice_totals(InvoiceStatus::Sent).await?;
    let overdue_amount = store.sum_invoice_totals(InvoiceStatus::Overdue).await?;

    // Draft and cancelled invoices never contribute to revenue.
    let total_revenue = paid_amount + pending_amount + overdue_amount;

    Ok(Json(DashboardStats {
        total_customers,
        total_invoices,
        total_revenue,
        pending_amount,
        overdue_amount,
        paid_amount,
        draft_invoices,
        sent_invoices,
        paid_invoices,
        overdue_invoices,
    }))
}

pub async fn recent_invoices(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let invoices = state.store.recent_invoices(10).await?;

    let mut responses = Vec::with_capacity(invoices.len());
    for invoice in invoices {
        let customer_name = state
            .store
            .fetch_customer(&invoice.customer_id)
            .await?
            .map(|c| c.name)
            .unwrap_or_else(|| "Unknown Customer".to_string());
        responses.push(RecentInvoice::from_invoice(invoice, customer_name));
    }

    Ok(Json(responses))
}
