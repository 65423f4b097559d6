use crate::models::{Invoice, InvoiceStatus};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

/// Aggregate snapshot for the dashboard. `total_revenue` counts only
/// invoices a business would recognize: paid, sent (pending), and overdue.
/// Draft and cancelled never contribute.
#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub total_customers: u64,
    pub total_invoices: u64,
    pub total_revenue: Decimal,
    pub pending_amount: Decimal,
    pub overdue_amount: Decimal,
    pub paid_amount: Decimal,
    pub draft_invoices: u64,
    pub sent_invoices: u64,
    pub paid_invoices: u64,
    pub overdue_invoices: u64,
}

#[derive(Debug, Serialize)]
pub struct RecentInvoice {
    pub id: String,
    pub invoice_number: String,
    pub customer_name: String,
    pub total_amount: Decimal,
    pub status: InvoiceStatus,
    pub due_date: NaiveDate,
    pub created_at: String,
}

impl RecentInvoice {
    pub fn from_invoice(invoice: Invoice, customer_name: String) -> Self {
        Self {
            id: invoice.invoice_id,
            invoice_number: invoice.invoice_number,
            customer_name,
            total_amount: invoice.total_amount.unwrap_or(Decimal::ZERO),
            status: invoice.status,
            due_date: invoice.due_date,
            created_at: invoice.created_at.to_rfc3339(),
        }
    }
}
