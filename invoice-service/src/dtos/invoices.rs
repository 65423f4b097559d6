use crate::models::{Invoice, InvoiceStatus, LineItem, PaymentStatus};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Line item as submitted. Derived `total` is never accepted from input;
/// the calculator fills it on create and update. Negative quantities and
/// prices are allowed (credit lines).
#[derive(Debug, Deserialize)]
pub struct LineItemPayload {
    pub description: String,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    #[serde(default)]
    pub tax_rate: Option<Decimal>,
}

impl From<LineItemPayload> for LineItem {
    fn from(item: LineItemPayload) -> Self {
        Self {
            description: item.description,
            quantity: item.quantity,
            unit_price: item.unit_price,
            tax_rate: item.tax_rate,
            total: None,
        }
    }
}

/// Create/update body. A missing `invoice_number` gets a generated one at
/// creation. On update, `amount_paid`, `payment_status`, and `created_at`
/// are preserved from the stored record.
#[derive(Debug, Deserialize, Validate)]
pub struct InvoicePayload {
    #[validate(length(min = 1, message = "customer_id must not be empty"))]
    pub customer_id: String,
    pub invoice_number: Option<String>,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub line_items: Vec<LineItemPayload>,
    pub status: Option<InvoiceStatus>,
    pub notes: Option<String>,
    pub terms: Option<String>,
}

impl InvoicePayload {
    pub fn into_invoice(self, invoice_number: String) -> Invoice {
        let mut invoice = Invoice::new(
            invoice_number,
            self.customer_id,
            self.issue_date,
            self.due_date,
            self.line_items.into_iter().map(LineItem::from).collect(),
        );
        invoice.status = self.status.unwrap_or(InvoiceStatus::Draft);
        invoice.notes = self.notes;
        invoice.terms = self.terms;
        invoice
    }

    /// Rebuilds the record for a PUT, keeping identity, payment progress,
    /// and `created_at`. An omitted status keeps the stored one.
    pub fn apply_to(self, existing: &Invoice) -> Invoice {
        let status = self.status.unwrap_or(existing.status);
        let number = self
            .invoice_number
            .clone()
            .unwrap_or_else(|| existing.invoice_number.clone());
        let mut invoice = self.into_invoice(number);
        invoice.invoice_id = existing.invoice_id.clone();
        invoice.created_at = existing.created_at;
        invoice.amount_paid = existing.amount_paid;
        invoice.payment_status = existing.payment_status;
        invoice.status = status;
        invoice
    }
}

#[derive(Debug, Deserialize)]
pub struct StatusPayload {
    pub status: InvoiceStatus,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize)]
pub struct InvoiceResponse {
    pub id: String,
    pub invoice_number: String,
    pub customer_id: String,
    pub customer_name: Option<String>,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub status: InvoiceStatus,
    pub line_items: Vec<LineItem>,
    pub subtotal: Decimal,
    pub tax_amount: Decimal,
    pub total_amount: Decimal,
    pub notes: Option<String>,
    pub terms: Option<String>,
    pub payment_status: PaymentStatus,
    pub amount_paid: Decimal,
    pub created_at: String,
    pub updated_at: String,
}

impl InvoiceResponse {
    pub fn from_invoice(invoice: Invoice, customer_name: Option<String>) -> Self {
        Self {
            id: invoice.invoice_id,
            invoice_number: invoice.invoice_number,
            customer_id: invoice.customer_id,
            customer_name,
            issue_date: invoice.issue_date,
            due_date: invoice.due_date,
            status: invoice.status,
            line_items: invoice.line_items,
            subtotal: invoice.subtotal.unwrap_or(Decimal::ZERO),
            tax_amount: invoice.tax_amount.unwrap_or(Decimal::ZERO),
            total_amount: invoice.total_amount.unwrap_or(Decimal::ZERO),
            notes: invoice.notes,
            terms: invoice.terms,
            payment_status: invoice.payment_status,
            amount_paid: invoice.amount_paid,
            created_at: invoice.created_at.to_rfc3339(),
            updated_at: invoice.updated_at.to_rfc3339(),
        }
    }
}

impl From<Invoice> for InvoiceResponse {
    fn from(invoice: Invoice) -> Self {
        Self::from_invoice(invoice, None)
    }
}
