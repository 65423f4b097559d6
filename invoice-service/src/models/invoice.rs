use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Invoice lifecycle status. Any status may be set directly; there is no
/// transition guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Draft,
    Sent,
    Paid,
    Overdue,
    Cancelled,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "draft",
            InvoiceStatus::Sent => "sent",
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Overdue => "overdue",
            InvoiceStatus::Cancelled => "cancelled",
        }
    }
}

/// Payment progress, derived from recorded payments against `total_amount`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Partial,
    Paid,
    Failed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Partial => "partial",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Failed => "failed",
        }
    }
}

/// One billable row on an invoice. `total` is absent until the calculator
/// has run; after calculation it equals `round2(quantity * unit_price *
/// (1 + tax_rate / 100))`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    pub description: String,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    #[serde(default)]
    pub tax_rate: Option<Decimal>,
    #[serde(default)]
    pub total: Option<Decimal>,
}

/// Invoice document. Line items are embedded; their lifetime is the
/// invoice's. `subtotal`/`tax_amount`/`total_amount` are derived from
/// `line_items` on every create and update and are never trusted from
/// input. `amount_paid` is monotonically non-decreasing and changed only by
/// payment recording. `due_date >= issue_date` is expected but not enforced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    #[serde(rename = "_id")]
    pub invoice_id: String,
    pub invoice_number: String,
    pub customer_id: String,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub status: InvoiceStatus,
    pub line_items: Vec<LineItem>,
    pub subtotal: Option<Decimal>,
    pub tax_amount: Option<Decimal>,
    pub total_amount: Option<Decimal>,
    pub notes: Option<String>,
    pub terms: Option<String>,
    pub payment_status: PaymentStatus,
    pub amount_paid: Decimal,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl Invoice {
    pub fn new(
        invoice_number: String,
        customer_id: String,
        issue_date: NaiveDate,
        due_date: NaiveDate,
        line_items: Vec<LineItem>,
    ) -> Self {
        let now = Utc::now();
        Self {
            invoice_id: Uuid::new_v4().to_string(),
            invoice_number,
            customer_id,
            issue_date,
            due_date,
            status: InvoiceStatus::Draft,
            line_items,
            subtotal: None,
            tax_amount: None,
            total_amount: None,
            notes: None,
            terms: None,
            payment_status: PaymentStatus::Pending,
            amount_paid: Decimal::ZERO,
            created_at: now,
            updated_at: now,
        }
    }

    /// Invoice numbers are assigned at creation when the request omits one.
    pub fn generate_number(at: DateTime<Utc>) -> String {
        format!("INV-{}", at.format("%Y%m%d%H%M%S"))
    }
}
