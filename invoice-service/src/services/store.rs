use crate::models::{CompanySettings, Customer, Invoice, InvoiceStatus, Payment, PaymentStatus};
use async_trait::async_trait;
use rust_decimal::Decimal;
use service_core::error::AppError;

/// Record-store boundary: simple key lookups, filters, and replaces over
/// four independent collections (customers, invoices, company_settings,
/// payments). Conflicting writes are serialized by the backing store;
/// last-write-wins is acceptable.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn health_check(&self) -> Result<(), AppError>;

    // Customers
    async fn insert_customer(&self, customer: &Customer) -> Result<(), AppError>;
    async fn list_customers(&self) -> Result<Vec<Customer>, AppError>;
    async fn fetch_customer(&self, id: &str) -> Result<Option<Customer>, AppError>;
    /// Replaces the stored record; returns the matched count (0 = no such id).
    async fn replace_customer(&self, id: &str, customer: &Customer) -> Result<u64, AppError>;
    /// Returns the deleted count (0 = no such id).
    async fn delete_customer(&self, id: &str) -> Result<u64, AppError>;
    /// Case-insensitive substring match on name, email, or company.
    async fn search_customers(&self, query: &str, limit: i64) -> Result<Vec<Customer>, AppError>;
    async fn count_customers(&self) -> Result<u64, AppError>;

    // Invoices
    async fn insert_invoice(&self, invoice: &Invoice) -> Result<(), AppError>;
    async fn list_invoices(&self) -> Result<Vec<Invoice>, AppError>;
    async fn fetch_invoice(&self, id: &str) -> Result<Option<Invoice>, AppError>;
    async fn replace_invoice(&self, id: &str, invoice: &Invoice) -> Result<u64, AppError>;
    async fn delete_invoice(&self, id: &str) -> Result<u64, AppError>;
    async fn update_invoice_status(&self, id: &str, status: InvoiceStatus)
        -> Result<u64, AppError>;
    /// Payment bookkeeping: sets the cumulative amount paid and the derived
    /// payment status. The only write path that touches `amount_paid`.
    async fn apply_payment(
        &self,
        id: &str,
        amount_paid: Decimal,
        payment_status: PaymentStatus,
    ) -> Result<u64, AppError>;
    /// Newest first by creation time.
    async fn recent_invoices(&self, limit: i64) -> Result<Vec<Invoice>, AppError>;
    /// Case-insensitive substring match on invoice_number or notes.
    async fn search_invoices(&self, query: &str, limit: i64) -> Result<Vec<Invoice>, AppError>;
    async fn count_invoices(&self, status: Option<InvoiceStatus>) -> Result<u64, AppError>;
    /// Sum of `total_amount` over invoices with the given status.
    async fn sum_invoice_totals(&self, status: InvoiceStatus) -> Result<Decimal, AppError>;

    // Company settings (singleton, replace-on-write)
    async fn fetch_settings(&self) -> Result<Option<CompanySettings>, AppError>;
    async fn upsert_settings(&self, settings: &CompanySettings) -> Result<(), AppError>;

    // Payments (append-only)
    async fn insert_payment(&self, payment: &Payment) -> Result<(), AppError>;
    async fn payments_for_invoice(&self, invoice_id: &str) -> Result<Vec<Payment>, AppError>;
}
