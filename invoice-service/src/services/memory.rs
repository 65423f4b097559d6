use crate::models::{CompanySettings, Customer, Invoice, InvoiceStatus, Payment, PaymentStatus};
use crate::services::store::RecordStore;
use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use service_core::error::AppError;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-process record store. Selected with `STORE_BACKEND=memory`; used by
/// the test harness and for running the service without a database.
#[derive(Default)]
pub struct MemoryStore {
    customers: RwLock<HashMap<String, Customer>>,
    invoices: RwLock<HashMap<String, Invoice>>,
    payments: RwLock<Vec<Payment>>,
    settings: RwLock<Option<CompanySettings>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn health_check(&self) -> Result<(), AppError> {
        Ok(())
    }

    async fn insert_customer(&self, customer: &Customer) -> Result<(), AppError> {
        self.customers
            .write()
            .await
            .insert(customer.customer_id.clone(), customer.clone());
        Ok(())
    }

    async fn list_customers(&self) -> Result<Vec<Customer>, AppError> {
        let mut customers: Vec<Customer> = self.customers.read().await.values().cloned().collect();
        customers.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(customers)
    }

    async fn fetch_customer(&self, id: &str) -> Result<Option<Customer>, AppError> {
        Ok(self.customers.read().await.get(id).cloned())
    }

    async fn replace_customer(&self, id: &str, customer: &Customer) -> Result<u64, AppError> {
        let mut customers = self.customers.write().await;
        match customers.get_mut(id) {
            Some(existing) => {
                *existing = customer.clone();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_customer(&self, id: &str) -> Result<u64, AppError> {
        Ok(self.customers.write().await.remove(id).map_or(0, |_| 1))
    }

    async fn search_customers(&self, query: &str, limit: i64) -> Result<Vec<Customer>, AppError> {
        let mut matches: Vec<Customer> = self
            .customers
            .read()
            .await
            .values()
            .filter(|c| {
                contains_ci(&c.name, query)
                    || contains_ci(&c.email, query)
                    || c.company.as_deref().is_some_and(|co| contains_ci(co, query))
            })
            .cloned()
            .collect();
        matches.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        matches.truncate(limit as usize);
        Ok(matches)
    }

    async fn count_customers(&self) -> Result<u64, AppError> {
        Ok(self.customers.read().await.len() as u64)
    }

    async fn insert_invoice(&self, invoice: &Invoice) -> Result<(), AppError> {
        self.invoices
            .write()
            .await
            .insert(invoice.invoice_id.clone(), invoice.clone());
        Ok(())
    }

    async fn list_invoices(&self) -> Result<Vec<Invoice>, AppError> {
        let mut invoices: Vec<Invoice> = self.invoices.read().await.values().cloned().collect();
        invoices.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(invoices)
    }

    async fn fetch_invoice(&self, id: &str) -> Result<Option<Invoice>, AppError> {
        Ok(self.invoices.read().await.get(id).cloned())
    }

    async fn replace_invoice(&self, id: &str, invoice: &Invoice) -> Result<u64, AppError> {
        let mut invoices = self.invoices.write().await;
        match invoices.get_mut(id) {
            Some(existing) => {
                *existing = invoice.clone();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_invoice(&self, id: &str) -> Result<u64, AppError> {
        Ok(self.invoices.write().await.remove(id).map_or(0, |_| 1))
    }

    async fn update_invoice_status(
        &self,
        id: &str,
        status: InvoiceStatus,
    ) -> Result<u64, AppError> {
        let mut invoices = self.invoices.write().await;
        match invoices.get_mut(id) {
            Some(invoice) => {
                invoice.status = status;
                invoice.updated_at = Utc::now();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn apply_payment(
        &self,
        id: &str,
        amount_paid: Decimal,
        payment_status: PaymentStatus,
    ) -> Result<u64, AppError> {
        let mut invoices = self.invoices.write().await;
        match invoices.get_mut(id) {
            Some(invoice) => {
                invoice.amount_paid = amount_paid;
                invoice.payment_status = payment_status;
                invoice.updated_at = Utc::now();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn recent_invoices(&self, limit: i64) -> Result<Vec<Invoice>, AppError> {
        let mut invoices: Vec<Invoice> = self.invoices.read().await.values().cloned().collect();
        invoices.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        invoices.truncate(limit as usize);
        Ok(invoices)
    }

    async fn search_invoices(&self, query: &str, limit: i64) -> Result<Vec<Invoice>, AppError> {
        let mut matches: Vec<Invoice> = self
            .invoices
            .read()
            .await
            .values()
            .filter(|i| {
                contains_ci(&i.invoice_number, query)
                    || i.notes.as_deref().is_some_and(|n| contains_ci(n, query))
            })
            .cloned()
            .collect();
        matches.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        matches.truncate(limit as usize);
        Ok(matches)
    }

    async fn count_invoices(&self, status: Option<InvoiceStatus>) -> Result<u64, AppError> {
        let invoices = self.invoices.read().await;
        Ok(match status {
            Some(status) => invoices.values().filter(|i| i.status == status).count() as u64,
            None => invoices.len() as u64,
        })
    }

    async fn sum_invoice_totals(&self, status: InvoiceStatus) -> Result<Decimal, AppError> {
        Ok(self
            .invoices
            .read()
            .await
            .values()
            .filter(|i| i.status == status)
            .map(|i| i.total_amount.unwrap_or(Decimal::ZERO))
            .sum())
    }

    async fn fetch_settings(&self) -> Result<Option<CompanySettings>, AppError> {
        Ok(self.settings.read().await.clone())
    }

    async fn upsert_settings(&self, settings: &CompanySettings) -> Result<(), AppError> {
        *self.settings.write().await = Some(settings.clone());
        Ok(())
    }

    async fn insert_payment(&self, payment: &Payment) -> Result<(), AppError> {
        self.payments.write().await.push(payment.clone());
        Ok(())
    }

    async fn payments_for_invoice(&self, invoice_id: &str) -> Result<Vec<Payment>, AppError> {
        Ok(self
            .payments
            .read()
            .await
            .iter()
            .filter(|p| p.invoice_id == invoice_id)
            .cloned()
            .collect())
    }
}
