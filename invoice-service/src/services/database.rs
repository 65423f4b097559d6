use crate::models::{CompanySettings, Customer, Invoice, InvoiceStatus, Payment, PaymentStatus};
use crate::services::store::RecordStore;
use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::{
    bson::{doc, Bson},
    options::{FindOptions, IndexOptions, ReplaceOptions},
    Client as MongoClient, Collection, Database, IndexModel,
};
use rust_decimal::Decimal;
use service_core::error::AppError;

/// MongoDB-backed record store. Four collections: customers, invoices,
/// company_settings (at most one live record), payments.
#[derive(Clone)]
pub struct MongoStore {
    client: MongoClient,
    db: Database,
}

impl MongoStore {
    pub async fn connect(uri: &str, database: &str) -> Result<Self, AppError> {
        tracing::info!(uri = %uri, "Connecting to MongoDB");
        let client = MongoClient::with_uri_str(uri).await.map_err(|e| {
            tracing::error!("Failed to connect to MongoDB at {}: {}", uri, e);
            AppError::from(e)
        })?;
        let db = client.database(database);
        tracing::info!(database = %database, "Successfully connected to MongoDB database");
        Ok(Self { client, db })
    }

    pub async fn initialize_indexes(&self) -> Result<(), AppError> {
        tracing::info!("Creating MongoDB indexes for invoice-service");

        let customer_index = IndexModel::builder()
            .keys(doc! { "customer_id": 1 })
            .options(
                IndexOptions::builder()
                    .name("customer_lookup".to_string())
                    .build(),
            )
            .build();
        self.invoices().create_index(customer_index, None).await?;

        let status_index = IndexModel::builder()
            .keys(doc! { "status": 1 })
            .options(
                IndexOptions::builder()
                    .name("status_lookup".to_string())
                    .build(),
            )
            .build();
        self.invoices().create_index(status_index, None).await?;

        let payment_index = IndexModel::builder()
            .keys(doc! { "invoice_id": 1 })
            .options(
                IndexOptions::builder()
                    .name("invoice_lookup".to_string())
                    .build(),
            )
            .build();
        self.payments().create_index(payment_index, None).await?;

        Ok(())
    }

    pub fn client(&self) -> &MongoClient {
        &self.client
    }

    fn customers(&self) -> Collection<Customer> {
        self.db.collection("customers")
    }

    fn invoices(&self) -> Collection<Invoice> {
        self.db.collection("invoices")
    }

    fn settings(&self) -> Collection<CompanySettings> {
        self.db.collection("company_settings")
    }

    fn payments(&self) -> Collection<Payment> {
        self.db.collection("payments")
    }
}

fn to_bson<T: serde::Serialize>(value: &T) -> Result<Bson, AppError> {
    mongodb::bson::to_bson(value)
        .map_err(|e| AppError::InternalError(anyhow::anyhow!("BSON serialization failed: {}", e)))
}

#[async_trait]
impl RecordStore for MongoStore {
    async fn health_check(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }

    async fn insert_customer(&self, customer: &Customer) -> Result<(), AppError> {
        self.customers().insert_one(customer, None).await?;
        Ok(())
    }

    async fn list_customers(&self) -> Result<Vec<Customer>, AppError> {
        let cursor = self.customers().find(doc! {}, None).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn fetch_customer(&self, id: &str) -> Result<Option<Customer>, AppError> {
        Ok(self.customers().find_one(doc! { "_id": id }, None).await?)
    }

    async fn replace_customer(&self, id: &str, customer: &Customer) -> Result<u64, AppError> {
        let result = self
            .customers()
            .replace_one(doc! { "_id": id }, customer, None)
            .await?;
        Ok(result.matched_count)
    }

    async fn delete_customer(&self, id: &str) -> Result<u64, AppError> {
        let result = self.customers().delete_one(doc! { "_id": id }, None).await?;
        Ok(result.deleted_count)
    }

    async fn search_customers(&self, query: &str, limit: i64) -> Result<Vec<Customer>, AppError> {
        let filter = doc! {
            "$or": [
                { "name": { "$regex": query, "$options": "i" } },
                { "email": { "$regex": query, "$options": "i" } },
                { "company": { "$regex": query, "$options": "i" } },
            ]
        };
        let options = FindOptions::builder().limit(limit).build();
        let cursor = self.customers().find(filter, options).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn count_customers(&self) -> Result<u64, AppError> {
        Ok(self.customers().count_documents(doc! {}, None).await?)
    }

    async fn insert_invoice(&self, invoice: &Invoice) -> Result<(), AppError> {
        self.invoices().insert_one(invoice, None).await?;
        Ok(())
    }

    async fn list_invoices(&self) -> Result<Vec<Invoice>, AppError> {
        let cursor = self.invoices().find(doc! {}, None).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn fetch_invoice(&self, id: &str) -> Result<Option<Invoice>, AppError> {
        Ok(self.invoices().find_one(doc! { "_id": id }, None).await?)
    }

    async fn replace_invoice(&self, id: &str, invoice: &Invoice) -> Result<u64, AppError> {
        let result = self
            .invoices()
            .replace_one(doc! { "_id": id }, invoice, None)
            .await?;
        Ok(result.matched_count)
    }

    async fn delete_invoice(&self, id: &str) -> Result<u64, AppError> {
        let result = self.invoices().delete_one(doc! { "_id": id }, None).await?;
        Ok(result.deleted_count)
    }

    async fn update_invoice_status(
        &self,
        id: &str,
        status: InvoiceStatus,
    ) -> Result<u64, AppError> {
        let result = self
            .invoices()
            .update_one(
                doc! { "_id": id },
                doc! { "$set": {
                    "status": status.as_str(),
                    "updated_at": mongodb::bson::DateTime::now(),
                } },
                None,
            )
            .await?;
        Ok(result.matched_count)
    }

    async fn apply_payment(
        &self,
        id: &str,
        amount_paid: Decimal,
        payment_status: PaymentStatus,
    ) -> Result<u64, AppError> {
        let result = self
            .invoices()
            .update_one(
                doc! { "_id": id },
                doc! { "$set": {
                    "amount_paid": to_bson(&amount_paid)?,
                    "payment_status": payment_status.as_str(),
                    "updated_at": mongodb::bson::DateTime::now(),
                } },
                None,
            )
            .await?;
        Ok(result.matched_count)
    }

    async fn recent_invoices(&self, limit: i64) -> Result<Vec<Invoice>, AppError> {
        let options = FindOptions::builder()
            .sort(doc! { "created_at": -1 })
            .limit(limit)
            .build();
        let cursor = self.invoices().find(doc! {}, options).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn search_invoices(&self, query: &str, limit: i64) -> Result<Vec<Invoice>, AppError> {
        let filter = doc! {
            "$or": [
                { "invoice_number": { "$regex": query, "$options": "i" } },
                { "notes": { "$regex": query, "$options": "i" } },
            ]
        };
        let options = FindOptions::builder().limit(limit).build();
        let cursor = self.invoices().find(filter, options).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn count_invoices(&self, status: Option<InvoiceStatus>) -> Result<u64, AppError> {
        let filter = match status {
            Some(status) => doc! { "status": status.as_str() },
            None => doc! {},
        };
        Ok(self.invoices().count_documents(filter, None).await?)
    }

    async fn sum_invoice_totals(&self, status: InvoiceStatus) -> Result<Decimal, AppError> {
        let cursor = self
            .invoices()
            .find(doc! { "status": status.as_str() }, None)
            .await?;
        let invoices: Vec<Invoice> = cursor.try_collect().await?;
        Ok(invoices
            .iter()
            .map(|i| i.total_amount.unwrap_or(Decimal::ZERO))
            .sum())
    }

    async fn fetch_settings(&self) -> Result<Option<CompanySettings>, AppError> {
        Ok(self.settings().find_one(doc! {}, None).await?)
    }

    async fn upsert_settings(&self, settings: &CompanySettings) -> Result<(), AppError> {
        let options = ReplaceOptions::builder().upsert(true).build();
        self.settings()
            .replace_one(doc! {}, settings, options)
            .await?;
        Ok(())
    }

    async fn insert_payment(&self, payment: &Payment) -> Result<(), AppError> {
        self.payments().insert_one(payment, None).await?;
        Ok(())
    }

    async fn payments_for_invoice(&self, invoice_id: &str) -> Result<Vec<Payment>, AppError> {
        let cursor = self
            .payments()
            .find(doc! { "invoice_id": invoice_id }, None)
            .await?;
        Ok(cursor.try_collect().await?)
    }
}
