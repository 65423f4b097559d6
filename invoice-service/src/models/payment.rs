use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A recorded payment against an invoice. Append-only: once created a
/// payment is never mutated (no correction or void flow exists).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    #[serde(rename = "_id")]
    pub payment_id: String,
    pub invoice_id: String,
    pub amount: Decimal,
    pub payment_date: NaiveDate,
    pub payment_method: String,
    pub reference_number: Option<String>,
    pub notes: Option<String>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

impl Payment {
    pub fn new(
        invoice_id: String,
        amount: Decimal,
        payment_date: NaiveDate,
        payment_method: String,
    ) -> Self {
        Self {
            payment_id: Uuid::new_v4().to_string(),
            invoice_id,
            amount,
            payment_date,
            payment_method,
            reference_number: None,
            notes: None,
            created_at: Utc::now(),
        }
    }
}
