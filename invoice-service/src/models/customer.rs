use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A billable party. Referenced by invoices via `customer_id`; deleting a
/// customer does not cascade to its invoices.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    #[serde(rename = "_id")]
    pub customer_id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,
    pub tax_number: Option<String>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl Customer {
    pub fn new(name: String, email: String) -> Self {
        let now = Utc::now();
        Self {
            customer_id: Uuid::new_v4().to_string(),
            name,
            email,
            phone: None,
            company: None,
            address: None,
            city: None,
            state: None,
            zip_code: None,
            country: None,
            tax_number: None,
            created_at: now,
            updated_at: now,
        }
    }
}
