use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Issuing-company profile. Singleton: at most one live record per
/// deployment, replaced wholesale on update (no partial patch semantics).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanySettings {
    pub company_name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub tax_number: Option<String>,
    /// Base64-encoded logo image (data URL).
    pub logo: Option<String>,
    pub default_tax_rate: Decimal,
    pub default_payment_terms: String,
    /// ISO 4217 code. Accepted and stored, but document formatting always
    /// uses `$` with two decimals (acknowledged limitation).
    pub currency: String,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl Default for CompanySettings {
    fn default() -> Self {
        Self {
            company_name: String::new(),
            address: String::new(),
            city: String::new(),
            state: String::new(),
            zip_code: String::new(),
            country: String::new(),
            phone: None,
            email: None,
            website: None,
            tax_number: None,
            logo: None,
            default_tax_rate: Decimal::ZERO,
            default_payment_terms: "Net 30".to_string(),
            currency: "USD".to_string(),
            updated_at: Utc::now(),
        }
    }
}
