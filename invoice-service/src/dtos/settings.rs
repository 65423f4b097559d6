use crate::models::CompanySettings;
use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

fn default_payment_terms() -> String {
    "Net 30".to_string()
}

fn default_currency() -> String {
    "USD".to_string()
}

/// Wholesale replacement body: every omitted field falls back to its blank
/// default, matching the singleton's replace-not-patch semantics.
#[derive(Debug, Deserialize, Validate)]
pub struct SettingsPayload {
    #[validate(length(min = 1, message = "company_name must not be empty"))]
    pub company_name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zip_code: String,
    #[serde(default)]
    pub country: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub tax_number: Option<String>,
    pub logo: Option<String>,
    #[serde(default)]
    pub default_tax_rate: Decimal,
    #[serde(default = "default_payment_terms")]
    pub default_payment_terms: String,
    #[serde(default = "default_currency")]
    pub currency: String,
}

impl SettingsPayload {
    pub fn into_settings(self) -> CompanySettings {
        CompanySettings {
            company_name: self.company_name,
            address: self.address,
            city: self.city,
            state: self.state,
            zip_code: self.zip_code,
            country: self.country,
            phone: self.phone,
            email: self.email,
            website: self.website,
            tax_number: self.tax_number,
            logo: self.logo,
            default_tax_rate: self.default_tax_rate,
            default_payment_terms: self.default_payment_terms,
            currency: self.currency,
            updated_at: Utc::now(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SettingsResponse {
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
    pub logo: Option<String>,
    pub default_tax_rate: Decimal,
    pub default_payment_terms: String,
    pub currency: String,
    pub updated_at: String,
}

impl From<CompanySettings> for SettingsResponse {
    fn from(settings: CompanySettings) -> Self {
        Self {
            company_name: settings.company_name,
            address: settings.address,
            city: settings.city,
            state: settings.state,
            zip_code: settings.zip_code,
            country: settings.country,
            phone: settings.phone,
            email: settings.email,
            website: settings.website,
            tax_number: settings.tax_number,
            logo: settings.logo,
            default_tax_rate: settings.default_tax_rate,
            default_payment_terms: settings.default_payment_terms,
            currency: settings.currency,
            updated_at: settings.updated_at.to_rfc3339(),
        }
    }
}
