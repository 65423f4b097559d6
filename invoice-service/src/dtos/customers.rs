use crate::models::Customer;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Create/update body. The same shape serves POST and PUT; updates replace
/// every user-supplied field wholesale.
#[derive(Debug, Deserialize, Validate)]
pub struct CustomerPayload {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "email must not be empty"))]
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,
    pub tax_number: Option<String>,
}

impl CustomerPayload {
    pub fn into_customer(self) -> Customer {
        let mut customer = Customer::new(self.name, self.email);
        customer.phone = self.phone;
        customer.company = self.company;
        customer.address = self.address;
        customer.city = self.city;
        customer.state = self.state;
        customer.zip_code = self.zip_code;
        customer.country = self.country;
        customer.tax_number = self.tax_number;
        customer
    }

    /// Rebuilds the record for a PUT, keeping identity and `created_at`.
    pub fn apply_to(self, existing: &Customer) -> Customer {
        let mut customer = self.into_customer();
        customer.customer_id = existing.customer_id.clone();
        customer.created_at = existing.created_at;
        customer
    }
}

#[derive(Debug, Serialize)]
pub struct CustomerResponse {
    pub id: String,
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
    pub created_at: String,
    pub updated_at: String,
}

impl From<Customer> for CustomerResponse {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.customer_id,
            name: customer.name,
            email: customer.email,
            phone: customer.phone,
            company: customer.company,
            address: customer.address,
            city: customer.city,
            state: customer.state,
            zip_code: customer.zip_code,
            country: customer.country,
            tax_number: customer.tax_number,
            created_at: customer.created_at.to_rfc3339(),
            updated_at: customer.updated_at.to_rfc3339(),
        }
    }
}
