use crate::models::Payment;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct PaymentPayload {
    #[validate(length(min = 1, message = "invoice_id must not be empty"))]
    pub invoice_id: String,
    pub amount: Decimal,
    pub payment_date: NaiveDate,
    #[validate(length(min = 1, message = "payment_method must not be empty"))]
    pub payment_method: String,
    pub reference_number: Option<String>,
    pub notes: Option<String>,
}

impl PaymentPayload {
    pub fn into_payment(self) -> Payment {
        let mut payment = Payment::new(
            self.invoice_id,
            self.amount,
            self.payment_date,
            self.payment_method,
        );
        payment.reference_number = self.reference_number;
        payment.notes = self.notes;
        payment
    }
}

#[derive(Debug, Serialize)]
pub struct PaymentResponse {
    pub id: String,
    pub invoice_id: String,
    pub amount: Decimal,
    pub payment_date: NaiveDate,
    pub payment_method: String,
    pub reference_number: Option<String>,
    pub notes: Option<String>,
    pub created_at: String,
}

impl From<Payment> for PaymentResponse {
    fn from(payment: Payment) -> Self {
        Self {
            id: payment.payment_id,
            invoice_id: payment.invoice_id,
            amount: payment.amount,
            payment_date: payment.payment_date,
            payment_method: payment.payment_method,
            reference_number: payment.reference_number,
            notes: payment.notes,
            created_at: payment.created_at.to_rfc3339(),
        }
    }
}
