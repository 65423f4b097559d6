mod customers;
mod dashboard;
mod invoices;
mod payments;
mod settings;

pub use customers::{CustomerPayload, CustomerResponse};
pub use dashboard::{DashboardStats, RecentInvoice};
pub use invoices::{
    InvoicePayload, InvoiceResponse, LineItemPayload, SearchParams, StatusPayload,
};
pub use payments::{PaymentPayload, PaymentResponse};
pub use settings::{SettingsPayload, SettingsResponse};
