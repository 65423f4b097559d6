pub mod customer;
pub mod invoice;
pub mod payment;
pub mod settings;

pub use customer::Customer;
pub use invoice::{Invoice, InvoiceStatus, LineItem, PaymentStatus};
pub use payment::Payment;
pub use settings::CompanySettings;
