mod customers;
mod dashboard;
mod health;
mod invoices;
mod payments;
mod search;
mod settings;

pub use customers::*;
pub use dashboard::*;
pub use health::*;
pub use invoices::*;
pub use payments::*;
pub use search::*;
pub use settings::*;
