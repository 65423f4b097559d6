pub mod database;
pub mod memory;
pub mod store;
pub mod totals;

pub use database::MongoStore;
pub use memory::MemoryStore;
pub use store::RecordStore;
