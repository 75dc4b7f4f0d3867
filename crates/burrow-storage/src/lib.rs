pub mod memory;
pub mod sqlite;

pub use burrow_core::{DurableStore, StorageError, UrlRecord};
pub use memory::InMemoryStore;
pub use sqlite::SqliteStore;
