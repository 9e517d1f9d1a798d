// Storage layer for Eventhub
// Decision: Support both PostgreSQL (production) and in-memory (dev mode)

pub mod backend;
pub mod error;
pub mod memory;
pub mod models;
pub mod repositories;

pub use backend::StorageBackend;
pub use error::StorageError;
pub use memory::InMemoryDatabase;
pub use models::*;
pub use repositories::Database;
