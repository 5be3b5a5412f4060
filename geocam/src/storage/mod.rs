//! Storage module
//!
//! The local key-value store and its implementations.

pub mod local_store;
pub mod sqlite_store;

pub use local_store::{LocalStore, MemoryStore};
pub use sqlite_store::SqliteStore;
