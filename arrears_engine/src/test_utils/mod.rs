//! Helpers for testing against the engine: an in-memory backend, a fault-injecting wrapper, and SQLite test database
//! setup.
mod memory_db;
#[cfg(feature = "sqlite")]
pub mod prepare_env;

pub use memory_db::{FaultyDatabase, LedgerDelay, MemoryDatabase};
