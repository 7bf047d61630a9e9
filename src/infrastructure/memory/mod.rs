//! In-process storage.
//!
//! [`MemoryStore`] backs the service when no database is configured and gives
//! tests a real store without PostgreSQL. Data lives only as long as the
//! process.

mod memory_store;

pub use memory_store::MemoryStore;
