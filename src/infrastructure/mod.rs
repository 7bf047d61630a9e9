//! Infrastructure layer for external integrations.
//!
//! - [`persistence`] - PostgreSQL repository implementations
//! - [`memory`] - In-process store used without a database and in tests

pub mod memory;
pub mod persistence;
