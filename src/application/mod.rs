//! Application layer orchestrating domain operations.
//!
//! Services here are generic over the repository traits and receive their
//! repositories at construction time.

pub mod services;
