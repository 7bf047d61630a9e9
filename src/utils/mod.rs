//! Utility functions for code generation and input processing.
//!
//! - [`code_generator`] - Random short code generation and resolve-side sanitizing
//! - [`url_normalizer`] - URL validation and normalization

pub mod code_generator;
pub mod url_normalizer;
