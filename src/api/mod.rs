//! REST API layer for HTTP request/response handling.
//!
//! Translates HTTP requests into service calls and shapes the JSON
//! responses the dashboard and API clients consume.
//!
//! # Modules
//!
//! - [`dto`] - Request/response bodies
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Request tracing
//! - [`routes`] - `/api` route table

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
