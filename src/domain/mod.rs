//! Domain layer containing business entities and logic.
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`classifier`] - Rule-based user-agent classification
//! - [`click_event`] - Click tracking event model
//! - [`click_worker`] - Asynchronous click processing worker
//!
//! # Click Processing Flow
//!
//! 1. HTTP handler resolves a short code
//! 2. [`click_event::ClickEvent`] is sent to a bounded channel
//! 3. [`click_worker::run_click_worker`] drains the channel
//! 4. The click tracker classifies the user agent and persists the click via
//!    [`repositories::ClickRepository`]

pub mod classifier;
pub mod click_event;
pub mod click_worker;
pub mod entities;
pub mod repositories;
