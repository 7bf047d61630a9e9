//! Repository trait definitions for the domain layer.
//!
//! - [`LinkRepository`] - Short link storage, dedup lookup and soft delete
//! - [`ClickRepository`] - Click persistence and grouped analytics queries
//!
//! Implementations live in `crate::infrastructure` (PostgreSQL and in-memory).
//! Mock implementations are generated via `mockall` for unit tests.

pub mod click_repository;
pub mod link_repository;

pub use click_repository::{ClickDimension, ClickRepository, CountEntry};
pub use link_repository::LinkRepository;

#[cfg(test)]
pub use click_repository::MockClickRepository;
#[cfg(test)]
pub use link_repository::MockLinkRepository;
