//! Core domain entities.
//!
//! - [`Link`] - A short code bound to an original URL
//! - [`LinkWithClicks`] - A link annotated with its click total, used for listings
//! - [`Click`] - One recorded redirect
//! - [`ClientInfo`] - Browser, platform and device derived from a user agent
//!
//! Creation inputs use separate structs (`NewClick`) so that store-assigned
//! fields (ids, timestamps) never have to be faked by callers.

pub mod click;
pub mod client_info;
pub mod link;

pub use click::{Click, ClickMeta, NewClick};
pub use client_info::{Browser, ClientInfo, Device, Platform};
pub use link::{Link, LinkWithClicks};
