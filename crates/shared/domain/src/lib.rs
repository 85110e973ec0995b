//! # Domain Models
//!
//! This crate contains pure domain types with a single dependency (`serde`).
//! Keep it lean: no I/O, no DOM access, no heavy logic. Just data and simple helpers.

pub mod config;
pub mod constants;
pub mod flags;
pub mod locale;
