//! Client bootstrap shared by every host.
//!
//! The startup sequence is written against the traits in [`platform`], so it
//! runs the same way in the browser (`noah-web`) and under test fakes.
//!
//! ## Order
//! 1. Feature flags: detached, bounded by a timeout, fail-open ([`flags`]).
//! 2. Localization: validated stored preference ([`locale`]).
//! 3. Markdown styles: detached, best effort ([`styles`]).
//! 4. Fixed document title: scoped observer ([`title`]).
//! 5. Mount point lookup and a single render ([`bootstrap`]).

pub mod bootstrap;
pub mod error;
pub mod flags;
pub mod locale;
pub mod platform;
pub mod styles;
pub mod title;

pub use crate::bootstrap::{Booted, Bootstrap};
pub use crate::error::{KernelError, KernelErrorExt};
pub use noah_domain as domain;
