//! # Noah Web
//!
//! Browser entry point. [`WebApp::launch`] wires the `web-sys` host adapters
//! into the kernel's bootstrap sequence and mounts [`app::App`] once it has
//! confirmed the mount point exists.
//!
//! Only the portable pieces (configuration parsing, Fluent translations, the
//! root component) build for native targets; the adapters are `wasm32`-only.

pub mod app;
pub mod config;
mod error;
pub mod i18n;
pub mod styles;

pub use crate::error::{I18nError, I18nErrorExt};

#[cfg(target_arch = "wasm32")]
pub mod host;
#[cfg(target_arch = "wasm32")]
mod launch;

#[cfg(target_arch = "wasm32")]
pub use crate::launch::WebApp;
