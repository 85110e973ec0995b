use crate::constants::{
    FIXED_TITLE, FLAG_FETCH_TIMEOUT_MS, LOCALE_STORAGE_KEY, MARKDOWN_STYLES_HREF, ROOT_ELEMENT_ID,
};
use crate::flags::FeatureFlags;
use crate::locale::Locale;
use serde::Deserialize;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use std::time::Duration;

/// Top-level client configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfigInner {
    /// Document title enforced for the lifetime of the page.
    pub title: String,
    pub mount: MountConfig,
    pub locale: LocaleConfig,
    pub flags: FlagsConfig,
    pub styles: StylesConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into host callbacks.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(flatten, default)]
    inner: Arc<AppConfigInner>,
}

impl Deref for AppConfig {
    type Target = AppConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for AppConfig {
    fn deref_mut(&mut self) -> &mut AppConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// Where the UI tree attaches.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MountConfig {
    pub root_id: String,
}

/// Locale preference lookup.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LocaleConfig {
    pub storage_key: String,
    pub default: Locale,
}

/// Feature flag fetch settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FlagsConfig {
    pub timeout_ms: u64,
    /// Values served by the static gating source.
    pub defaults: FeatureFlags,
}

impl FlagsConfig {
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Deferred stylesheet locations.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StylesConfig {
    pub markdown_href: String,
}

// --- Default ---

impl Default for AppConfigInner {
    fn default() -> Self {
        Self {
            title: FIXED_TITLE.to_owned(),
            mount: MountConfig::default(),
            locale: LocaleConfig::default(),
            flags: FlagsConfig::default(),
            styles: StylesConfig::default(),
        }
    }
}

impl Default for MountConfig {
    fn default() -> Self {
        Self { root_id: ROOT_ELEMENT_ID.to_owned() }
    }
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self { storage_key: LOCALE_STORAGE_KEY.to_owned(), default: Locale::default() }
    }
}

impl Default for FlagsConfig {
    fn default() -> Self {
        Self { timeout_ms: FLAG_FETCH_TIMEOUT_MS, defaults: FeatureFlags::new() }
    }
}

impl Default for StylesConfig {
    fn default() -> Self {
        Self { markdown_href: MARKDOWN_STYLES_HREF.to_owned() }
    }
}
