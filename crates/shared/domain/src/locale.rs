use serde::{Deserialize, Serialize};
use std::fmt;

/// Interface languages the application ships translations for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Locale {
    #[serde(rename = "en")]
    En,
    #[default]
    #[serde(rename = "zh-CN")]
    ZhCn,
}

impl Locale {
    pub const ALL: [Self; 2] = [Self::En, Self::ZhCn];

    /// Parses a stored tag. Only the exact tags `en` and `zh-CN` are accepted.
    ///
    /// ```rust
    /// use noah_domain::locale::Locale;
    ///
    /// assert_eq!(Locale::parse("en"), Some(Locale::En));
    /// assert_eq!(Locale::parse("zh-CN"), Some(Locale::ZhCn));
    /// assert_eq!(Locale::parse("fr"), None);
    /// ```
    #[must_use]
    pub fn parse(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|locale| locale.as_str() == tag)
    }

    /// The BCP 47 tag written to storage and to `<html lang>`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::ZhCn => "zh-CN",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a resolved [`Locale`] came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocaleSource {
    /// A recognized value was found in storage.
    Stored,
    /// Nothing was stored.
    Default,
    /// Storage held a value outside the supported set; the default was used instead.
    Fallback { rejected: String },
}

/// Outcome of resolving the locale preference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleSelection {
    pub locale: Locale,
    pub source: LocaleSource,
}

impl LocaleSelection {
    /// Resolves a raw stored value against `default`.
    ///
    /// Unknown values never pass through: they are replaced by `default` and
    /// reported as [`LocaleSource::Fallback`].
    #[must_use]
    pub fn resolve(stored: Option<&str>, default: Locale) -> Self {
        match stored {
            None => Self { locale: default, source: LocaleSource::Default },
            Some(raw) => Locale::parse(raw).map_or_else(
                || Self {
                    locale: default,
                    source: LocaleSource::Fallback { rejected: raw.to_owned() },
                },
                |locale| Self { locale, source: LocaleSource::Stored },
            ),
        }
    }

    #[must_use]
    pub const fn fell_back(&self) -> bool {
        matches!(self.source, LocaleSource::Fallback { .. })
    }
}
