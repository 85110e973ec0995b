//! Page-provided configuration.
//!
//! The host page may embed overrides as JSON:
//!
//! ```html
//! <script id="app-config" type="application/json">{"flags": {"timeout_ms": 1500}}</script>
//! ```

use noah_domain::config::AppConfig;
use tracing::{debug, warn};

/// Parses the text of the `app-config` element.
///
/// Missing or blank text yields defaults. Malformed JSON is logged and ignored;
/// startup never fails on configuration.
#[must_use]
pub fn parse_app_config(raw: Option<&str>) -> AppConfig {
    let Some(text) = raw.map(str::trim).filter(|text| !text.is_empty()) else {
        debug!("No app-config provided, using defaults");
        return AppConfig::default();
    };

    match serde_json::from_str::<AppConfig>(text) {
        Ok(config) => {
            debug!(?config, "Loaded app-config");
            config
        },
        Err(err) => {
            warn!(error = %err, "Ignoring malformed app-config");
            AppConfig::default()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use noah_domain::locale::Locale;
    use std::time::Duration;

    #[test]
    fn absent_or_blank_config_uses_defaults() {
        for raw in [None, Some(""), Some("  \n ")] {
            let config = parse_app_config(raw);
            assert_eq!(config.title, "诺亚");
            assert_eq!(config.mount.root_id, "root");
        }
    }

    #[test]
    fn overrides_are_merged_over_defaults() {
        let config = parse_app_config(Some(
            r#"{"flags": {"timeout_ms": 1500, "defaults": {"beta": true}}, "locale": {"default": "en"}}"#,
        ));
        assert_eq!(config.flags.timeout(), Duration::from_millis(1_500));
        assert!(config.flags.defaults.is_enabled("beta"));
        assert_eq!(config.locale.default, Locale::En);
        assert_eq!(config.locale.storage_key, "i18next");
    }

    #[test]
    fn malformed_config_falls_back_to_defaults() {
        let config = parse_app_config(Some("{ not json"));
        assert_eq!(config.flags.timeout(), Duration::from_millis(4_000));
    }
}
