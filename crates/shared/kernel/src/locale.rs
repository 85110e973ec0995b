use crate::platform::{Localizer, PreferenceStore};
use noah_domain::config::LocaleConfig;
use noah_domain::locale::{LocaleSelection, LocaleSource};
use tracing::{info, warn};

/// Reads the stored preference, validates it and hands the result to the localizer.
///
/// An unrecognized stored value is replaced by the configured default and
/// reported with a warning; it never reaches the localizer.
pub fn init_localization(
    preferences: &dyn PreferenceStore,
    localizer: &dyn Localizer,
    config: &LocaleConfig,
) -> LocaleSelection {
    let stored = preferences.get(&config.storage_key);
    let selection = LocaleSelection::resolve(stored.as_deref(), config.default);

    if let LocaleSource::Fallback { rejected } = &selection.source {
        warn!(
            key = %config.storage_key,
            rejected = %rejected,
            fallback = %selection.locale,
            "Ignoring unsupported stored locale"
        );
    }

    localizer.init(selection.locale);
    info!(locale = %selection.locale, source = ?selection.source, "Localization initialized");
    selection
}
