//! Fixed strings shared by the host and the bootstrap sequence.

/// Title enforced on the document for the lifetime of the page.
pub const FIXED_TITLE: &str = "诺亚";

/// Identifier of the element the UI tree is mounted into.
pub const ROOT_ELEMENT_ID: &str = "root";

/// Client storage key holding the user's locale preference.
pub const LOCALE_STORAGE_KEY: &str = "i18next";

/// Upper bound on the feature-flag fetch before falling back to an empty set.
pub const FLAG_FETCH_TIMEOUT_MS: u64 = 4_000;

/// Stylesheet required by the markdown renderer.
pub const MARKDOWN_STYLES_HREF: &str = "/assets/md-box.css";

/// Identifier of the optional `<script type="application/json">` carrying config overrides.
pub const APP_CONFIG_ELEMENT_ID: &str = "app-config";
