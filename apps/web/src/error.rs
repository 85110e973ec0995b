use std::borrow::Cow;

/// Errors raised while loading translations.
#[noah_derive::noah_error]
pub enum I18nError {
    /// No `.ftl` resource is embedded for the locale.
    #[error("No translations for '{locale}'{}", format_context(.context))]
    MissingResource { locale: String, context: Option<Cow<'static, str>> },

    /// The resource has syntax errors or clashes with messages already in the bundle.
    #[error("Invalid translation resource{}: {message}", format_context(.context))]
    Resource { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Invalid language identifier{}: {source}", format_context(.context))]
    Language { source: unic_langid::LanguageIdentifierError, context: Option<Cow<'static, str>> },

    #[error("Internal i18n error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
