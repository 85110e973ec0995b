//! UI strings, resolved through Fluent bundles embedded at build time.
//!
//! Each supported [`Locale`] has a `locales/<tag>.ftl` resource. The kernel's
//! localization step calls [`Localizer::init`], which parses the resource for
//! the chosen locale into a [`Translator`] shared with the component tree.

use crate::error::I18nError;
use fluent_bundle::concurrent::FluentBundle;
use fluent_bundle::{FluentArgs, FluentResource};
use noah_domain::locale::Locale;
use noah_kernel::platform::Localizer;
use rust_embed::RustEmbed;
use std::cell::RefCell;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};
use unic_langid::LanguageIdentifier;

#[derive(RustEmbed)]
#[folder = "locales/"]
struct Resources;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    Welcome,
    /// Takes a `label` argument.
    Build,
    FlagsPending,
    FlagsReady,
    FlagsFallback,
}

impl Message {
    pub const ALL: [Self; 5] =
        [Self::Welcome, Self::Build, Self::FlagsPending, Self::FlagsReady, Self::FlagsFallback];

    /// Fluent message id.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Welcome => "welcome",
            Self::Build => "build",
            Self::FlagsPending => "flags-pending",
            Self::FlagsReady => "flags-ready",
            Self::FlagsFallback => "flags-fallback",
        }
    }
}

/// A locale's parsed translations.
pub struct Translator {
    locale: Locale,
    bundle: FluentBundle<FluentResource>,
}

impl Translator {
    /// Parses the embedded resource for `locale`.
    ///
    /// # Errors
    /// * [`I18nError::MissingResource`] if no resource is embedded for the locale.
    /// * [`I18nError::Resource`] if the resource does not parse.
    pub fn load(locale: Locale) -> Result<Self, I18nError> {
        let file = format!("{locale}.ftl");
        let embedded = Resources::get(&file).ok_or_else(|| I18nError::MissingResource {
            locale: locale.to_string(),
            context: None,
        })?;

        let source = String::from_utf8_lossy(embedded.data.as_ref()).into_owned();
        let resource =
            FluentResource::try_new(source).map_err(|(_, errors)| I18nError::Resource {
                message: format!("{errors:?}").into(),
                context: Some(file.clone().into()),
            })?;

        let language = locale.as_str().parse::<LanguageIdentifier>()?;
        let mut bundle = FluentBundle::new_concurrent(vec![language]);
        // Bidi isolation marks would end up in plain text nodes.
        bundle.set_use_isolating(false);
        bundle.add_resource(resource).map_err(|errors| I18nError::Resource {
            message: format!("{errors:?}").into(),
            context: Some(file.into()),
        })?;

        debug!(%locale, "Translations loaded");
        Ok(Self { locale, bundle })
    }

    /// A translator without messages: every lookup yields the message id.
    #[must_use]
    pub fn empty(locale: Locale) -> Self {
        let mut bundle = FluentBundle::new_concurrent(vec![LanguageIdentifier::default()]);
        bundle.set_use_isolating(false);
        Self { locale, bundle }
    }

    #[must_use]
    pub const fn locale(&self) -> Locale {
        self.locale
    }

    #[must_use]
    pub fn has(&self, message: Message) -> bool {
        self.bundle.has_message(message.id())
    }

    #[must_use]
    pub fn tr(&self, message: Message) -> String {
        self.format(message, None)
    }

    /// Formats `message` with a single named argument.
    #[must_use]
    pub fn tr_with(&self, message: Message, name: &'static str, value: &str) -> String {
        let mut args = FluentArgs::new();
        args.set(name, value);
        self.format(message, Some(&args))
    }

    fn format(&self, message: Message, args: Option<&FluentArgs<'_>>) -> String {
        let id = message.id();
        let Some(pattern) = self.bundle.get_message(id).and_then(|msg| msg.value()) else {
            warn!(locale = %self.locale, id, "Missing translation");
            return id.to_owned();
        };

        let mut errors = Vec::new();
        let value = self.bundle.format_pattern(pattern, args, &mut errors);
        if !errors.is_empty() {
            warn!(locale = %self.locale, id, ?errors, "Translation formatted with errors");
        }
        value.into_owned()
    }
}

impl fmt::Debug for Translator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Translator").field("locale", &self.locale).finish_non_exhaustive()
    }
}

/// Loads the [`Translator`] for the locale the kernel selects.
#[derive(Debug, Default)]
pub struct FluentLocalizer {
    translator: RefCell<Option<Arc<Translator>>>,
}

impl FluentLocalizer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The loaded translations, or an empty default-locale translator before `init`.
    #[must_use]
    pub fn translator(&self) -> Arc<Translator> {
        self.translator
            .borrow()
            .clone()
            .unwrap_or_else(|| Arc::new(Translator::empty(Locale::default())))
    }
}

impl Localizer for FluentLocalizer {
    fn init(&self, locale: Locale) {
        let translator = Translator::load(locale).unwrap_or_else(|err| {
            warn!(error = %err, %locale, "Translations unavailable, showing message ids");
            Translator::empty(locale)
        });
        *self.translator.borrow_mut() = Some(Arc::new(translator));
    }
}
