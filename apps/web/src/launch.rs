use crate::app::AppContext;
use crate::config::parse_app_config;
use crate::host::{
    BrowserDocument, BrowserExecutor, HtmlLangLocalizer, LocalStoragePreferences, StylesheetLoader,
};
use dioxus::prelude::*;
use dioxus::web::Config;
use noah_domain::config::AppConfig;
use noah_domain::constants::APP_CONFIG_ELEMENT_ID;
use noah_kernel::flags::{FlagStore, StaticFlagSource};
use noah_kernel::{Booted, Bootstrap, KernelError};
use std::cell::RefCell;
use std::rc::Rc;

/// State that must outlive `launch`: the title guard and its unload hook
/// reference the document weakly.
#[derive(Debug)]
struct Session {
    _document: Rc<BrowserDocument>,
    _booted: Booted,
}

thread_local! {
    static SESSION: RefCell<Option<Session>> = const { RefCell::new(None) };
}

#[derive(Debug, Default)]
pub struct WebApp {
    config: Option<AppConfig>,
}

impl WebApp {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `config` instead of the page's `app-config` element.
    #[must_use]
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Runs the startup sequence and mounts `root` into the configured element.
    ///
    /// # Errors
    /// * [`KernelError::MountPointMissing`] if the page lacks the mount element.
    /// * [`KernelError::Host`] if the browser refuses an observer or listener.
    pub fn launch(self, root: fn() -> Element) -> Result<(), KernelError> {
        let document = Rc::new(BrowserDocument::current()?);
        let config = self.config.unwrap_or_else(|| {
            parse_app_config(document.element_text(APP_CONFIG_ELEMENT_ID).as_deref())
        });

        let flags = FlagStore::new();
        let localizer = Rc::new(HtmlLangLocalizer::new(&document));

        let booted = Bootstrap::builder()
            .flags(flags.clone())
            .document(document.clone())
            .preferences(Rc::new(LocalStoragePreferences::new(&document)))
            .localizer(localizer.clone())
            .flag_source(Rc::new(StaticFlagSource::new(config.flags.defaults.clone())))
            .styles(Rc::new(StylesheetLoader::new(&document, config.styles.markdown_href.as_str())))
            .executor(Rc::new(BrowserExecutor))
            .config(config)
            .build()
            .run(|root_id| {
                let context = AppContext::new(localizer.translator(), flags.clone());
                LaunchBuilder::web()
                    .with_cfg(Config::new().rootname(root_id))
                    .with_context_provider(move || Box::new(context.clone()))
                    .launch(root);
            })?;

        SESSION.with(|session| {
            *session.borrow_mut() = Some(Session { _document: document, _booted: booted });
        });
        Ok(())
    }
}
