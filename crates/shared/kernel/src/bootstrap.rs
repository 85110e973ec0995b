use crate::error::KernelError;
use crate::flags::{FlagStore, spawn_flag_pull};
use crate::locale::init_localization;
use crate::platform::{Document, Executor, FlagSource, Localizer, PreferenceStore, StyleLoader};
use crate::styles::spawn_style_load;
use crate::title::{SharedTitleGuard, TitleGuard};
use noah_domain::config::AppConfig;
use noah_domain::locale::LocaleSelection;
use std::fmt;
use std::rc::Rc;
use tracing::{error, info, info_span};
use typed_builder::TypedBuilder;

/// One-time startup sequence for the browser client.
///
/// Every host collaborator is required at compile time by the builder;
/// `config` falls back to [`AppConfig::default`].
///
/// # Example
///
/// ```rust,ignore
/// let booted = Bootstrap::builder()
///     .document(document)
///     .preferences(storage)
///     .localizer(localizer)
///     .flag_source(Rc::new(StaticFlagSource::default()))
///     .styles(styles)
///     .executor(executor)
///     .build()
///     .run(|root_id| launch_into(root_id))?;
/// ```
#[derive(TypedBuilder)]
pub struct Bootstrap {
    #[builder(default)]
    config: AppConfig,
    /// Store the flag pull publishes into. Hosts that hand it to the UI
    /// before mounting pass their own clone.
    #[builder(default)]
    flags: FlagStore,
    document: Rc<dyn Document>,
    preferences: Rc<dyn PreferenceStore>,
    localizer: Rc<dyn Localizer>,
    flag_source: Rc<dyn FlagSource>,
    styles: Rc<dyn StyleLoader>,
    executor: Rc<dyn Executor>,
}

impl fmt::Debug for Bootstrap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bootstrap").field("config", &self.config).finish_non_exhaustive()
    }
}

/// Handles produced by a successful startup.
#[derive(Debug)]
pub struct Booted {
    pub locale: LocaleSelection,
    /// Filled in by a detached task; empty until then.
    pub flags: FlagStore,
    /// Released automatically on page unload.
    pub title: SharedTitleGuard,
}

impl Bootstrap {
    /// Runs the startup steps in order and renders through `render` exactly once.
    ///
    /// Flag loading and the stylesheet load are detached and may finish
    /// before or after `render` runs.
    ///
    /// # Errors
    /// * [`KernelError::MountPointMissing`] if the mount element is absent; `render`
    ///   is not called.
    /// * [`KernelError::Host`] if the title observer or the unload hook cannot be
    ///   installed.
    pub fn run(self, render: impl FnOnce(&str)) -> Result<Booted, KernelError> {
        let span = info_span!("bootstrap", title = %self.config.title);
        let _entered = span.enter();

        let flags = self.flags.clone();
        spawn_flag_pull(
            &flags,
            Rc::clone(&self.flag_source),
            &self.executor,
            self.config.flags.timeout(),
        );

        let locale = init_localization(
            self.preferences.as_ref(),
            self.localizer.as_ref(),
            &self.config.locale,
        );

        spawn_style_load(Rc::clone(&self.styles), self.executor.as_ref());

        let title =
            SharedTitleGuard::new(TitleGuard::install(&self.document, self.config.title.as_str())?);
        title.release_on_unload(self.document.as_ref())?;

        let root_id = self.config.mount.root_id.as_str();
        if !self.document.has_element(root_id) {
            error!(id = %root_id, "Mount point missing, aborting startup");
            return Err(KernelError::MountPointMissing { id: root_id.to_owned(), context: None });
        }

        render(root_id);
        info!(root = %root_id, "Application mounted");

        Ok(Booted { locale, flags, title })
    }
}
