//! Host seams the bootstrap sequence runs against.
//!
//! The browser adapter lives in `noah-web`; tests provide in-memory fakes.
//! Everything here is single-threaded: futures are `!Send` and callbacks run
//! on the UI thread.

use crate::error::KernelError;
use futures_util::future::LocalBoxFuture;
use noah_domain::flags::FeatureFlags;
use noah_domain::locale::Locale;
use std::fmt::Debug;
use std::time::Duration;

/// A future that is spawned without a join handle.
pub type LocalTask<T> = LocalBoxFuture<'static, T>;

/// The parts of the page the bootstrap sequence touches.
pub trait Document {
    fn title(&self) -> String;

    fn set_title(&self, title: &str);

    fn has_element(&self, id: &str) -> bool;

    /// Subscribes `on_mutation` to child-list, subtree and character-data
    /// changes below `<head>`.
    ///
    /// # Errors
    /// Returns [`KernelError::Host`] if the observer cannot be created.
    fn observe_head(
        &self,
        on_mutation: Box<dyn FnMut()>,
    ) -> Result<Box<dyn HeadObserver>, KernelError>;

    /// Runs `hook` once when the page is about to unload.
    ///
    /// # Errors
    /// Returns [`KernelError::Host`] if the listener cannot be registered.
    fn on_unload(&self, hook: Box<dyn FnOnce()>) -> Result<(), KernelError>;
}

/// A live head subscription.
pub trait HeadObserver: Debug {
    /// Stops delivering mutations. Calling it again is a no-op.
    fn disconnect(&mut self);
}

/// Persistent client-side key/value storage.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
}

/// The localization subsystem's initializer.
pub trait Localizer {
    fn init(&self, locale: Locale);
}

/// Remote feature gating service.
pub trait FlagSource {
    fn fetch(&self) -> LocalTask<Result<FeatureFlags, KernelError>>;
}

/// Loader for the markdown renderer's style bundle.
pub trait StyleLoader {
    fn load_markdown_styles(&self) -> LocalTask<Result<(), KernelError>>;
}

/// Spawns detached work and provides timers.
pub trait Executor {
    /// Runs `task` in the background. There is no ordering guarantee relative
    /// to anything the caller does afterwards.
    fn spawn_detached(&self, task: LocalTask<()>);

    fn sleep(&self, duration: Duration) -> LocalTask<()>;
}
