//! Fixed document title enforcement.
//!
//! [`TitleGuard`] is a scoped resource: installing it subscribes to head
//! mutations, and releasing (or dropping) it disconnects that subscription
//! exactly once. The bootstrap sequence wraps it in a [`SharedTitleGuard`]
//! so the page unload hook can release it.

use crate::error::{KernelError, KernelErrorExt};
use crate::platform::{Document, HeadObserver};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, trace};

/// Writes `title` only if the document currently shows something else.
///
/// Returns `true` when a write happened. The no-op on a matching title is
/// what lets the observer settle after its own write.
pub fn enforce_title(document: &dyn Document, title: &str) -> bool {
    if document.title() == title {
        return false;
    }
    document.set_title(title);
    true
}

/// Keeps the document title pinned to a fixed string while alive.
#[derive(Debug)]
pub struct TitleGuard {
    title: Rc<str>,
    observer: Option<Box<dyn HeadObserver>>,
}

impl TitleGuard {
    /// Applies `title` immediately and re-applies it after every head mutation
    /// that changed it.
    ///
    /// The observer callback holds only a weak reference to the document.
    ///
    /// # Errors
    /// Returns [`KernelError::Host`] if the host cannot observe `<head>`.
    pub fn install(
        document: &Rc<dyn Document>,
        title: impl Into<Rc<str>>,
    ) -> Result<Self, KernelError> {
        let title: Rc<str> = title.into();
        enforce_title(document.as_ref(), &title);

        let weak = Rc::downgrade(document);
        let pinned = Rc::clone(&title);
        let observer = document
            .observe_head(Box::new(move || {
                let Some(document) = weak.upgrade() else { return };
                if enforce_title(document.as_ref(), &pinned) {
                    trace!(title = %pinned, "Restored drifted document title");
                }
            }))
            .context("Observing document head for title changes")?;

        debug!(title = %title, "Title guard installed");
        Ok(Self { title, observer: Some(observer) })
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.observer.is_some()
    }

    /// Disconnects the head observer. Subsequent calls do nothing.
    pub fn release(&mut self) {
        if let Some(mut observer) = self.observer.take() {
            observer.disconnect();
            debug!(title = %self.title, "Title guard released");
        }
    }
}

impl Drop for TitleGuard {
    fn drop(&mut self) {
        self.release();
    }
}

/// A cloneable handle to an installed [`TitleGuard`].
#[derive(Debug, Clone)]
pub struct SharedTitleGuard {
    slot: Rc<RefCell<Option<TitleGuard>>>,
}

impl SharedTitleGuard {
    #[must_use]
    pub fn new(guard: TitleGuard) -> Self {
        Self { slot: Rc::new(RefCell::new(Some(guard))) }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.slot.borrow().as_ref().is_some_and(TitleGuard::is_active)
    }

    /// Releases the guard for every holder of this handle.
    pub fn release(&self) {
        let guard = self.slot.borrow_mut().take();
        drop(guard);
    }

    /// Registers [`SharedTitleGuard::release`] as the page unload hook.
    ///
    /// # Errors
    /// Returns [`KernelError::Host`] if the host rejects the listener.
    pub fn release_on_unload(&self, document: &dyn Document) -> Result<(), KernelError> {
        let handle = self.clone();
        document
            .on_unload(Box::new(move || handle.release()))
            .context("Registering title guard unload hook")
    }
}
