//! Browser implementations of the kernel's host traits.

use crate::i18n::{FluentLocalizer, Translator};
use crate::styles;
use js_sys::{Function, Promise};
use noah_domain::locale::Locale;
use noah_kernel::KernelError;
use noah_kernel::platform::{
    Document, Executor, HeadObserver, LocalTask, Localizer, PreferenceStore, StyleLoader,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlLinkElement, MutationObserver, MutationObserverInit, Storage, Window};

fn host_error(context: &'static str) -> impl FnOnce(JsValue) -> KernelError {
    move |err| KernelError::Host { message: format!("{err:?}").into(), context: Some(context.into()) }
}

/// The page's `window` and `document`.
#[derive(Debug, Clone)]
pub struct BrowserDocument {
    window: Window,
    document: web_sys::Document,
}

impl BrowserDocument {
    /// # Errors
    /// [`KernelError::Host`] outside a browsing context (workers, non-browser hosts).
    pub fn current() -> Result<Self, KernelError> {
        let window = web_sys::window().ok_or(KernelError::Host {
            message: "no global window".into(),
            context: None,
        })?;
        let document = window.document().ok_or(KernelError::Host {
            message: "window has no document".into(),
            context: None,
        })?;
        Ok(Self { window, document })
    }

    /// Text content of the element with `id`, if present.
    #[must_use]
    pub fn element_text(&self, id: &str) -> Option<String> {
        self.document.get_element_by_id(id)?.text_content()
    }

    /// `localStorage`, unless the page is denied storage access.
    #[must_use]
    pub fn local_storage(&self) -> Option<Storage> {
        match self.window.local_storage() {
            Ok(storage) => storage,
            Err(err) => {
                debug!(error = ?err, "localStorage unavailable");
                None
            },
        }
    }
}

impl Document for BrowserDocument {
    fn title(&self) -> String {
        self.document.title()
    }

    fn set_title(&self, title: &str) {
        self.document.set_title(title);
    }

    fn has_element(&self, id: &str) -> bool {
        self.document.get_element_by_id(id).is_some()
    }

    fn observe_head(
        &self,
        on_mutation: Box<dyn FnMut()>,
    ) -> Result<Box<dyn HeadObserver>, KernelError> {
        let head = self.document.head().ok_or(KernelError::Host {
            message: "document has no <head>".into(),
            context: None,
        })?;

        let callback = Closure::<dyn FnMut()>::wrap(on_mutation);
        let observer = MutationObserver::new(callback.as_ref().unchecked_ref())
            .map_err(host_error("Creating MutationObserver"))?;

        let options = MutationObserverInit::new();
        options.set_child_list(true);
        options.set_subtree(true);
        options.set_character_data(true);
        observer
            .observe_with_options(&head, &options)
            .map_err(host_error("Observing <head>"))?;

        Ok(Box::new(BrowserHeadObserver { observer, _callback: callback }))
    }

    fn on_unload(&self, hook: Box<dyn FnOnce()>) -> Result<(), KernelError> {
        let listener = Closure::once_into_js(move || hook());
        self.window
            .add_event_listener_with_callback("beforeunload", listener.unchecked_ref())
            .map_err(host_error("Registering beforeunload listener"))
    }
}

/// Keeps the JS callback alive for as long as the observer is connected.
#[derive(Debug)]
struct BrowserHeadObserver {
    observer: MutationObserver,
    _callback: Closure<dyn FnMut()>,
}

impl HeadObserver for BrowserHeadObserver {
    fn disconnect(&mut self) {
        self.observer.disconnect();
    }
}

#[derive(Debug)]
pub struct LocalStoragePreferences {
    storage: Option<Storage>,
}

impl LocalStoragePreferences {
    #[must_use]
    pub fn new(document: &BrowserDocument) -> Self {
        Self { storage: document.local_storage() }
    }
}

impl PreferenceStore for LocalStoragePreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }
}

/// Loads the Fluent translations for the locale and applies it to `<html lang>`.
#[derive(Debug)]
pub struct HtmlLangLocalizer {
    document: web_sys::Document,
    fluent: FluentLocalizer,
}

impl HtmlLangLocalizer {
    #[must_use]
    pub fn new(document: &BrowserDocument) -> Self {
        Self { document: document.document.clone(), fluent: FluentLocalizer::new() }
    }

    #[must_use]
    pub fn translator(&self) -> Arc<Translator> {
        self.fluent.translator()
    }
}

impl Localizer for HtmlLangLocalizer {
    fn init(&self, locale: Locale) {
        self.fluent.init(locale);
        let Some(root) = self.document.document_element() else { return };
        if let Err(err) = root.set_attribute("lang", locale.as_str()) {
            warn!(error = ?err, %locale, "Could not set <html lang>");
        }
    }
}

/// Attaches a `<link rel="stylesheet">` and resolves once it has loaded.
#[derive(Debug)]
pub struct StylesheetLoader {
    document: web_sys::Document,
    href: String,
}

impl StylesheetLoader {
    #[must_use]
    pub fn new(document: &BrowserDocument, href: impl Into<String>) -> Self {
        Self { document: document.document.clone(), href: href.into() }
    }
}

impl StyleLoader for StylesheetLoader {
    fn load_markdown_styles(&self) -> LocalTask<Result<(), KernelError>> {
        let document = self.document.clone();
        let href = self.href.clone();

        Box::pin(async move {
            let link = document
                .create_element("link")
                .map_err(host_error("Creating <link>"))?
                .dyn_into::<HtmlLinkElement>()
                .map_err(|_| KernelError::from("created element is not a <link>"))?;
            link.set_rel("stylesheet");
            link.set_href(&href);

            // The detached link resolves `href` against the document base.
            if is_attached(&document, &href, &link.href())? {
                debug!(%href, "Stylesheet already attached");
                return Ok(());
            }

            let loaded = Promise::new(&mut |resolve: Function, reject: Function| {
                link.set_onload(Some(&resolve));
                link.set_onerror(Some(&reject));
            });

            let head = document.head().ok_or(KernelError::Host {
                message: "document has no <head>".into(),
                context: None,
            })?;
            head.append_child(&link).map_err(host_error("Attaching stylesheet"))?;

            JsFuture::from(loaded).await.map_err(|_| KernelError::Stylesheet {
                message: format!("{href} failed to load").into(),
                context: None,
            })?;
            debug!(%href, "Stylesheet loaded");
            Ok(())
        })
    }
}

/// Whether a `<link rel="stylesheet">` already points at `href`.
fn is_attached(
    document: &web_sys::Document,
    href: &str,
    resolved: &str,
) -> Result<bool, KernelError> {
    let links = document
        .query_selector_all("link[rel=\"stylesheet\"]")
        .map_err(host_error("Listing stylesheets"))?;
    let attached = (0..links.length())
        .filter_map(|index| links.item(index)?.dyn_into::<HtmlLinkElement>().ok())
        .map(|link| (link.get_attribute("href"), link.href()));
    Ok(styles::contains_stylesheet(attached, href, resolved))
}

/// Microtask-queue executor with `setTimeout` timers.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserExecutor;

impl Executor for BrowserExecutor {
    fn spawn_detached(&self, task: LocalTask<()>) {
        wasm_bindgen_futures::spawn_local(task);
    }

    fn sleep(&self, duration: Duration) -> LocalTask<()> {
        let millis = i32::try_from(duration.as_millis()).unwrap_or(i32::MAX);

        Box::pin(async move {
            let Some(window) = web_sys::window() else { return };
            let timer = Promise::new(&mut |resolve: Function, _reject: Function| {
                let scheduled =
                    window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, millis);
                if let Err(err) = scheduled {
                    warn!(error = ?err, "setTimeout failed, resolving immediately");
                    let _ = resolve.call0(&JsValue::NULL);
                }
            });
            let _ = JsFuture::from(timer).await;
        })
    }
}
