//! Root component.

use crate::i18n::{Message, Translator};
use dioxus::prelude::*;
use noah_domain::constants::FIXED_TITLE;
use noah_kernel::flags::{FlagState, FlagStore};
use std::sync::Arc;

/// Version label embedded by the build script, e.g. `0.1.0 (main)`.
pub const BUILD_LABEL: &str = env!("NOAH_BUILD_LABEL");

/// Startup results handed to the component tree.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub translator: Arc<Translator>,
    pub flags: FlagStore,
    pub build_label: &'static str,
}

impl AppContext {
    #[must_use]
    pub const fn new(translator: Arc<Translator>, flags: FlagStore) -> Self {
        Self { translator, flags, build_label: BUILD_LABEL }
    }
}

/// Status line for the current flag state.
#[must_use]
pub const fn flags_message(state: &FlagState) -> Message {
    match state {
        FlagState::Pending => Message::FlagsPending,
        FlagState::Ready(_) => Message::FlagsReady,
        FlagState::FellBack(_) => Message::FlagsFallback,
    }
}

/// Mirrors `store` into a signal, re-rendering the caller once the flags resolve.
pub fn use_flag_state(store: &FlagStore) -> Signal<FlagState> {
    let mut state = use_signal(|| store.state());
    let store = store.clone();
    use_future(move || {
        let store = store.clone();
        async move { state.set(store.resolved().await) }
    });
    state
}

#[component]
pub fn App() -> Element {
    let context = use_context::<AppContext>();
    let flag_state = use_flag_state(&context.flags);
    let i18n = &context.translator;
    let build = i18n.tr_with(Message::Build, "label", context.build_label);
    let flags = i18n.tr(flags_message(&flag_state.read()));

    rsx! {
        main { class: "noah-app", lang: i18n.locale().as_str(),
            h1 { {FIXED_TITLE} }
            article { class: "md-box",
                p { {i18n.tr(Message::Welcome)} }
            }
            footer { class: "noah-footer",
                span { class: "noah-build", {build} }
                span { class: "noah-flags", {flags} }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dioxus::dioxus_core::VirtualDom;
    use noah_domain::flags::FeatureFlags;
    use noah_domain::locale::Locale;
    use noah_kernel::flags::FallbackReason;
    use std::time::Duration;

    fn english(flags: FlagStore) -> AppContext {
        AppContext::new(Arc::new(Translator::load(Locale::En).unwrap()), flags)
    }

    #[test]
    fn flag_status_follows_store_state() {
        let store = FlagStore::new();
        assert_eq!(flags_message(&store.state()), Message::FlagsPending);

        store.publish(FlagState::Ready(FeatureFlags::new()));
        assert_eq!(flags_message(&store.state()), Message::FlagsReady);

        store.publish(FlagState::FellBack(FallbackReason::Timeout(Duration::from_secs(4))));
        assert_eq!(flags_message(&store.state()), Message::FlagsFallback);
    }

    #[test]
    fn context_carries_the_build_label() {
        let context = english(FlagStore::new());
        assert!(context.build_label.starts_with(env!("CARGO_PKG_VERSION")));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn footer_refreshes_when_flags_resolve() {
        let store = FlagStore::new();
        let mut dom = VirtualDom::new(App).with_root_context(english(store.clone()));
        dom.rebuild_in_place();

        let html = dioxus::ssr::render(&dom);
        assert!(html.contains("Loading feature flags"), "{html}");
        assert!(html.contains(&format!("Build {BUILD_LABEL}")), "{html}");

        store.publish(FlagState::FellBack(FallbackReason::Timeout(Duration::from_secs(4))));
        tokio::time::timeout(Duration::from_secs(1), dom.wait_for_work())
            .await
            .expect("publishing should schedule a re-render");
        dom.render_immediate_to_vec();

        let html = dioxus::ssr::render(&dom);
        assert!(html.contains("Feature flags use defaults"), "{html}");
        assert!(!html.contains("Loading feature flags"), "{html}");
    }
}
