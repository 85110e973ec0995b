//! Feature flag initialization.
//!
//! The fetch is fail-open and never awaited by startup: a detached task races
//! the gating service against a timer and publishes the outcome into a
//! [`FlagStore`] that downstream code reads on demand or awaits with
//! [`FlagStore::resolved`].

use crate::error::KernelError;
use crate::platform::{Executor, FlagSource, LocalTask};
use futures_util::future::{self, Either};
use noah_domain::flags::FeatureFlags;
use parking_lot::RwLock;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tracing::{debug, warn};

/// Why the store ended up with an empty set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    Timeout(Duration),
    FetchFailed(String),
}

/// Lifecycle of the flag set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FlagState {
    #[default]
    Pending,
    Ready(FeatureFlags),
    FellBack(FallbackReason),
}

/// Shared, cloneable view of the current flags.
///
/// Reads before the fetch resolves, or after a fallback, see an empty set.
#[derive(Debug, Clone, Default)]
pub struct FlagStore {
    inner: Arc<StoreInner>,
}

#[derive(Debug, Default)]
struct StoreInner {
    state: RwLock<FlagState>,
    published: Notify,
}

impl FlagStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> FlagState {
        self.inner.state.read().clone()
    }

    #[must_use]
    pub fn is_resolved(&self) -> bool {
        !matches!(*self.inner.state.read(), FlagState::Pending)
    }

    /// The current flag set; empty unless the fetch succeeded.
    #[must_use]
    pub fn snapshot(&self) -> FeatureFlags {
        match &*self.inner.state.read() {
            FlagState::Ready(flags) => flags.clone(),
            FlagState::Pending | FlagState::FellBack(_) => FeatureFlags::new(),
        }
    }

    #[must_use]
    pub fn is_enabled(&self, name: &str) -> bool {
        match &*self.inner.state.read() {
            FlagState::Ready(flags) => flags.is_enabled(name),
            FlagState::Pending | FlagState::FellBack(_) => false,
        }
    }

    /// Replaces the state and wakes every [`FlagStore::resolved`] waiter.
    pub fn publish(&self, state: FlagState) {
        *self.inner.state.write() = state;
        self.inner.published.notify_waiters();
    }

    /// Completes with the first non-pending state. Returns immediately if the
    /// store has already resolved.
    pub async fn resolved(&self) -> FlagState {
        loop {
            // Registered before the check so a publish in between is not missed.
            let published = self.inner.published.notified();
            {
                let state = self.inner.state.read();
                if !matches!(*state, FlagState::Pending) {
                    return state.clone();
                }
            }
            published.await;
        }
    }
}

/// Fetches flags, waiting at most `timeout`. Never fails.
pub async fn pull_feature_flags(
    source: &dyn FlagSource,
    executor: &dyn Executor,
    timeout: Duration,
) -> FlagState {
    match future::select(source.fetch(), executor.sleep(timeout)).await {
        Either::Left((Ok(flags), _)) => {
            debug!(count = flags.len(), "Feature flags loaded");
            FlagState::Ready(flags)
        },
        Either::Left((Err(err), _)) => {
            warn!(error = %err, "Feature flag fetch failed, continuing with an empty set");
            FlagState::FellBack(FallbackReason::FetchFailed(err.to_string()))
        },
        Either::Right(((), _)) => {
            warn!(
                timeout_ms = timeout.as_millis(),
                "Feature flag fetch timed out, continuing with an empty set"
            );
            FlagState::FellBack(FallbackReason::Timeout(timeout))
        },
    }
}

/// Starts [`pull_feature_flags`] as a detached task publishing into `store`.
pub fn spawn_flag_pull(
    store: &FlagStore,
    source: Rc<dyn FlagSource>,
    executor: &Rc<dyn Executor>,
    timeout: Duration,
) {
    let store = store.clone();
    let timer = Rc::clone(executor);
    executor.spawn_detached(Box::pin(async move {
        let state = pull_feature_flags(source.as_ref(), timer.as_ref(), timeout).await;
        store.publish(state);
    }));
}

/// A gating source that serves a fixed set, resolving immediately.
#[derive(Debug, Clone, Default)]
pub struct StaticFlagSource {
    flags: FeatureFlags,
}

impl StaticFlagSource {
    #[must_use]
    pub const fn new(flags: FeatureFlags) -> Self {
        Self { flags }
    }
}

impl FlagSource for StaticFlagSource {
    fn fetch(&self) -> LocalTask<Result<FeatureFlags, KernelError>> {
        Box::pin(future::ready(Ok(self.flags.clone())))
    }
}
