#![allow(dead_code)]

use futures_util::future::LocalBoxFuture;
use noah_domain::flags::FeatureFlags;
use noah_domain::locale::Locale;
use noah_kernel::KernelError;
use noah_kernel::platform::{
    Document, Executor, FlagSource, HeadObserver, Localizer, LocalTask, PreferenceStore,
    StyleLoader,
};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

/// Upper bound on observer cycles before a test declares a feedback loop.
const MAX_MUTATION_CYCLES: usize = 16;

struct ObserverSlot {
    callback: RefCell<Box<dyn FnMut()>>,
    connected: Cell<bool>,
}

/// In-memory page: a title, a set of element ids, and a mutation queue that is
/// delivered to observers only when [`FakeDocument::flush_mutations`] runs,
/// the way a browser batches mutation records into one callback per cycle.
#[derive(Default)]
pub struct FakeDocument {
    title: RefCell<String>,
    elements: RefCell<Vec<String>>,
    observers: RefCell<Vec<Rc<ObserverSlot>>>,
    pending_mutations: Cell<usize>,
    unload_hooks: RefCell<Vec<Box<dyn FnOnce()>>>,
    title_writes: Cell<usize>,
    disconnects: Rc<Cell<usize>>,
    refuse_observer: Cell<bool>,
}

impl FakeDocument {
    pub fn with_root() -> Rc<Self> {
        let doc = Self::default();
        doc.elements.borrow_mut().push("root".to_owned());
        Rc::new(doc)
    }

    pub fn without_root() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn with_title(self: Rc<Self>, title: &str) -> Rc<Self> {
        *self.title.borrow_mut() = title.to_owned();
        self
    }

    pub fn refusing_observers(self: Rc<Self>) -> Rc<Self> {
        self.refuse_observer.set(true);
        self
    }

    pub fn current_title(&self) -> String {
        self.title.borrow().clone()
    }

    pub fn title_writes(&self) -> usize {
        self.title_writes.get()
    }

    pub fn disconnects(&self) -> usize {
        self.disconnects.get()
    }

    pub fn connected_observers(&self) -> usize {
        self.observers.borrow().iter().filter(|o| o.connected.get()).count()
    }

    pub fn unload_hooks(&self) -> usize {
        self.unload_hooks.borrow().len()
    }

    /// A downstream component overwriting the title.
    pub fn external_title_write(&self, title: &str) {
        self.set_title(title);
    }

    /// Delivers queued mutations until the page settles. Returns the number of
    /// observer cycles that ran.
    ///
    /// # Panics
    /// If the page does not settle within [`MAX_MUTATION_CYCLES`].
    pub fn flush_mutations(&self) -> usize {
        let mut cycles = 0;
        while self.pending_mutations.replace(0) > 0 {
            cycles += 1;
            assert!(cycles <= MAX_MUTATION_CYCLES, "head mutations never settled");

            let observers: Vec<_> = self.observers.borrow().iter().cloned().collect();
            for observer in observers.iter().filter(|o| o.connected.get()) {
                (observer.callback.borrow_mut())();
            }
        }
        cycles
    }

    pub fn fire_unload(&self) {
        let hooks: Vec<_> = self.unload_hooks.borrow_mut().drain(..).collect();
        for hook in hooks {
            hook();
        }
    }
}

impl Document for FakeDocument {
    fn title(&self) -> String {
        self.title.borrow().clone()
    }

    fn set_title(&self, title: &str) {
        *self.title.borrow_mut() = title.to_owned();
        self.title_writes.set(self.title_writes.get() + 1);
        // Replacing the <title> text node is a child-list mutation even when
        // the text is unchanged.
        self.pending_mutations.set(self.pending_mutations.get() + 1);
    }

    fn has_element(&self, id: &str) -> bool {
        self.elements.borrow().iter().any(|e| e == id)
    }

    fn observe_head(
        &self,
        on_mutation: Box<dyn FnMut()>,
    ) -> Result<Box<dyn HeadObserver>, KernelError> {
        if self.refuse_observer.get() {
            return Err(KernelError::Host {
                message: "MutationObserver unavailable".into(),
                context: None,
            });
        }
        let slot =
            Rc::new(ObserverSlot { callback: RefCell::new(on_mutation), connected: Cell::new(true) });
        self.observers.borrow_mut().push(Rc::clone(&slot));
        Ok(Box::new(FakeObserver { slot, disconnects: Rc::clone(&self.disconnects) }))
    }

    fn on_unload(&self, hook: Box<dyn FnOnce()>) -> Result<(), KernelError> {
        self.unload_hooks.borrow_mut().push(hook);
        Ok(())
    }
}

pub struct FakeObserver {
    slot: Rc<ObserverSlot>,
    disconnects: Rc<Cell<usize>>,
}

impl std::fmt::Debug for FakeObserver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FakeObserver").field("connected", &self.slot.connected.get()).finish()
    }
}

impl HeadObserver for FakeObserver {
    fn disconnect(&mut self) {
        if self.slot.connected.replace(false) {
            self.disconnects.set(self.disconnects.get() + 1);
        }
    }
}

#[derive(Default)]
pub struct FakePreferences(HashMap<String, String>);

impl FakePreferences {
    pub fn with(key: &str, value: &str) -> Rc<Self> {
        Rc::new(Self(HashMap::from([(key.to_owned(), value.to_owned())])))
    }

    pub fn empty() -> Rc<Self> {
        Rc::new(Self::default())
    }
}

impl PreferenceStore for FakePreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.0.get(key).cloned()
    }
}

#[derive(Default)]
pub struct RecordingLocalizer {
    pub calls: RefCell<Vec<Locale>>,
}

impl Localizer for RecordingLocalizer {
    fn init(&self, locale: Locale) {
        self.calls.borrow_mut().push(locale);
    }
}

/// Gating service stub resolving after `delay` on the tokio clock.
pub struct DelayedFlagSource {
    delay: Duration,
    outcome: Result<FeatureFlags, &'static str>,
    pub calls: Cell<usize>,
}

impl DelayedFlagSource {
    pub fn ok(delay: Duration, flags: FeatureFlags) -> Rc<Self> {
        Rc::new(Self { delay, outcome: Ok(flags), calls: Cell::new(0) })
    }

    pub fn failing(delay: Duration, message: &'static str) -> Rc<Self> {
        Rc::new(Self { delay, outcome: Err(message), calls: Cell::new(0) })
    }
}

impl FlagSource for DelayedFlagSource {
    fn fetch(&self) -> LocalTask<Result<FeatureFlags, KernelError>> {
        self.calls.set(self.calls.get() + 1);
        let delay = self.delay;
        let outcome = self.outcome.clone();
        Box::pin(async move {
            tokio::time::sleep(delay).await;
            outcome.map_err(|message| KernelError::FlagFetch { message: message.into(), context: None })
        })
    }
}

#[derive(Default)]
pub struct FakeStyles {
    pub loads: Rc<Cell<usize>>,
    pub fail: bool,
}

impl StyleLoader for FakeStyles {
    fn load_markdown_styles(&self) -> LocalTask<Result<(), KernelError>> {
        let loads = Rc::clone(&self.loads);
        let fail = self.fail;
        Box::pin(async move {
            loads.set(loads.get() + 1);
            if fail {
                Err(KernelError::Stylesheet { message: "404".into(), context: None })
            } else {
                Ok(())
            }
        })
    }
}

/// Runs detached tasks on the current `LocalSet`.
#[derive(Default)]
pub struct LocalExecutor {
    pub spawned: Cell<usize>,
}

impl Executor for LocalExecutor {
    fn spawn_detached(&self, task: LocalTask<()>) {
        self.spawned.set(self.spawned.get() + 1);
        drop(tokio::task::spawn_local(task));
    }

    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        Box::pin(tokio::time::sleep(duration))
    }
}

/// Lets detached tasks make progress without advancing past any timer.
pub async fn settle() {
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
}
