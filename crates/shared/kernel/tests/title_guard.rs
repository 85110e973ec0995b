mod common;

use common::FakeDocument;
use noah_kernel::KernelError;
use noah_kernel::platform::Document;
use noah_kernel::title::{SharedTitleGuard, TitleGuard, enforce_title};
use std::rc::Rc;

const FIXED: &str = "诺亚";

fn as_dyn(doc: &Rc<FakeDocument>) -> Rc<dyn Document> {
    Rc::clone(doc) as Rc<dyn Document>
}

#[test]
fn applies_title_immediately_when_different() {
    let doc = FakeDocument::with_root().with_title("Loading");
    let guard = TitleGuard::install(&as_dyn(&doc), FIXED).unwrap();

    assert_eq!(doc.current_title(), FIXED);
    assert_eq!(doc.title_writes(), 1);
    assert!(guard.is_active());
    assert_eq!(guard.title(), FIXED);
}

#[test]
fn skips_write_when_title_already_matches() {
    let doc = FakeDocument::with_root().with_title(FIXED);
    let _guard = TitleGuard::install(&as_dyn(&doc), FIXED).unwrap();

    assert_eq!(doc.title_writes(), 0);
    assert!(!enforce_title(doc.as_ref(), FIXED));
}

#[test]
fn restores_title_after_external_overwrite() {
    let doc = FakeDocument::with_root().with_title(FIXED);
    let _guard = TitleGuard::install(&as_dyn(&doc), FIXED).unwrap();

    doc.external_title_write("Helmet Title");
    assert_eq!(doc.current_title(), "Helmet Title");

    let cycles = doc.flush_mutations();
    assert_eq!(doc.current_title(), FIXED);
    // One cycle restores, the next observes its own write and settles.
    assert_eq!(cycles, 2);
}

#[test]
fn never_stabilizes_on_foreign_title_under_repeated_overwrites() {
    let doc = FakeDocument::with_root().with_title(FIXED);
    let _guard = TitleGuard::install(&as_dyn(&doc), FIXED).unwrap();

    for attempt in 0..10 {
        doc.external_title_write(&format!("Page {attempt}"));
        doc.external_title_write("Another override");
        doc.flush_mutations();
        assert_eq!(doc.current_title(), FIXED, "attempt {attempt} left a foreign title");
    }
}

#[test]
fn release_disconnects_exactly_once() {
    let doc = FakeDocument::with_root();
    let mut guard = TitleGuard::install(&as_dyn(&doc), FIXED).unwrap();
    assert_eq!(doc.connected_observers(), 1);

    guard.release();
    guard.release();
    drop(guard);

    assert_eq!(doc.disconnects(), 1);
    assert_eq!(doc.connected_observers(), 0);

    doc.external_title_write("Free at last");
    doc.flush_mutations();
    assert_eq!(doc.current_title(), "Free at last");
}

#[test]
fn drop_releases_the_observer() {
    let doc = FakeDocument::with_root();
    {
        let _guard = TitleGuard::install(&as_dyn(&doc), FIXED).unwrap();
        assert_eq!(doc.connected_observers(), 1);
    }
    assert_eq!(doc.disconnects(), 1);
}

#[test]
fn shared_guard_is_released_by_unload_hook() {
    let doc = FakeDocument::with_root();
    let shared = SharedTitleGuard::new(TitleGuard::install(&as_dyn(&doc), FIXED).unwrap());
    shared.release_on_unload(doc.as_ref()).unwrap();

    assert!(shared.is_active());
    assert_eq!(doc.unload_hooks(), 1);

    doc.fire_unload();

    assert!(!shared.is_active());
    assert_eq!(doc.disconnects(), 1);

    // A manual release after unload is harmless.
    shared.release();
    assert_eq!(doc.disconnects(), 1);
}

#[test]
fn install_fails_when_head_cannot_be_observed() {
    let doc = FakeDocument::with_root().refusing_observers();
    let err = TitleGuard::install(&as_dyn(&doc), FIXED).unwrap_err();

    assert!(matches!(err, KernelError::Host { context: Some(_), .. }));
    assert!(err.to_string().contains("MutationObserver unavailable"));
}

#[test]
fn observer_outliving_document_is_inert() {
    let doc = FakeDocument::with_root();
    let dyn_doc = as_dyn(&doc);
    let guard = TitleGuard::install(&dyn_doc, FIXED).unwrap();

    drop(dyn_doc);
    assert!(guard.is_active());
    assert_eq!(Rc::strong_count(&doc), 1, "the observer must not keep the document alive");
}
