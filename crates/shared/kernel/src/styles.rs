use crate::platform::{Executor, StyleLoader};
use std::rc::Rc;
use tracing::{debug, warn};

/// Loads the markdown renderer's stylesheet in the background.
///
/// Failures only degrade rendering, so they are logged and dropped.
pub fn spawn_style_load(loader: Rc<dyn StyleLoader>, executor: &dyn Executor) {
    executor.spawn_detached(Box::pin(async move {
        match loader.load_markdown_styles().await {
            Ok(()) => debug!("Markdown styles loaded"),
            Err(err) => warn!(error = %err, "Markdown styles failed to load"),
        }
    }));
}
