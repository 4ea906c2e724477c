//! Translation Workflows
//!
//! Selection translation and gapped-sentence translation. Both dispatch one
//! external process and drive its output into the popup from a tokio task.

pub mod gap;
pub mod gapped;
pub mod selection;

pub use gap::{build_gap, render_gap, GapSpec, PLACEHOLDER};
pub use gapped::{GapAccumulator, GappedTranslator, NO_TARGET_MESSAGE};
pub use selection::{render_selection, SelectionTranslator, ARROW};

use crate::error::{TransError, TransResult};
use crate::host::Popup;
use crate::invoker::{CancelHandle, Invocation};
use futures::StreamExt;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::debug;

/// Why a trigger did not start a translation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Nothing selected
    EmptySelection,
    /// Selection longer than the drag limit
    TooLong,
    /// No word or sentence at the cursor
    NoTarget,
}

/// Outcome of a trigger
#[derive(Debug)]
pub enum Dispatch {
    Started(TranslationHandle),
    Skipped(SkipReason),
}

impl Dispatch {
    pub fn is_started(&self) -> bool {
        matches!(self, Dispatch::Started(_))
    }

    pub fn into_handle(self) -> Option<TranslationHandle> {
        match self {
            Dispatch::Started(handle) => Some(handle),
            Dispatch::Skipped(_) => None,
        }
    }
}

/// An in-flight translation whose output is being rendered
#[derive(Debug)]
pub struct TranslationHandle {
    cancel: CancelHandle,
    task: JoinHandle<Option<String>>,
}

impl TranslationHandle {
    /// Stop the external process; the popup keeps whatever was last shown
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Wait until the tool's output ends; returns the last rendered text
    pub async fn join(self) -> TransResult<Option<String>> {
        self.task
            .await
            .map_err(|e| TransError::Other(anyhow::anyhow!("Render task failed: {}", e)))
    }
}

/// Feed every chunk through `render` and show the result.
///
/// `render` receives each raw chunk and returns the full popup text.
pub(crate) fn spawn_renderer<F>(
    mut invocation: Invocation,
    popup: Arc<dyn Popup>,
    mut render: F,
) -> TranslationHandle
where
    F: FnMut(&str) -> String + Send + 'static,
{
    let cancel = invocation.cancel_handle();
    let task = tokio::spawn(async move {
        let mut shown = None;
        while let Some(chunk) = invocation.next().await {
            let text = render(&chunk);
            debug!("🪧 Popup: {}", text);
            popup.show(&text);
            shown = Some(text);
        }
        shown
    });
    TranslationHandle { cancel, task }
}
