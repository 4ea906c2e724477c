//! Selection Translator
//!
//! Sends the selected text to the tool and shows `selection → translation`.

use super::{spawn_renderer, Dispatch, SkipReason};
use crate::config::ToolConfig;
use crate::error::TransResult;
use crate::host::Popup;
use crate::invoker::ProcessInvoker;
use crate::session::Session;
use std::sync::Arc;
use tracing::{debug, info};

/// Separator between the original text and its translation
pub const ARROW: &str = " → ";

/// Popup text for a selection and the output received so far
pub fn render_selection(selection: &str, output: &str) -> String {
    format!("{}{}{}", selection, ARROW, output.trim())
}

/// Translates explicit selections, remembering the last one in the session
pub struct SelectionTranslator {
    tool: ToolConfig,
    session: Arc<Session>,
    invoker: Arc<dyn ProcessInvoker>,
    popup: Arc<dyn Popup>,
}

impl SelectionTranslator {
    pub fn new(
        tool: ToolConfig,
        session: Arc<Session>,
        invoker: Arc<dyn ProcessInvoker>,
        popup: Arc<dyn Popup>,
    ) -> Self {
        Self {
            tool,
            session,
            invoker,
            popup,
        }
    }

    /// Translate `selection`.
    ///
    /// Empty selections, and selections longer than `max_length` when a limit
    /// is given, are skipped without touching the session.
    pub async fn translate(
        &self,
        selection: &str,
        max_length: Option<usize>,
    ) -> TransResult<Dispatch> {
        if selection.is_empty() {
            return Ok(Dispatch::Skipped(SkipReason::EmptySelection));
        }

        let length = selection.chars().count();
        if let Some(limit) = max_length {
            if length > limit {
                debug!("Selection of {} chars exceeds limit {}", length, limit);
                return Ok(Dispatch::Skipped(SkipReason::TooLong));
            }
        }

        self.popup.hide();

        let variant = self.session.variant_for(selection)?;
        let command = self.tool.command(variant);
        info!("🔤 Translating selection ({:?}): '{}'", variant, selection);

        let invocation = self.invoker.invoke(&command, selection).await?;
        self.session.record_selection(selection)?;

        let original = selection.to_string();
        let mut output = String::new();
        let handle = spawn_renderer(invocation, self.popup.clone(), move |chunk| {
            output.push_str(chunk);
            render_selection(&original, &output)
        });

        Ok(Dispatch::Started(handle))
    }
}
