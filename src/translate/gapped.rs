//! Gapped Translator

use super::gap::{build_gap, render_gap, GapSpec};
use super::{spawn_renderer, Dispatch, SkipReason};
use crate::config::{CommandVariant, ToolConfig};
use crate::error::TransResult;
use crate::host::{Popup, TextBuffer};
use crate::invoker::ProcessInvoker;
use std::sync::Arc;
use tracing::info;

/// Shown when the cursor is not on a word inside a sentence
pub const NO_TARGET_MESSAGE: &str = "No word/sentence found at this position";

/// Accumulates streamed output for one gapped translation
#[derive(Debug, Clone)]
pub struct GapAccumulator {
    target: String,
    output: String,
}

impl GapAccumulator {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            output: String::new(),
        }
    }

    /// Append one chunk and return the popup text
    pub fn push(&mut self, chunk: &str) -> String {
        self.output.push(' ');
        self.output.push_str(chunk.trim());
        render_gap(&self.output, &self.target).trim().to_string()
    }
}

/// Translates the sentence around the cursor with the word blanked out
pub struct GappedTranslator {
    tool: ToolConfig,
    max_context: usize,
    invoker: Arc<dyn ProcessInvoker>,
    popup: Arc<dyn Popup>,
}

impl GappedTranslator {
    pub fn new(
        tool: ToolConfig,
        max_context: usize,
        invoker: Arc<dyn ProcessInvoker>,
        popup: Arc<dyn Popup>,
    ) -> Self {
        Self {
            tool,
            max_context,
            invoker,
            popup,
        }
    }

    pub async fn translate<B>(&self, buffer: &B, pos: usize) -> TransResult<Dispatch>
    where
        B: TextBuffer + ?Sized,
    {
        let Some(GapSpec { target, context }) = build_gap(buffer, pos, self.max_context) else {
            info!("💬 {}", NO_TARGET_MESSAGE);
            self.popup.message(NO_TARGET_MESSAGE);
            return Ok(Dispatch::Skipped(SkipReason::NoTarget));
        };

        info!("🕳️ Gapped translation of '{}': {}", target, context);
        let command = self.tool.command(CommandVariant::Gapped);
        let invocation = self.invoker.invoke(&command, &context).await?;

        let mut accumulator = GapAccumulator::new(target);
        let handle = spawn_renderer(invocation, self.popup.clone(), move |chunk| {
            accumulator.push(chunk)
        });

        Ok(Dispatch::Started(handle))
    }
}
