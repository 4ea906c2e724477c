//! Translation Mode
//!
//! Maps user triggers (mouse drags, key presses) to the two translation
//! workflows and owns the state they share.

use crate::config::Config;
use crate::error::TransResult;
use crate::host::{Editor, Popup};
use crate::invoker::ProcessInvoker;
use crate::session::Session;
use crate::translate::{Dispatch, GappedTranslator, SelectionTranslator};
use std::sync::Arc;
use tracing::debug;

/// User actions the mode reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Primary-button double click followed by a drag
    DoubleClickDrag,
    /// Primary-button triple click followed by a drag
    TripleClickDrag,
    /// Plain primary-button drag
    Drag,
    /// Key bound to "translate selection"
    TranslateKey,
    /// Key bound to "translate sentence around point"
    GappedKey,
}

/// What a trigger asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// `capped` applies the drag length limit
    TranslateSelection { capped: bool },
    TranslateGapped,
}

impl Trigger {
    pub fn action(self) -> Action {
        match self {
            Trigger::DoubleClickDrag | Trigger::TripleClickDrag | Trigger::Drag => {
                Action::TranslateSelection { capped: true }
            }
            Trigger::TranslateKey => Action::TranslateSelection { capped: false },
            Trigger::GappedKey => Action::TranslateGapped,
        }
    }
}

/// The minor mode: one per editor session
pub struct TransMode {
    max_selection_length: usize,
    session: Arc<Session>,
    selection: SelectionTranslator,
    gapped: GappedTranslator,
}

impl TransMode {
    pub fn new(config: &Config, invoker: Arc<dyn ProcessInvoker>, popup: Arc<dyn Popup>) -> Self {
        let session = Arc::new(Session::new());
        Self {
            max_selection_length: config.max_selection_length,
            selection: SelectionTranslator::new(
                config.tool.clone(),
                session.clone(),
                invoker.clone(),
                popup.clone(),
            ),
            gapped: GappedTranslator::new(
                config.tool.clone(),
                config.max_gap_context,
                invoker,
                popup,
            ),
            session,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// React to `trigger` against the current editor state
    pub async fn handle(&self, trigger: Trigger, editor: &dyn Editor) -> TransResult<Dispatch> {
        debug!("Trigger {:?}", trigger);
        match trigger.action() {
            Action::TranslateSelection { capped } => {
                let limit = capped.then_some(self.max_selection_length);
                self.selection
                    .translate(&editor.selection_text(), limit)
                    .await
            }
            Action::TranslateGapped => {
                self.gapped
                    .translate(editor, editor.cursor_position())
                    .await
            }
        }
    }
}
