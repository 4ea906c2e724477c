//! Terminal Popup
//!
//! Stand-in for an editor tooltip when running from the command line. Keeps
//! the latest rendering; the caller prints it once the translation settles.

use crate::host::Popup;
use std::sync::Mutex;
use tracing::{debug, warn};

#[derive(Debug, Default)]
pub struct TerminalPopup {
    current: Mutex<Option<String>>,
}

impl TerminalPopup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text currently shown, if the popup is visible
    pub fn current(&self) -> Option<String> {
        match self.current.lock() {
            Ok(current) => current.clone(),
            Err(e) => {
                warn!("Popup state poisoned: {}", e);
                None
            }
        }
    }

    fn set(&self, text: Option<String>) {
        match self.current.lock() {
            Ok(mut current) => *current = text,
            Err(e) => warn!("Popup state poisoned: {}", e),
        }
    }
}

impl Popup for TerminalPopup {
    fn show(&self, text: &str) {
        debug!("Popup redraw ({} chars)", text.chars().count());
        self.set(Some(text.to_string()));
    }

    fn hide(&self) {
        self.set(None);
    }

    fn message(&self, text: &str) {
        eprintln!("{}", text);
    }
}
