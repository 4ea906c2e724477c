//! Mock Popup for Testing
//!
//! Records every redraw, hide and message.

use std::sync::{Arc, Mutex};
use transtip::Popup;

#[derive(Debug, Clone, PartialEq)]
pub enum PopupEvent {
    Shown(String),
    Hidden,
    Message(String),
}

#[derive(Debug, Default)]
pub struct MockPopup {
    pub events: Arc<Mutex<Vec<PopupEvent>>>,
}

impl MockPopup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<PopupEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Every text the popup displayed, in order
    pub fn shown(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                PopupEvent::Shown(text) => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn last_shown(&self) -> Option<String> {
        self.shown().pop()
    }

    pub fn messages(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                PopupEvent::Message(text) => Some(text),
                _ => None,
            })
            .collect()
    }
}

impl Popup for MockPopup {
    fn show(&self, text: &str) {
        self.events
            .lock()
            .unwrap()
            .push(PopupEvent::Shown(text.to_string()));
    }

    fn hide(&self) {
        self.events.lock().unwrap().push(PopupEvent::Hidden);
    }

    fn message(&self, text: &str) {
        self.events
            .lock()
            .unwrap()
            .push(PopupEvent::Message(text.to_string()));
    }
}
