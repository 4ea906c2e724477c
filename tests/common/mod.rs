#![allow(dead_code)]

pub mod mock_invoker;
pub mod mock_popup;

use mock_invoker::MockInvoker;
use mock_popup::MockPopup;
use std::sync::Arc;
use transtip::{Config, TransMode};

/// A mode wired to mocks, with handles to inspect them
pub struct TestContext {
    pub invoker: Arc<MockInvoker>,
    pub popup: Arc<MockPopup>,
    pub mode: TransMode,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        let invoker = Arc::new(MockInvoker::new());
        let popup = Arc::new(MockPopup::new());
        let mode = TransMode::new(&config, invoker.clone(), popup.clone());
        Self {
            invoker,
            popup,
            mode,
        }
    }

    pub fn previous_selection(&self) -> Option<String> {
        self.mode
            .session()
            .previous_selection()
            .expect("session lock")
    }
}
