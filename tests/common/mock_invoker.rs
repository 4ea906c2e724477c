//! Mock Process Invoker for Testing
//!
//! Records every command and request, replays scripted output.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use transtip::{Invocation, ProcessInvoker, ToolCommand, TransError, TransResult};

/// One recorded call to the tool
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub command: ToolCommand,
    pub input: String,
}

/// Mock invoker; without a script each call answers `tr(<input>)`
#[derive(Debug)]
pub struct MockInvoker {
    /// All calls, in order
    pub calls: Arc<Mutex<Vec<Call>>>,
    /// Chunk lists handed out one per call
    pub script: Arc<Mutex<VecDeque<Vec<String>>>>,
    /// Simulate a missing program
    pub should_fail: Arc<Mutex<bool>>,
}

impl MockInvoker {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            script: Arc::new(Mutex::new(VecDeque::new())),
            should_fail: Arc::new(Mutex::new(false)),
        }
    }

    /// Queue the chunks the next call will stream
    pub fn reply_with(&self, chunks: &[&str]) {
        self.script
            .lock()
            .unwrap()
            .push_back(chunks.iter().map(|c| c.to_string()).collect());
    }

    pub fn fail_spawns(&self) {
        *self.should_fail.lock().unwrap() = true;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Default for MockInvoker {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProcessInvoker for MockInvoker {
    async fn invoke(&self, command: &ToolCommand, input: &str) -> TransResult<Invocation> {
        if *self.should_fail.lock().unwrap() {
            return Err(TransError::ProcessSpawn {
                program: command.program.clone(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "mock missing program"),
            });
        }

        self.calls.lock().unwrap().push(Call {
            command: command.clone(),
            input: input.to_string(),
        });

        let chunks = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| vec![format!("tr({})\n", input)]);
        Ok(Invocation::from_chunks(chunks))
    }
}
