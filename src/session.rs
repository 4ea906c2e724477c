//! Session State
//!
//! Remembers the last translated selection so a repeated lookup can switch
//! the tool to its other output mode.

use crate::config::CommandVariant;
use crate::error::TransResult;
use std::sync::Mutex;
use tracing::debug;

/// Per-editor session state shared by all selection translations
#[derive(Debug, Default)]
pub struct Session {
    previous_selection: Mutex<Option<String>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// The last selection that was sent to the tool
    pub fn previous_selection(&self) -> TransResult<Option<String>> {
        Ok(self.previous_selection.lock()?.clone())
    }

    /// Overwrite the remembered selection (last write wins)
    pub fn record_selection(&self, selection: &str) -> TransResult<()> {
        let mut previous = self.previous_selection.lock()?;
        debug!("Remembering selection ({} chars)", selection.chars().count());
        *previous = Some(selection.to_string());
        Ok(())
    }

    /// First lookup of a text, or a repeat of the last one
    pub fn variant_for(&self, selection: &str) -> TransResult<CommandVariant> {
        let previous = self.previous_selection.lock()?;
        Ok(match previous.as_deref() {
            Some(prev) if prev == selection => CommandVariant::Repeat,
            _ => CommandVariant::FirstLookup,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_session_is_empty() {
        let session = Session::new();
        assert_eq!(session.previous_selection().unwrap(), None);
        assert_eq!(
            session.variant_for("hello").unwrap(),
            CommandVariant::FirstLookup
        );
    }

    #[test]
    fn test_repeat_detection() {
        let session = Session::new();
        session.record_selection("hello").unwrap();
        assert_eq!(session.variant_for("hello").unwrap(), CommandVariant::Repeat);
        assert_eq!(
            session.variant_for("world").unwrap(),
            CommandVariant::FirstLookup
        );
    }

    #[test]
    fn test_last_write_wins() {
        let session = Session::new();
        session.record_selection("one").unwrap();
        session.record_selection("two").unwrap();
        assert_eq!(session.previous_selection().unwrap().as_deref(), Some("two"));
    }
}
