//! Host Editor Interfaces
//!
//! What the translators need from the surrounding text editor. Positions are
//! character offsets into the buffer; spans are half-open.

/// A half-open `[start, end)` range of character offsets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, pos: usize) -> bool {
        self.start <= pos && pos < self.end
    }
}

/// Text-boundary queries over the buffer being edited
pub trait TextBuffer {
    /// Span of the word at `pos`, if there is one
    fn word_bounds_at(&self, pos: usize) -> Option<Span>;

    /// Span of the sentence at `pos`, if there is one
    fn sentence_bounds_at(&self, pos: usize) -> Option<Span>;

    /// Text between two positions; out-of-range positions are clamped
    fn text_between(&self, start: usize, end: usize) -> String;
}

/// The full editor surface a trigger is handled against
pub trait Editor: TextBuffer {
    /// Text of the active selection, empty when nothing is selected
    fn selection_text(&self) -> String;

    /// Character offset of the cursor
    fn cursor_position(&self) -> usize;
}

/// Tooltip shown near the cursor
pub trait Popup: Send + Sync {
    /// Show (or redraw) the popup with `text`
    fn show(&self, text: &str);

    /// Remove the popup if it is visible
    fn hide(&self);

    /// Short informational message for the user (echo area, status line)
    fn message(&self, text: &str);
}
