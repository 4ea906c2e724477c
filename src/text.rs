//! Plain Text Buffer
//!
//! A `String`-backed editor buffer. Word and sentence boundaries follow
//! Unicode text segmentation (UAX #29).

use crate::host::{Editor, Span, TextBuffer};
use unicode_segmentation::UnicodeSegmentation;

/// In-memory buffer with an optional selection and a cursor
#[derive(Debug, Clone, Default)]
pub struct PlainTextBuffer {
    text: String,
    /// Byte offset of every char, indexed by char position
    char_starts: Vec<usize>,
    selection: Option<Span>,
    cursor: usize,
}

impl PlainTextBuffer {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let char_starts = text.char_indices().map(|(i, _)| i).collect();
        Self {
            text,
            char_starts,
            selection: None,
            cursor: 0,
        }
    }

    /// Place the cursor, clamped to the end of the buffer
    pub fn with_cursor(mut self, pos: usize) -> Self {
        self.cursor = pos.min(self.char_len());
        self
    }

    pub fn with_selection(mut self, span: Span) -> Self {
        self.selection = Some(span);
        self
    }

    /// Select the whole buffer
    pub fn select_all(self) -> Self {
        let end = self.char_len();
        self.with_selection(Span::new(0, end))
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn char_len(&self) -> usize {
        self.char_starts.len()
    }

    fn byte_of_char(&self, pos: usize) -> usize {
        self.char_starts.get(pos).copied().unwrap_or(self.text.len())
    }

    fn char_of_byte(&self, byte: usize) -> usize {
        self.char_starts.partition_point(|&start| start < byte)
    }

    fn span_of(&self, byte_start: usize, segment: &str) -> Span {
        Span::new(
            self.char_of_byte(byte_start),
            self.char_of_byte(byte_start + segment.len()),
        )
    }
}

impl TextBuffer for PlainTextBuffer {
    fn word_bounds_at(&self, pos: usize) -> Option<Span> {
        let words: Vec<Span> = self
            .text
            .split_word_bound_indices()
            .filter(|(_, segment)| segment.chars().any(char::is_alphanumeric))
            .map(|(start, segment)| self.span_of(start, segment))
            .collect();

        // A cursor sitting right after a word still refers to it
        words
            .iter()
            .find(|word| word.contains(pos))
            .or_else(|| words.iter().find(|word| word.end == pos))
            .copied()
    }

    fn sentence_bounds_at(&self, pos: usize) -> Option<Span> {
        self.text
            .split_sentence_bound_indices()
            .filter_map(|(start, segment)| {
                let trimmed = segment.trim();
                if trimmed.is_empty() {
                    return None;
                }
                let leading = segment.len() - segment.trim_start().len();
                Some(self.span_of(start + leading, trimmed))
            })
            .find(|sentence| sentence.start <= pos && pos <= sentence.end)
    }

    fn text_between(&self, start: usize, end: usize) -> String {
        let end = end.min(self.char_len());
        let start = start.min(end);
        self.text[self.byte_of_char(start)..self.byte_of_char(end)].to_string()
    }
}

impl Editor for PlainTextBuffer {
    fn selection_text(&self) -> String {
        match self.selection {
            Some(span) => self.text_between(span.start, span.end),
            None => String::new(),
        }
    }

    fn cursor_position(&self) -> usize {
        self.cursor
    }
}
