//! Gapped-Sentence Builder
//!
//! Cuts a bounded window of the sentence around the word at the cursor and
//! replaces that word with a placeholder.

use crate::host::TextBuffer;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

/// Marks the removed word in the context sent to the tool
pub const PLACEHOLDER: &str = "____________";

lazy_static! {
    /// Tools may shorten or lengthen the underscore run, so match any run
    static ref GAP_PATTERN: Regex = Regex::new("_+").expect("gap pattern is valid");
}

/// Target word plus the sentence context it was cut from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GapSpec {
    pub target: String,
    pub context: String,
}

/// Build the gapped context for the word at `pos`.
///
/// The window never leaves the enclosing sentence and keeps at most
/// `max_context` characters on each side of the word.
pub fn build_gap<B>(buffer: &B, pos: usize, max_context: usize) -> Option<GapSpec>
where
    B: TextBuffer + ?Sized,
{
    let sentence = buffer.sentence_bounds_at(pos)?;
    let word = buffer.word_bounds_at(pos)?;

    let start = sentence.start.max(word.start.saturating_sub(max_context));
    let end = sentence.end.min(word.end.saturating_add(max_context));

    let target = buffer.text_between(word.start, word.end);
    let context = format!(
        "{}{}{}",
        buffer.text_between(start, word.start),
        PLACEHOLDER,
        buffer.text_between(word.end, end)
    );

    debug!("Gap for '{}': {}", target, context);
    Some(GapSpec { target, context })
}

/// Put `[target]` where the first underscore run appears in `translated`
pub fn render_gap(translated: &str, target: &str) -> String {
    let marker = format!("[{}]", target);
    GAP_PATTERN
        .replace(translated, regex::NoExpand(&marker))
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::PlainTextBuffer;

    const TEXT: &str = "The quick brown fox jumps. Over the lazy dog.";

    #[test]
    fn test_gap_in_short_sentence_keeps_whole_sentence() {
        let buffer = PlainTextBuffer::new(TEXT);
        let gap = build_gap(&buffer, 17, 100).expect("gap");
        assert_eq!(gap.target, "fox");
        assert_eq!(gap.context, "The quick brown ____________ jumps.");
    }

    #[test]
    fn test_gap_window_clamped_to_max_context() {
        let buffer = PlainTextBuffer::new(TEXT);
        let gap = build_gap(&buffer, 17, 4).expect("gap");
        assert_eq!(gap.target, "fox");
        assert_eq!(gap.context, "own ____________ jum");
    }

    #[test]
    fn test_gap_clamp_stops_at_sentence_start() {
        let buffer = PlainTextBuffer::new(TEXT);
        let gap = build_gap(&buffer, 29, 3).expect("gap");
        assert_eq!(gap.target, "Over");
        assert_eq!(gap.context, "____________ th");
    }

    #[test]
    fn test_gap_unbounded_context_keeps_sentence() {
        let buffer = PlainTextBuffer::new(TEXT);
        let gap = build_gap(&buffer, 17, usize::MAX).expect("gap");
        assert_eq!(gap.target, "fox");
        assert_eq!(gap.context, "The quick brown ____________ jumps.");
    }

    #[test]
    fn test_gap_zero_context() {
        let buffer = PlainTextBuffer::new(TEXT);
        let gap = build_gap(&buffer, 17, 0).expect("gap");
        assert_eq!(gap.context, PLACEHOLDER);
    }

    #[test]
    fn test_gap_is_repeatable() {
        let buffer = PlainTextBuffer::new(TEXT);
        assert_eq!(build_gap(&buffer, 40, 10), build_gap(&buffer, 40, 10));
    }

    #[test]
    fn test_no_gap_without_word() {
        let buffer = PlainTextBuffer::new("...   ...");
        assert_eq!(build_gap(&buffer, 4, 100), None);
    }

    #[test]
    fn test_render_replaces_first_run_only() {
        assert_eq!(
            render_gap("Der schnelle ____ springt ___", "fox"),
            "Der schnelle [fox] springt ___"
        );
    }

    #[test]
    fn test_render_without_placeholder_is_unchanged() {
        assert_eq!(render_gap("Der schnelle Fuchs", "fox"), "Der schnelle Fuchs");
    }

    #[test]
    fn test_render_treats_target_literally() {
        assert_eq!(render_gap("a __ b", "$1"), "a [$1] b");
    }
}
