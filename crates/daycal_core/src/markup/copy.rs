//! `[copy:TEXT]` / `[copy:LABEL|TEXT]` extraction.
//!
//! # Invariants
//! - A marker ends at the first `]` on the same line; unterminated markers do
//!   not match.
//! - Spans are yielded left to right and never overlap.
//! - `display_label` equals `copy_value` when no label is given.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::ops::Range;

static COPY_MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[copy:(.*?)\]").expect("valid copy marker regex"));

/// Default label width for copy buttons on note cards.
pub const COPY_LABEL_MAX_CHARS: usize = 20;
const ELLIPSIS: &str = "...";

/// One copyable region found in note text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CopyableSpan {
    /// Full marker text, brackets included.
    pub raw_match: String,
    /// Text placed on the clipboard.
    pub copy_value: String,
    /// Text shown on the copy button.
    pub display_label: String,
    /// Byte range of `raw_match` in the source text.
    #[serde(skip)]
    pub range: Range<usize>,
}

impl CopyableSpan {
    fn from_marker(raw_match: &str, inner: &str, range: Range<usize>) -> Self {
        let (display_label, copy_value) = match inner.split_once('|') {
            Some((label, value)) => (label.trim(), value.trim()),
            None => (inner.trim(), inner.trim()),
        };

        Self {
            raw_match: raw_match.to_string(),
            copy_value: copy_value.to_string(),
            display_label: display_label.to_string(),
            range,
        }
    }
}

/// Lazy, restartable iterator over copy markers in a text.
///
/// Cloning yields an independent cursor at the same position.
#[derive(Debug, Clone)]
pub struct CopyableSpans<'t> {
    text: &'t str,
    cursor: usize,
}

impl Iterator for CopyableSpans<'_> {
    type Item = CopyableSpan;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.text.len() {
            return None;
        }

        let caps = COPY_MARKER_RE.captures_at(self.text, self.cursor)?;
        let whole = caps.get(0)?;
        let inner = caps.get(1)?;
        // Markers are at least `[copy:]`, so the cursor always advances.
        self.cursor = whole.end();
        Some(CopyableSpan::from_marker(
            whole.as_str(),
            inner.as_str(),
            whole.range(),
        ))
    }
}

/// Scans `text` for copy markers in source order.
pub fn extract_copyable_spans(text: &str) -> CopyableSpans<'_> {
    CopyableSpans { text, cursor: 0 }
}

/// Replaces every copy marker with its copy value.
///
/// Text without markers is returned unchanged.
pub fn clean_display_text(text: &str) -> String {
    let mut cleaned = String::with_capacity(text.len());
    let mut last_end = 0;
    for span in extract_copyable_spans(text) {
        cleaned.push_str(&text[last_end..span.range.start]);
        cleaned.push_str(&span.copy_value);
        last_end = span.range.end;
    }
    cleaned.push_str(&text[last_end..]);
    cleaned
}

/// Shortens `label` to `max_chars` characters plus `...` when it is longer.
pub fn truncate_label(label: &str, max_chars: usize) -> String {
    if label.chars().count() <= max_chars {
        return label.to_string();
    }
    let mut truncated: String = label.chars().take(max_chars).collect();
    truncated.push_str(ELLIPSIS);
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_marker_uses_value_as_label() {
        let spans: Vec<_> = extract_copyable_spans("Call me: [copy:555-1234]").collect();
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].copy_value, "555-1234");
        assert_eq!(spans[0].display_label, "555-1234");
        assert_eq!(spans[0].raw_match, "[copy:555-1234]");
    }

    #[test]
    fn labelled_marker_splits_on_first_pipe() {
        let spans: Vec<_> = extract_copyable_spans("Code: [copy:PIN|4477]").collect();
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].display_label, "PIN");
        assert_eq!(spans[0].copy_value, "4477");

        let spans: Vec<_> = extract_copyable_spans("[copy: url | a|b ]").collect();
        assert_eq!(spans[0].display_label, "url");
        assert_eq!(spans[0].copy_value, "a|b");
    }

    #[test]
    fn duplicates_are_kept_in_source_order() {
        let values: Vec<_> = extract_copyable_spans("[copy:a] x [copy:b] y [copy:a]")
            .map(|span| span.copy_value)
            .collect();
        assert_eq!(values, vec!["a", "b", "a"]);
    }

    #[test]
    fn unterminated_and_multiline_markers_do_not_match() {
        assert_eq!(extract_copyable_spans("open [copy:never closed").count(), 0);
        assert_eq!(extract_copyable_spans("[copy:line\nbreak]").count(), 0);
        assert_eq!(
            clean_display_text("open [copy:never closed"),
            "open [copy:never closed"
        );
    }

    #[test]
    fn marker_ends_at_first_closing_bracket() {
        let spans: Vec<_> = extract_copyable_spans("[copy:a]b]").collect();
        assert_eq!(spans[0].copy_value, "a");
        assert_eq!(clean_display_text("[copy:a]b]"), "ab]");
    }

    #[test]
    fn empty_marker_yields_empty_span() {
        let spans: Vec<_> = extract_copyable_spans("x[copy:]y").collect();
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].copy_value, "");
        assert_eq!(clean_display_text("x[copy:]y"), "xy");
    }

    #[test]
    fn clean_display_text_substitutes_copy_values() {
        assert_eq!(clean_display_text("A [copy:X|secret] B"), "A secret B");
        assert_eq!(
            clean_display_text("wifi: [copy: hunter2 ], pin [copy:PIN|1234]."),
            "wifi: hunter2, pin 1234."
        );
    }

    #[test]
    fn text_without_markers_is_untouched() {
        let text = "plain [link] and [copy without colon]";
        assert_eq!(extract_copyable_spans(text).count(), 0);
        assert_eq!(clean_display_text(text), text);
    }

    #[test]
    fn iterator_is_restartable_via_clone() {
        let mut spans = extract_copyable_spans("[copy:1][copy:2]");
        let restarted = spans.clone();
        assert_eq!(spans.next().map(|span| span.copy_value).as_deref(), Some("1"));
        assert_eq!(restarted.count(), 2);
    }

    #[test]
    fn span_ranges_point_at_raw_match() {
        let text = "ñandú [copy:ü|ö] fin";
        let span = extract_copyable_spans(text).next().expect("one span");
        assert_eq!(&text[span.range.clone()], span.raw_match);
    }

    #[test]
    fn truncate_label_counts_characters() {
        assert_eq!(truncate_label("a-very-long-label-name", 10), "a-very-lon...");
        assert_eq!(truncate_label("short", 10), "short");
        assert_eq!(truncate_label("exactly-10", 10), "exactly-10");
        assert_eq!(truncate_label("ñññññ", 3), "ñññ...");
    }
}
