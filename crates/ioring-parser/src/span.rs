//! Byte spans into intent-graph source text.
//!
//! `serde_json` reports positions as line/column pairs and discards the
//! location of values once a document is deserialized, so spans for
//! instance-level diagnostics are recovered by searching the source for the
//! offending `"key": "value"` pair.

use std::{fmt, ops::Range};

/// A half-open byte range in the source text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Span {
    start: usize,
    end: usize,
}

impl Span {
    /// Create a new span from a byte range
    pub fn new(range: Range<usize>) -> Self {
        Self {
            start: range.start,
            end: range.end,
        }
    }

    /// Get the start offset of the span
    pub fn start(&self) -> usize {
        self.start
    }

    /// Get the end offset of the span
    pub fn end(&self) -> usize {
        self.end
    }

    /// Get the length of the span
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the span is empty
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Converts a 1-based line and column, as reported by `serde_json`, into a
/// one-byte span. Returns `None` for line `0`, which `serde_json` uses when
/// no position is known.
pub(crate) fn span_at_line_column(source: &str, line: usize, column: usize) -> Option<Span> {
    if line == 0 {
        return None;
    }
    let line_start: usize = source
        .split_inclusive('\n')
        .take(line - 1)
        .map(str::len)
        .sum();
    let offset = (line_start + column.saturating_sub(1)).min(source.len());
    let end = (offset + 1).min(source.len());
    Some(Span::new(offset..end))
}

/// Finds every occurrence of `"key": "value"` and returns the spans of the
/// quoted values, in source order.
///
/// Whitespace between the key, the colon and the value is ignored. Values
/// that need JSON escaping are never found.
pub(crate) fn string_value_spans(source: &str, key: &str, value: &str) -> Vec<Span> {
    let needle = format!("\"{value}\"");
    let quoted_key = format!("\"{key}\"");

    source
        .match_indices(&needle)
        .filter(|(start, _)| {
            let before = source[..*start].trim_end();
            before
                .strip_suffix(':')
                .is_some_and(|rest| rest.trim_end().ends_with(&quoted_key))
        })
        .map(|(start, matched)| Span::new(start..start + matched.len()))
        .collect()
}

/// Finds the first `"key":` in the source and returns the span of the
/// quoted key.
pub(crate) fn key_span(source: &str, key: &str) -> Option<Span> {
    let quoted_key = format!("\"{key}\"");
    source
        .match_indices(&quoted_key)
        .find(|(start, matched)| {
            source[start + matched.len()..]
                .trim_start()
                .starts_with(':')
        })
        .map(|(start, matched)| Span::new(start..start + matched.len()))
}
