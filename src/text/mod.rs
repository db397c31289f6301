//! # Text Wrapping
//!
//! Greedy word wrapping with a hard line cap. Words are split on single
//! spaces and appended one at a time; a line is committed when the next
//! word would push it past the maximum width. Once the cap is reached the
//! rest of the text is dropped. There is no ellipsis: a menu description
//! that runs long simply ends at the last word that fit.

use crate::font::FontContext;
use crate::style::FontWeight;

/// Lines kept for a menu description.
pub const MAX_DESCRIPTION_LINES: usize = 2;

/// Result of wrapping a block of text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WrappedText {
    pub lines: Vec<String>,
    /// True when words were dropped because of the line cap.
    pub truncated: bool,
}

impl WrappedText {
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

/// Break `text` into at most `max_lines` lines no wider than `max_width`.
///
/// Each candidate line is measured with a trailing space. A word that is
/// wider than `max_width` on its own still gets its own line.
pub fn wrap_text(
    font_context: &FontContext,
    text: &str,
    max_width: f64,
    weight: FontWeight,
    font_size: f64,
    max_lines: usize,
) -> WrappedText {
    let mut wrapped = WrappedText::default();
    if max_lines == 0 {
        wrapped.truncated = !text.trim().is_empty();
        return wrapped;
    }

    let mut line = String::new();
    let mut words = text.split(' ');

    while let Some(word) = words.next() {
        let candidate = format!("{line}{word} ");
        let overflows = font_context.measure_string(&candidate, weight, font_size) > max_width;

        if overflows && !line.trim().is_empty() {
            wrapped.lines.push(line.trim().to_string());
            if wrapped.lines.len() == max_lines {
                wrapped.truncated = !word.is_empty() || words.any(|w| !w.is_empty());
                return wrapped;
            }
            line = format!("{word} ");
        } else {
            line = candidate;
        }
    }

    let last = line.trim();
    if !last.is_empty() {
        wrapped.lines.push(last.to_string());
    }
    wrapped
}

/// Wrap a menu description at its fixed size and line cap.
pub fn wrap_description(
    font_context: &FontContext,
    description: &str,
    max_width: f64,
    font_size: f64,
) -> WrappedText {
    wrap_text(
        font_context,
        description,
        max_width,
        FontWeight::Regular,
        font_size,
        MAX_DESCRIPTION_LINES,
    )
}
