//! Delta computation over tagged diff rows.
//!
//! The core entry point is [`compute_delta`]: given the previous and the
//! current normalized lines it returns, top to bottom, the text fragments
//! that are new and worth speaking.

use crate::diff::rows::{DiffRow, DiffTag, LineDiffer, NdiffLineDiffer};
use std::ops::Range;

/// An edit narrower than this many characters is spoken on its own instead
/// of the whole line.
const NARROW_BELOW_CHARS: usize = 2;

/// Compute the speakable new fragments between two normalized line sequences
/// using the default ndiff-style differ.
///
/// `compute_delta(x, x)` is always empty.
pub fn compute_delta(old: &[String], new: &[String]) -> Vec<String> {
    compute_delta_with(&NdiffLineDiffer::default(), old, new)
}

/// Compute the speakable new fragments using any [`LineDiffer`].
///
/// For every added row:
/// - blank text is skipped;
/// - if the row directly follows a removed row longer than one character,
///   the changed character span is located and, when it is shorter than two
///   characters, only that span is kept;
/// - whatever text is left, if not blank, becomes a fragment.
///
/// Annotation rows are ignored entirely; every other row becomes the
/// "previous row" for the next one.
pub fn compute_delta_with(
    differ: &dyn LineDiffer,
    old: &[String],
    new: &[String],
) -> Vec<String> {
    let rows = differ.diff_rows(old, new);
    let mut fragments = Vec::new();
    let mut prev: Option<&DiffRow> = None;

    for row in &rows {
        match row.tag {
            DiffTag::Annotation => continue,
            DiffTag::Unchanged | DiffTag::Removed => {
                prev = Some(row);
                continue;
            }
            DiffTag::Added => {}
        }

        let mut text = row.text.as_str();
        if is_blank(text) {
            prev = Some(row);
            continue;
        }

        let edit_source = prev.filter(|p| p.tag == DiffTag::Removed && p.text.chars().count() > 1);
        if let Some(removed) = edit_source {
            let span = changed_span(text, &removed.text);
            if span.len() < NARROW_BELOW_CHARS {
                text = char_slice(text, span);
            }
        }

        if !is_blank(text) {
            fragments.push(text.to_string());
        }
        prev = Some(row);
    }

    fragments
}

/// Locate the changed characters of `text` relative to `previous`.
///
/// Returns a range of char indices into `text`:
/// - `start` is the first index inside the shared length where the two
///   differ, or the shared length itself when the overlap is identical;
/// - when the lengths differ, `end` is the end of `text`;
/// - otherwise `end` is one past the last differing index at or after
///   `start` (or `start` when there is none).
pub fn changed_span(text: &str, previous: &str) -> Range<usize> {
    let text: Vec<char> = text.chars().collect();
    let previous: Vec<char> = previous.chars().collect();
    let overlap = text.len().min(previous.len());

    let start = (0..overlap)
        .find(|&i| text[i] != previous[i])
        .unwrap_or(overlap);

    let end = if text.len() != previous.len() {
        text.len()
    } else {
        (start..text.len())
            .rev()
            .find(|&i| text[i] != previous[i])
            .map_or(start, |i| i + 1)
    };

    start..end
}

fn char_slice(text: &str, span: Range<usize>) -> &str {
    let mut offsets = text
        .char_indices()
        .map(|(offset, _)| offset)
        .chain(std::iter::once(text.len()));
    let start = offsets.nth(span.start).unwrap_or(text.len());
    let end = if span.is_empty() {
        start
    } else {
        offsets.nth(span.len() - 1).unwrap_or(text.len())
    };
    &text[start..end]
}

fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}
