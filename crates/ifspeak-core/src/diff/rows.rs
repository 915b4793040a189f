//! Tagged diff rows and the line differ contract.
//!
//! A line differ turns two line sequences into an ordered list of rows, each
//! tagged as context, removed, added, or annotation. The delta engine only
//! depends on this contract, so any line diff can be plugged in.

use serde::{Deserialize, Serialize};
use similar::{capture_diff_slices, Algorithm, DiffTag as CharTag, TextDiff};
use std::ops::Range;

/// Classification of a diff row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffTag {
    /// Line present in both sequences
    Unchanged,
    /// Line only in the old sequence
    Removed,
    /// Line only in the new sequence
    Added,
    /// Intra-line hint following a removed or added line; carries no speech
    Annotation,
}

impl DiffTag {
    /// ndiff-style row prefix character
    pub fn marker(self) -> char {
        match self {
            DiffTag::Unchanged => ' ',
            DiffTag::Removed => '-',
            DiffTag::Added => '+',
            DiffTag::Annotation => '?',
        }
    }
}

/// One row of line diff output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffRow {
    pub tag: DiffTag,
    pub text: String,
}

impl DiffRow {
    pub fn new(tag: DiffTag, text: impl Into<String>) -> Self {
        Self {
            tag,
            text: text.into(),
        }
    }
}

impl std::fmt::Display for DiffRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.tag.marker(), self.text)
    }
}

/// Produces tagged rows for two line sequences
///
/// Rows must appear in an order that walks both sequences top to bottom:
/// every old line appears once as `Unchanged` or `Removed`, every new line
/// once as `Unchanged` or `Added`.
pub trait LineDiffer {
    fn diff_rows(&self, old: &[String], new: &[String]) -> Vec<DiffRow>;
}

/// Line differ with ndiff-style replace handling.
///
/// Matching lines come from a Myers diff. Inside a replaced block, the most
/// similar old/new pair (character ratio at or above the cutoff) is emitted
/// as an adjacent removed/added pair with annotation rows, and the lines
/// around it are refined the same way. Blocks with no similar pair are
/// dumped whole, the shorter side first.
#[derive(Debug, Clone, Copy)]
pub struct NdiffLineDiffer {
    cutoff: f32,
}

/// Similarity ratio a line pair must reach to be reported as an edit
pub const DEFAULT_PAIR_CUTOFF: f32 = 0.75;

impl Default for NdiffLineDiffer {
    fn default() -> Self {
        Self {
            cutoff: DEFAULT_PAIR_CUTOFF,
        }
    }
}

impl NdiffLineDiffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom pairing cutoff (clamped to `0.0..=1.0`)
    pub fn with_cutoff(cutoff: f32) -> Self {
        Self {
            cutoff: cutoff.clamp(0.0, 1.0),
        }
    }

    fn replace_block(
        &self,
        old: &[String],
        old_range: Range<usize>,
        new: &[String],
        new_range: Range<usize>,
        rows: &mut Vec<DiffRow>,
    ) {
        // Start just below the cutoff so only pairs that clear it are kept.
        let mut best_ratio = self.cutoff - 0.01;
        let mut best: Option<(usize, usize)> = None;
        let mut first_identical: Option<(usize, usize)> = None;

        for j in new_range.clone() {
            for i in old_range.clone() {
                if old[i] == new[j] {
                    if first_identical.is_none() {
                        first_identical = Some((i, j));
                    }
                    continue;
                }
                let ratio = char_ratio(&old[i], &new[j]);
                if ratio > best_ratio {
                    best_ratio = ratio;
                    best = Some((i, j));
                }
            }
        }

        let (sync_i, sync_j, identical) = match best {
            Some((i, j)) if best_ratio >= self.cutoff => (i, j, false),
            _ => match first_identical {
                Some((i, j)) => (i, j, true),
                None => {
                    plain_replace(old, old_range, new, new_range, rows);
                    return;
                }
            },
        };

        self.refine(old, old_range.start..sync_i, new, new_range.start..sync_j, rows);

        if identical {
            rows.push(DiffRow::new(DiffTag::Unchanged, old[sync_i].as_str()));
        } else {
            let (old_hint, new_hint) = intraline_hints(&old[sync_i], &new[sync_j]);
            rows.push(DiffRow::new(DiffTag::Removed, old[sync_i].as_str()));
            if !old_hint.is_empty() {
                rows.push(DiffRow::new(DiffTag::Annotation, old_hint));
            }
            rows.push(DiffRow::new(DiffTag::Added, new[sync_j].as_str()));
            if !new_hint.is_empty() {
                rows.push(DiffRow::new(DiffTag::Annotation, new_hint));
            }
        }

        self.refine(
            old,
            sync_i + 1..old_range.end,
            new,
            sync_j + 1..new_range.end,
            rows,
        );
    }

    fn refine(
        &self,
        old: &[String],
        old_range: Range<usize>,
        new: &[String],
        new_range: Range<usize>,
        rows: &mut Vec<DiffRow>,
    ) {
        match (old_range.is_empty(), new_range.is_empty()) {
            (false, false) => self.replace_block(old, old_range, new, new_range, rows),
            (false, true) => dump(DiffTag::Removed, &old[old_range], rows),
            (true, false) => dump(DiffTag::Added, &new[new_range], rows),
            (true, true) => {}
        }
    }
}

impl LineDiffer for NdiffLineDiffer {
    fn diff_rows(&self, old: &[String], new: &[String]) -> Vec<DiffRow> {
        let mut rows = Vec::with_capacity(old.len().max(new.len()));
        let mut pending: Option<(Range<usize>, Range<usize>)> = None;

        for op in capture_diff_slices(Algorithm::Myers, old, new) {
            let (tag, old_range, new_range) = op.as_tag_tuple();
            if tag == CharTag::Equal {
                if let Some((o, n)) = pending.take() {
                    self.refine(old, o, new, n, &mut rows);
                }
                dump(DiffTag::Unchanged, &old[old_range], &mut rows);
                continue;
            }
            // Delete, insert and replace ops that touch each other form one block.
            pending = Some(match pending.take() {
                Some((o, n)) => (o.start..old_range.end, n.start..new_range.end),
                None => (old_range, new_range),
            });
        }
        if let Some((o, n)) = pending {
            self.refine(old, o, new, n, &mut rows);
        }
        rows
    }
}

fn dump(tag: DiffTag, lines: &[String], rows: &mut Vec<DiffRow>) {
    rows.extend(lines.iter().map(|line| DiffRow::new(tag, line.as_str())));
}

fn plain_replace(
    old: &[String],
    old_range: Range<usize>,
    new: &[String],
    new_range: Range<usize>,
    rows: &mut Vec<DiffRow>,
) {
    if new_range.len() < old_range.len() {
        dump(DiffTag::Added, &new[new_range], rows);
        dump(DiffTag::Removed, &old[old_range], rows);
    } else {
        dump(DiffTag::Removed, &old[old_range], rows);
        dump(DiffTag::Added, &new[new_range], rows);
    }
}

/// Character similarity `2*M/T` of two lines
fn char_ratio(a: &str, b: &str) -> f32 {
    TextDiff::from_chars(a, b).ratio()
}

/// Marker lines under a paired edit: `-`/`+` for deleted/inserted characters,
/// `^` for replaced ones.
fn intraline_hints(old: &str, new: &str) -> (String, String) {
    let diff = TextDiff::from_chars(old, new);
    let mut old_hint = String::new();
    let mut new_hint = String::new();
    for op in diff.ops() {
        let (tag, old_range, new_range) = op.as_tag_tuple();
        let (old_mark, new_mark) = match tag {
            CharTag::Equal => (' ', ' '),
            CharTag::Delete => ('-', ' '),
            CharTag::Insert => (' ', '+'),
            CharTag::Replace => ('^', '^'),
        };
        old_hint.extend(std::iter::repeat(old_mark).take(old_range.len()));
        new_hint.extend(std::iter::repeat(new_mark).take(new_range.len()));
    }
    (
        old_hint.trim_end().to_string(),
        new_hint.trim_end().to_string(),
    )
}
