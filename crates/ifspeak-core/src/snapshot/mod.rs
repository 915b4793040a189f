//! Display snapshots and their normalization.
//!
//! A snapshot is the text visible in the game window at one instant, split
//! into two independently tracked regions: the main transcript and an
//! optional "other" window (status line, side panel). Hosts with a single
//! text area leave `other` empty.

pub mod normalize;

pub use normalize::{normalize_lines, PROMPT_SENTINEL};

use serde::{Deserialize, Serialize};

/// Raw display lines as handed over by the host, before any cleanup
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSnapshot {
    pub main: Vec<String>,
    pub other: Vec<String>,
}

impl RawSnapshot {
    /// A snapshot with only a main region
    pub fn main_only(lines: Vec<String>) -> Self {
        Self {
            main: lines,
            other: Vec::new(),
        }
    }

    /// Normalize both regions
    pub fn normalize(&self) -> DisplaySnapshot {
        DisplaySnapshot {
            main: normalize_lines(&self.main),
            other: normalize_lines(&self.other),
        }
    }
}

/// Normalized display lines, ready for the delta engine
///
/// Every line is non-empty and left-trimmed, and prompt lines carry exactly
/// one leading sentinel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySnapshot {
    pub main: Vec<String>,
    pub other: Vec<String>,
}

impl DisplaySnapshot {
    /// True when neither region holds any text
    pub fn is_empty(&self) -> bool {
        self.main.is_empty() && self.other.is_empty()
    }
}

/// Normalize a raw snapshot (both regions)
pub fn normalize_snapshot(raw: &RawSnapshot) -> DisplaySnapshot {
    raw.normalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_snapshot_handles_both_regions() {
        let raw = RawSnapshot {
            main: vec!["  West of House".into(), "   ".into(), ">  look".into()],
            other: vec!["".into(), "  Score: 0  Moves: 1".into()],
        };
        let snap = normalize_snapshot(&raw);
        assert_eq!(snap.main, vec!["West of House", ">look"]);
        assert_eq!(snap.other, vec!["Score: 0  Moves: 1"]);
        assert!(!snap.is_empty());
    }

    #[test]
    fn test_main_only_leaves_other_empty() {
        let raw = RawSnapshot::main_only(vec!["hello".into()]);
        assert!(raw.other.is_empty());
        assert!(DisplaySnapshot::default().is_empty());
    }
}
