//! Per-display speech composer.
//!
//! Holds the previous snapshot of each region and turns every new snapshot
//! into at most one announcement.

use crate::diff::{compute_delta_with, LineDiffer, NdiffLineDiffer};
use crate::snapshot::DisplaySnapshot;
use crate::speech::{fold_help_item, join_fragments};

/// Per-game tuning of speech composition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechProfile {
    /// Strings recognized as input prompts
    pub prompts: Vec<String>,
    /// Fold Inform-style help menu selection changes
    pub inform_style_help: bool,
    /// Master switch for reporting new text at all
    pub report_dynamic_changes: bool,
}

impl Default for SpeechProfile {
    fn default() -> Self {
        Self {
            prompts: vec![">".to_string()],
            inform_style_help: false,
            report_dynamic_changes: true,
        }
    }
}

impl SpeechProfile {
    /// Profile for games with Inform-style help menus
    pub fn inform() -> Self {
        Self {
            inform_style_help: true,
            ..Self::default()
        }
    }

    /// True when a lone main-region fragment looks like typing echo.
    ///
    /// That is: the trimmed fragment is a prompt, is a single character, or
    /// starts with a prompt.
    pub fn is_keystroke_echo(&self, fragment: &str) -> bool {
        let trimmed = fragment.trim();
        trimmed.chars().count() == 1
            || self
                .prompts
                .iter()
                .any(|p| trimmed == p || trimmed.starts_with(p.as_str()))
    }
}

/// Turns successive display snapshots into announcements
pub struct SpeechComposer {
    profile: SpeechProfile,
    differ: Box<dyn LineDiffer + Send>,
    previous: DisplaySnapshot,
}

impl std::fmt::Debug for SpeechComposer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeechComposer")
            .field("profile", &self.profile)
            .field("previous", &self.previous)
            .finish_non_exhaustive()
    }
}

impl SpeechComposer {
    pub fn new(profile: SpeechProfile) -> Self {
        Self::with_differ(profile, Box::new(NdiffLineDiffer::default()))
    }

    pub fn with_differ(profile: SpeechProfile, differ: Box<dyn LineDiffer + Send>) -> Self {
        Self {
            profile,
            differ,
            previous: DisplaySnapshot::default(),
        }
    }

    /// Seed the history without announcing anything
    pub fn prime(&mut self, snapshot: DisplaySnapshot) {
        self.previous = snapshot;
    }

    /// The snapshot the next delta will be computed against
    pub fn previous(&self) -> &DisplaySnapshot {
        &self.previous
    }

    pub fn profile(&self) -> &SpeechProfile {
        &self.profile
    }

    /// Compose the announcement for a new snapshot.
    ///
    /// Each region is diffed against its own history. A region whose new
    /// snapshot is empty produces nothing and keeps its history. When
    /// dynamic change reporting is off, nothing is said and the history is
    /// left untouched.
    pub fn compose(&mut self, snapshot: &DisplaySnapshot) -> Option<String> {
        if !self.profile.report_dynamic_changes {
            return None;
        }

        let mut main = Vec::new();
        if !snapshot.main.is_empty() {
            main = compute_delta_with(self.differ.as_ref(), &self.previous.main, &snapshot.main);
            if main.len() == 1 && self.profile.is_keystroke_echo(&main[0]) {
                main.clear();
            } else if self.profile.inform_style_help && main.len() == 2 {
                main = fold_help_item(main, &self.previous.main);
            }
            self.previous.main = snapshot.main.clone();
        }

        let mut other = Vec::new();
        if !snapshot.other.is_empty() {
            other = compute_delta_with(self.differ.as_ref(), &self.previous.other, &snapshot.other);
            if self.profile.inform_style_help && other.len() == 2 {
                other = fold_help_item(other, &self.previous.other);
            }
            self.previous.other = snapshot.other.clone();
        }

        join_fragments(main.into_iter().chain(other))
    }
}
