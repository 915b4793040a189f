//! Diff command
//!
//! Usage: ifspeak diff <OLD> <NEW> [--speech] [--help-style] [--rows]

use super::read_screen;
use clap::Args;
use ifspeak_core::diff::{compute_delta_with, LineDiffer, NdiffLineDiffer, DEFAULT_PAIR_CUTOFF};
use ifspeak_core::errors::{ExError, ExErrorKind};
use ifspeak_core::{normalize_lines, DisplaySnapshot, SpeechComposer, SpeechProfile};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct DiffArgs {
    /// Screen before the change
    pub old: PathBuf,

    /// Screen after the change
    pub new: PathBuf,

    /// Print the composed announcement instead of raw fragments
    #[arg(long)]
    pub speech: bool,

    /// Fold Inform-style help menu selection changes (with --speech)
    #[arg(long)]
    pub help_style: bool,

    /// Print the tagged diff rows instead of fragments
    #[arg(long, conflicts_with = "speech")]
    pub rows: bool,

    /// Similarity a line pair needs to count as an edit
    #[arg(long, default_value_t = DEFAULT_PAIR_CUTOFF)]
    pub cutoff: f32,
}

fn checked_cutoff(cutoff: f32) -> Result<f32, ExError> {
    if (0.0..=1.0).contains(&cutoff) {
        Ok(cutoff)
    } else {
        Err(ExError::new(ExErrorKind::InvalidInput)
            .with_op("diff")
            .with_message(format!("cutoff must be between 0 and 1, got {}", cutoff)))
    }
}

/// Execute diff command
pub fn execute(args: DiffArgs) -> Result<(), Box<dyn std::error::Error>> {
    let old = normalize_lines(&read_screen(&args.old)?);
    let new = normalize_lines(&read_screen(&args.new)?);
    let differ = NdiffLineDiffer::with_cutoff(checked_cutoff(args.cutoff)?);

    if args.rows {
        for row in differ.diff_rows(&old, &new) {
            println!("{}", row);
        }
    } else if args.speech {
        let profile = SpeechProfile {
            inform_style_help: args.help_style,
            ..SpeechProfile::default()
        };
        let mut composer = SpeechComposer::with_differ(profile, Box::new(differ));
        composer.prime(DisplaySnapshot {
            main: old,
            other: Vec::new(),
        });
        let current = DisplaySnapshot {
            main: new,
            other: Vec::new(),
        };
        if let Some(text) = composer.compose(&current) {
            println!("{}", text);
        }
    } else {
        for fragment in compute_delta_with(&differ, &old, &new) {
            println!("{}", fragment);
        }
    }
    Ok(())
}
