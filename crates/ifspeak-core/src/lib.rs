//! ifspeak Core - change detection for live game text
//!
//! This crate holds the pure logic behind spoken announcements of new game
//! output:
//! - Snapshot normalization of raw display lines
//! - A tagged-row line diff contract with an ndiff-style implementation
//! - The delta engine that picks the speakable new fragments
//! - Speech composition (echo suppression, help-item folding, prompt wording)
//! - Stabilization delay stepping and the user command inventory
//!
//! Nothing in here blocks or performs I/O; the monitor thread and config
//! persistence live in `ifspeak-engine` and `ifspeak-store`.

pub mod commands;
pub mod delay;
pub mod diff;
pub mod errors;
pub mod logging_facility;
pub mod snapshot;
pub mod speech;

// Re-export commonly used types
pub use commands::Command;
pub use diff::{compute_delta, DiffRow, DiffTag, LineDiffer, NdiffLineDiffer};
pub use errors::{ExError, ExErrorKind, IfSpeakError, Result};
pub use snapshot::{normalize_lines, DisplaySnapshot, RawSnapshot};
pub use speech::{SpeechComposer, SpeechProfile};

#[doc(hidden)]
pub use ifspeak_core_types as __core_types;
#[doc(hidden)]
pub use tracing as __tracing;
