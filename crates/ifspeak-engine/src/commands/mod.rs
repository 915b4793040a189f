//! Command orchestration layer.
//!
//! Executes user commands against the shared config store.

pub mod delay;

pub use delay::{apply_command, apply_gesture, handle_gesture, CommandOutcome};
