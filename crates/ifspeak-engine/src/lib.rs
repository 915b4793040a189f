//! ifspeak Engine - orchestration layer
//!
//! Runs one monitor thread per observed display and executes user commands
//! against the shared config store.

pub mod commands;
pub mod monitor;

pub use commands::{apply_command, apply_gesture, handle_gesture, CommandOutcome};
pub use monitor::{
    Announcer, CycleError, DelaySource, FixedDelay, Monitor, MonitorHandle, SnapshotProvider,
};
