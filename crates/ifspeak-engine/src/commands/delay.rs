//! Stabilization delay commands.
//!
//! Each command loads the config if needed, steps the delay, persists it,
//! and returns the confirmation to speak. Logging follows the canonical
//! pattern:
//! - `log_op_start!` at entry
//! - `log_op_end!` on success
//! - `log_op_error!` on failure

use ifspeak_core::delay::delay_message;
use ifspeak_core::errors::{ExError, ExErrorKind, IfSpeakError};
use ifspeak_core::{log_op_end, log_op_error, log_op_start, Command};
use ifspeak_store::errors::Result;
use ifspeak_store::SharedConfig;
use std::time::Instant;

/// Result of a delay command
#[derive(Debug, Clone, PartialEq)]
pub struct CommandOutcome {
    pub command: Command,
    /// Delay after the change, in seconds
    pub delay: f64,
    /// Spoken confirmation, e.g. `"Stabilize delay: 0.2."`
    pub message: String,
}

/// Run a command against the shared config
pub fn apply_command(command: Command, config: &SharedConfig) -> Result<CommandOutcome> {
    log_op_start!(command.name());
    let start = Instant::now();

    let outcome = apply_command_impl(command, config).map_err(|e| {
        log_op_error!(
            command.name(),
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    log_op_end!(
        command.name(),
        duration_ms = start.elapsed().as_millis() as u64,
        delay = outcome.delay
    );
    Ok(outcome)
}

fn apply_command_impl(command: Command, config: &SharedConfig) -> Result<CommandOutcome> {
    let mut store = config.write().map_err(|_| {
        ExError::new(ExErrorKind::Concurrency)
            .with_op(command.name())
            .with_message("config lock poisoned")
    })?;

    store.load()?;
    let current = store
        .delay()
        .ok_or_else(|| ExError::new(ExErrorKind::ConfigNotLoaded).with_op(command.name()))?;
    let delay = command.step(current);
    store.set_delay(delay)?;
    store.save()?;

    Ok(CommandOutcome {
        command,
        delay,
        message: delay_message(delay),
    })
}

/// Run the command bound to `gesture`, if any
pub fn handle_gesture(gesture: &str, config: &SharedConfig) -> Option<Result<CommandOutcome>> {
    Command::from_gesture(gesture).map(|command| apply_command(command, config))
}

/// Like [`handle_gesture`], but an unbound gesture is an `ERR_NOT_FOUND` error
pub fn apply_gesture(gesture: &str, config: &SharedConfig) -> Result<CommandOutcome> {
    let command = Command::from_gesture(gesture).ok_or_else(|| {
        ExError::from(IfSpeakError::UnboundGesture {
            gesture: gesture.to_string(),
        })
        .with_op("apply_gesture")
    })?;
    apply_command(command, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ifspeak_store::{shared, ConfigStore};
    use tempfile::TempDir;

    #[test]
    fn test_increase_from_default() {
        let dir = TempDir::new().unwrap();
        let config = shared(ConfigStore::new(dir.path().join("ifspeak.toml")));

        let outcome = apply_command(Command::IncreaseDelay, &config).unwrap();

        assert_eq!(outcome.delay, 0.2);
        assert_eq!(outcome.message, "Stabilize delay: 0.2.");
    }

    #[test]
    fn test_unbound_gesture_is_ignored() {
        let dir = TempDir::new().unwrap();
        let config = shared(ConfigStore::new(dir.path().join("ifspeak.toml")));

        assert!(handle_gesture("kb:NVDA+upArrow", &config).is_none());
        assert!(!dir.path().join("ifspeak.toml").exists());
    }

    #[test]
    fn test_apply_unbound_gesture_is_not_found() {
        let dir = TempDir::new().unwrap();
        let config = shared(ConfigStore::new(dir.path().join("ifspeak.toml")));

        let err = apply_gesture("kb:NVDA+upArrow", &config).unwrap_err();

        assert_eq!(err.kind(), ExErrorKind::NotFound);
        assert_eq!(err.op(), Some("apply_gesture"));
        assert!(err.message().contains("kb:NVDA+upArrow"));
        assert!(!dir.path().join("ifspeak.toml").exists());
    }

    #[test]
    fn test_apply_bound_gesture_steps_delay() {
        let dir = TempDir::new().unwrap();
        let config = shared(ConfigStore::new(dir.path().join("ifspeak.toml")));

        let outcome = apply_gesture("KB:Windows+NVDA+LeftArrow", &config).unwrap();

        assert_eq!(outcome.command, Command::DecreaseDelay);
        assert_eq!(outcome.delay, 0.0);
    }
}
