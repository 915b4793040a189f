//! Seams between the monitor and its host.

use ifspeak_core::errors::ExError;
use ifspeak_core::RawSnapshot;
use ifspeak_store::ConfigStore;
use std::sync::RwLock;

/// Reads the current display contents.
///
/// Report an unreadable display as `Err`. A panic is caught and logged as
/// an internal error for that cycle.
pub trait SnapshotProvider {
    fn snapshot(&self) -> Result<RawSnapshot, ExError>;
}

impl<F> SnapshotProvider for F
where
    F: Fn() -> Result<RawSnapshot, ExError>,
{
    fn snapshot(&self) -> Result<RawSnapshot, ExError> {
        self()
    }
}

/// Speaks a finished announcement. Runs on its own thread; a panic drops
/// that announcement and is logged.
pub trait Announcer {
    fn announce(&self, text: &str);
}

impl<F> Announcer for F
where
    F: Fn(&str),
{
    fn announce(&self, text: &str) {
        self(text)
    }
}

/// Stabilization delay in seconds, read once per cycle
pub trait DelaySource {
    fn delay(&self) -> f64;
}

/// An unloaded or poisoned config means no delay.
impl DelaySource for RwLock<ConfigStore> {
    fn delay(&self) -> f64 {
        self.read()
            .ok()
            .and_then(|store| store.delay())
            .unwrap_or(0.0)
    }
}

/// Constant delay, for hosts without a config file
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedDelay(pub f64);

impl DelaySource for FixedDelay {
    fn delay(&self) -> f64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unloaded_config_means_no_delay() {
        let store = RwLock::new(ConfigStore::new("never-loaded.toml"));
        assert_eq!(store.delay(), 0.0);
    }

    #[test]
    fn test_closures_are_providers_and_announcers() {
        let provider =
            || -> Result<RawSnapshot, ExError> { Ok(RawSnapshot::main_only(vec!["hi".to_string()])) };
        assert_eq!(provider.snapshot().unwrap().main, vec!["hi".to_string()]);

        let said = std::cell::RefCell::new(Vec::new());
        let announcer = |text: &str| said.borrow_mut().push(text.to_string());
        announcer.announce("hello");
        assert_eq!(said.into_inner(), vec!["hello".to_string()]);
    }
}
