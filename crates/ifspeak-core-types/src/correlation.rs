//! Correlation types for monitor tracking
//!
//! Every monitor instance and every comparison cycle it runs carries an id,
//! so log lines from concurrently running monitors can be told apart.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of one running display monitor
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MonitorId(String);

impl MonitorId {
    /// Generate a new MonitorId using UUIDv7
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Get the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Create from an existing string (e.g. a host-assigned display name)
    pub fn from_string(s: String) -> Self {
        Self(s)
    }
}

impl Default for MonitorId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for MonitorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Sequence number of a comparison cycle within one monitor
///
/// Starts at 1 for the first cycle after the initial snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CycleId(u64);

impl CycleId {
    /// The cycle before any comparison ran
    pub const INITIAL: CycleId = CycleId(0);

    /// The id of the cycle following this one
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Raw sequence number
    pub fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for CycleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monitor_id_unique() {
        let a = MonitorId::new();
        let b = MonitorId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_monitor_id_roundtrip_string() {
        let id = MonitorId::from_string("main-window".to_string());
        assert_eq!(id.as_str(), "main-window");
        assert_eq!(id.to_string(), "main-window");
    }

    #[test]
    fn test_monitor_id_serde() {
        let id = MonitorId::from_string("story".to_string());
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"story\"");
        let back: MonitorId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_cycle_id_advances() {
        let first = CycleId::INITIAL.next();
        assert_eq!(first.get(), 1);
        assert!(first.next() > first);
    }
}
