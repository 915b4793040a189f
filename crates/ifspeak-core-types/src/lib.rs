//! Core types shared across ifspeak facilities
//!
//! This crate provides foundational types used by the error, logging and
//! monitor layers:
//!
//! - **Correlation types**: MonitorId, CycleId
//! - **Schema constants**: Canonical field keys and event names

pub mod correlation;
pub mod schema;

pub use correlation::{CycleId, MonitorId};
