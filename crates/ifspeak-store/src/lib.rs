//! ifspeak Store - persistence for user settings
//!
//! The only persisted state is the stabilization delay, kept in a small TOML
//! file. Writes go through a temp file and a rename so a crash never leaves
//! a half-written config behind.

pub mod atomic;
pub mod config;
pub mod errors;

pub use config::{shared, AddonConfig, ConfigStore, GeneralSection, SharedConfig};
