//! Error handling for ifspeak-store
//!
//! Wraps ifspeak-core ExError with store-specific helpers

use ifspeak_core::errors::{ExError, ExErrorKind, IfSpeakError};
use std::path::Path;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create an IO error
pub fn io_error(operation: &str, path: &Path, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation)
        .with_path(path.display().to_string())
        .with_message(err.to_string())
}

/// Create a config parse error from a TOML decode failure
pub fn config_parse(path: &Path, err: toml::de::Error) -> ExError {
    ExError::from(IfSpeakError::ConfigCorrupt {
        reason: err.message().to_string(),
    })
    .with_op("config_load")
    .with_path(path.display().to_string())
}

/// Wrap a validation failure for the given operation
pub fn config_invalid(operation: &str, path: &Path, err: IfSpeakError) -> ExError {
    ExError::from(err)
        .with_op(operation)
        .with_path(path.display().to_string())
}

/// Config used before a successful load
pub fn config_not_loaded(operation: &str) -> ExError {
    ExError::from(IfSpeakError::ConfigNotLoaded).with_op(operation)
}

/// Create a serialization error
pub fn serialization(operation: &str, err: toml::ser::Error) -> ExError {
    ExError::new(ExErrorKind::Serialization)
        .with_op(operation)
        .with_message(err.to_string())
}
