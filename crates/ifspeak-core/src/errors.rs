use thiserror::Error;

/// Result type alias using IfSpeakError
pub type Result<T> = std::result::Result<T, IfSpeakError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, log assertions and CLI exit reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Structural/Validation
    InvalidInput,
    NotFound,

    // Configuration
    /// Config content failed validation (bad type, out-of-range delay)
    ConfigInvalid,
    /// Config was used before a successful load
    ConfigNotLoaded,

    // Host collaborators
    /// The host could not supply the current display text
    SnapshotUnavailable,

    // Integration/IO
    Io,
    Serialization,
    Concurrency,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::ConfigInvalid => "ERR_CONFIG_INVALID",
            ExErrorKind::ConfigNotLoaded => "ERR_CONFIG_NOT_LOADED",
            ExErrorKind::SnapshotUnavailable => "ERR_SNAPSHOT_UNAVAILABLE",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Concurrency => "ERR_CONCURRENCY",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification for programmatic handling plus free-form
/// context for humans reading the log.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    path: Option<String>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            path: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add file path context
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the path context, if any
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path)?;
        }
        if let Some(source) = &self.source {
            write!(f, " caused by {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Domain error taxonomy for ifspeak operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IfSpeakError {
    /// Stabilization delay outside the allowed range
    #[error("Stabilization delay {delay} is outside [{min}, {max}]")]
    DelayOutOfRange { delay: f64, min: f64, max: f64 },

    /// Config file could not be parsed
    #[error("Corrupted configuration: {reason}")]
    ConfigCorrupt { reason: String },

    /// Config was accessed before it was loaded
    #[error("Configuration has not been loaded")]
    ConfigNotLoaded,

    /// Host failed to supply display text
    #[error("Display snapshot unavailable: {reason}")]
    SnapshotUnavailable { reason: String },

    /// Unknown input gesture
    #[error("No command is bound to gesture {gesture}")]
    UnboundGesture { gesture: String },
}

impl From<IfSpeakError> for ExError {
    fn from(err: IfSpeakError) -> Self {
        match err {
            IfSpeakError::DelayOutOfRange { .. } => {
                ExError::new(ExErrorKind::ConfigInvalid).with_message(err.to_string())
            }
            IfSpeakError::ConfigCorrupt { reason } => {
                ExError::new(ExErrorKind::ConfigInvalid).with_message(reason)
            }
            IfSpeakError::ConfigNotLoaded => ExError::new(ExErrorKind::ConfigNotLoaded)
                .with_message("configuration used before a successful load"),
            IfSpeakError::SnapshotUnavailable { reason } => {
                ExError::new(ExErrorKind::SnapshotUnavailable).with_message(reason)
            }
            IfSpeakError::UnboundGesture { gesture } => ExError::new(ExErrorKind::NotFound)
                .with_message(format!("No command is bound to gesture {}", gesture)),
        }
    }
}
