//! Error types for the engine connector

use thiserror::Error;

/// Main error type for engine supervision
#[derive(Error, Debug)]
pub enum EngineError {
    /// Pipe creation, process creation or executable lookup failed
    #[error("Spawn error: {0}")]
    Spawn(String),

    /// Writing to the engine's stdin failed (typically a broken pipe)
    #[error("Write error: {0}")]
    Write(String),

    /// Reading from the engine's stdout failed
    #[error("Read error: {0}")]
    Read(String),

    /// Delivering a termination signal failed
    #[error("Signal error: {0}")]
    Signal(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

impl EngineError {
    /// Create a spawn error
    pub fn spawn(msg: impl Into<String>) -> Self {
        Self::Spawn(msg.into())
    }

    /// Create an executable not found error
    #[must_use]
    pub fn executable_not_found(executable: &str) -> Self {
        Self::Spawn(format!(
            "Engine executable '{executable}' not found.\n\
             Pass an absolute path, or make sure the engine is on PATH"
        ))
    }

    /// Create a write error
    pub fn write(msg: impl Into<String>) -> Self {
        Self::Write(msg.into())
    }

    /// Create a read error
    pub fn read(msg: impl Into<String>) -> Self {
        Self::Read(msg.into())
    }

    /// Create a signal error
    pub fn signal(msg: impl Into<String>) -> Self {
        Self::Signal(msg.into())
    }

    /// Create an invalid configuration error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Whether this error happened while setting the engine up
    #[must_use]
    pub const fn is_setup_failure(&self) -> bool {
        matches!(self, Self::Spawn(_) | Self::InvalidConfig(_))
    }
}
