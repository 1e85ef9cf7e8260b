//! Error types for the generation-history engine.
//!
//! Bounds and configuration violations are errors. Expected inability to
//! proceed (no more history to rewind, a full ring under a stop policy) is
//! reported through `bool` returns instead.

use thiserror::Error;

/// Main error type for ring buffer and simulation operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid construction parameters or settings
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Generation index or cell coordinate outside the valid range
    #[error("Index error: {what} {index} is outside 0..{len}")]
    Index {
        what: &'static str,
        index: usize,
        len: usize,
    },

    /// A bounded store is full and its overflow policy is `ThrowOnFull`
    #[error("Resource exhausted: {0}")]
    ResourceExhausted(&'static str),

    /// Settings file could not be parsed
    #[error("Settings parse error: {0}")]
    SettingsParse(#[from] toml::de::Error),

    /// Settings file could not be read
    #[error("File system error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Creates a new configuration error.
    #[must_use]
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        Self::Configuration(msg.into())
    }

    /// Creates a new index error.
    #[must_use]
    pub fn index(what: &'static str, index: usize, len: usize) -> Self {
        Self::Index { what, index, len }
    }

    /// Returns true for errors caused by a bad argument rather than by state.
    #[must_use]
    pub fn is_caller_error(&self) -> bool {
        matches!(self, Self::Configuration(_) | Self::Index { .. })
    }
}
