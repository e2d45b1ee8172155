// src/error.rs

//! Error types for pkgsentry

use thiserror::Error;

/// Errors that can occur while preparing events for classification
///
/// Classification and trust decisions themselves never fail across the
/// crate boundary; these errors describe malformed input reaching the
/// mappers and loaders in front of them.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error (config files, event streams, terminal)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed
    #[error("Failed to parse configuration '{path}': {reason}")]
    ConfigError { path: String, reason: String },

    /// Event record could not be parsed
    #[error("Failed to parse event record: {0}")]
    RecordError(#[from] serde_json::Error),

    /// Request string could not be parsed into a capability
    #[error("Invalid request '{raw}': {reason}")]
    InvalidRequest { raw: String, reason: String },

    /// Edition string could not be parsed
    #[error("Invalid edition '{0}'")]
    InvalidEdition(String),

    /// Kind identifier outside the known taxonomy
    #[error("Unrecognized {family} kind '{kind}'")]
    UnrecognizedKind { family: &'static str, kind: String },

    /// Outcome lacks a candidate its kind requires
    #[error("Outcome '{kind}' is missing the {role} candidate")]
    MissingCandidate { kind: String, role: &'static str },
}

/// Result type alias for pkgsentry operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Whether this error is a programming-invariant violation rather than bad input
    pub fn is_internal_fault(&self) -> bool {
        matches!(
            self,
            Error::UnrecognizedKind { .. } | Error::MissingCandidate { .. }
        )
    }
}
