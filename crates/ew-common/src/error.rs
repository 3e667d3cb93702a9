//! Error types for errwatch.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for errwatch operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for errwatch.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors (10-19)
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid settings file {path}: {reason}")]
    InvalidSettings { path: PathBuf, reason: String },

    // Pattern errors (20-29)
    #[error("pattern {name:?} failed to compile: {reason}")]
    InvalidPattern { name: String, reason: String },

    // Scan errors (30-39)
    #[error("failed to scan {path}: {reason}")]
    Scan { path: PathBuf, reason: String },

    // Scheduling errors (40-49)
    #[error("periodic task {0} could not be started")]
    TaskSpawn(String),

    // Credit tracking errors (50-59)
    #[error("unknown recurring issue: {0}")]
    UnknownIssue(String),

    // I/O errors (60-69)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns the error code for this error type.
    /// Used for detailed error reporting in JSON output.
    pub fn code(&self) -> u32 {
        match self {
            Error::Config(_) => 10,
            Error::InvalidSettings { .. } => 11,
            Error::InvalidPattern { .. } => 20,
            Error::Scan { .. } => 30,
            Error::TaskSpawn(_) => 40,
            Error::UnknownIssue(_) => 50,
            Error::Io(_) => 60,
        }
    }

    /// Shorthand for a pattern compile failure.
    pub fn invalid_pattern(name: impl Into<String>, reason: impl ToString) -> Self {
        Error::InvalidPattern {
            name: name.into(),
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_grouped_by_concern() {
        assert_eq!(Error::Config("x".into()).code(), 10);
        assert_eq!(Error::invalid_pattern("p", "bad").code(), 20);
        assert_eq!(
            Error::Scan {
                path: PathBuf::from("a.tsx"),
                reason: "denied".into()
            }
            .code(),
            30
        );
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert_eq!(Error::from(io).code(), 60);
    }

    #[test]
    fn invalid_pattern_message_names_the_pattern() {
        let err = Error::invalid_pattern("api_(unclosed", "unclosed group");
        let msg = err.to_string();
        assert!(msg.contains("api_(unclosed"));
        assert!(msg.contains("unclosed group"));
    }
}
