//! Exit codes for the errwatch CLI.
//!
//! Exit codes communicate operation outcome without requiring output parsing.

/// Exit codes for errwatch operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Clean / nothing to report
    Clean = 0,

    /// Violations found, none blocking
    ViolationsFound = 1,

    /// Blocking violations found
    Blocked = 4,

    /// Configuration error
    ConfigError = 10,

    /// Bad command-line arguments
    ArgsError = 11,

    /// Scan or pattern error
    ScanError = 12,

    /// I/O error
    IoError = 13,

    /// Internal/unknown error
    InternalError = 99,
}

impl ExitCode {
    /// Convert to i32 for process exit.
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Check if this exit code indicates success.
    pub fn is_success(self) -> bool {
        matches!(self, ExitCode::Clean)
    }

    /// Check if this exit code indicates an error requiring attention.
    pub fn is_error(self) -> bool {
        (self as i32) >= 10
    }

    /// Map a library error to its exit code.
    pub fn from_error(err: &ew_common::Error) -> Self {
        match err.code() {
            10..=19 => ExitCode::ConfigError,
            20..=39 => ExitCode::ScanError,
            50..=59 => ExitCode::ArgsError,
            60..=69 => ExitCode::IoError,
            _ => ExitCode::InternalError,
        }
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        std::process::ExitCode::from(code.as_i32() as u8)
    }
}
