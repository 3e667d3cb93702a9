//! Output format selection shared by every command.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How command results are rendered on stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Human-readable summary lines.
    #[default]
    Summary,
    /// Machine-readable JSON document.
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Summary => write!(f, "summary"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}
