//! Classification enums shared by the registry, the scanner and settings files.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Coarse failure class of an error pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Database,
    Api,
    Schema,
    Authentication,
    Network,
}

impl ErrorKind {
    pub const ALL: [ErrorKind; 5] = [
        ErrorKind::Database,
        ErrorKind::Api,
        ErrorKind::Schema,
        ErrorKind::Authentication,
        ErrorKind::Network,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Database => "database",
            ErrorKind::Api => "api",
            ErrorKind::Schema => "schema",
            ErrorKind::Authentication => "authentication",
            ErrorKind::Network => "network",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ErrorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        ErrorKind::ALL
            .into_iter()
            .find(|k| k.as_str() == lower)
            .ok_or_else(|| format!("unknown error kind: {s}"))
    }
}

/// Priority tag attached to a pattern.
///
/// Only `Critical` changes behaviour (emergency response and the uptime
/// heuristic); `High` and `Critical` contribute prevention strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
    Resolved,
}

impl Severity {
    pub fn is_critical(self) -> bool {
        matches!(self, Severity::Critical)
    }

    /// High and critical patterns feed the prevention strategy list.
    pub fn is_elevated(self) -> bool {
        matches!(self, Severity::High | Severity::Critical)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
            Severity::Resolved => "resolved",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a proactive rule asks for when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleAction {
    /// Reported as blocking. Nothing is actually halted.
    Block,
    /// Eligible for the auto-fix pass.
    Fix,
    Warn,
}

impl fmt::Display for RuleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RuleAction::Block => "block",
            RuleAction::Fix => "fix",
            RuleAction::Warn => "warn",
        };
        f.write_str(s)
    }
}
