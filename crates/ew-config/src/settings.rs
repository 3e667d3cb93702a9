//! Typed settings for every errwatch subsystem.
//!
//! All sections are optional in the file; anything left out takes the
//! built-in default, so an empty TOML document is a valid configuration.

use ew_common::{ErrorKind, Severity};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Dashboards the proactive scanner watches when no list is configured.
pub const DEFAULT_SCAN_FILES: &[&str] = &[
    "client/src/pages/AdminPanel.tsx",
    "client/src/pages/BookingWorkflowTest.tsx",
    "client/src/components/SuperadminDashboard.tsx",
    "client/src/components/UnifiedDashboard.tsx",
];

/// Root settings document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Schema version the file was written against.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<String>,
    pub registry: RegistrySettings,
    pub scanner: ScannerSettings,
    pub schedule: ScheduleSettings,
    pub credits: CreditSettings,
}

/// Error-pattern registry tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistrySettings {
    /// Trailing window in which critical matches lower the uptime figure.
    pub critical_window_secs: u64,
    /// How long entries stay in the critical log before the prune job drops them.
    pub critical_retention_secs: u64,
    /// Number of characters of an unknown error kept as its learned pattern.
    pub learned_prefix_len: usize,
    /// Skip the built-in seed list entirely.
    pub skip_builtin_patterns: bool,
    /// Extra patterns appended after the seed list, in file order.
    pub patterns: Vec<PatternSpec>,
}

impl Default for RegistrySettings {
    fn default() -> Self {
        Self {
            critical_window_secs: 60,
            critical_retention_secs: 60 * 60,
            learned_prefix_len: 100,
            skip_builtin_patterns: false,
            patterns: Vec::new(),
        }
    }
}

/// A pattern declared in the settings file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PatternSpec {
    pub kind: ErrorKind,
    /// Regular expression, also tried as a literal substring.
    pub pattern: String,
    pub description: String,
    #[serde(default)]
    pub resolution: String,
    #[serde(default)]
    pub prevention_strategy: String,
    #[serde(default = "default_spec_severity")]
    pub severity: Severity,
    /// Historical match count carried into the registry.
    #[serde(default)]
    pub frequency: u64,
}

fn default_spec_severity() -> Severity {
    Severity::Medium
}

/// Proactive scanner inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScannerSettings {
    /// Directory the file list is resolved against. Defaults to the working directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,
    /// Files scanned on every pass, relative to `root`.
    pub files: Vec<PathBuf>,
    /// Built-in rule ids to leave out.
    pub disabled_rules: Vec<String>,
}

impl Default for ScannerSettings {
    fn default() -> Self {
        Self {
            root: None,
            files: DEFAULT_SCAN_FILES.iter().map(PathBuf::from).collect(),
            disabled_rules: Vec::new(),
        }
    }
}

/// Intervals of the daemon's periodic jobs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScheduleSettings {
    pub health_interval_secs: u64,
    pub prune_interval_secs: u64,
    pub scan_interval_secs: u64,
}

impl Default for ScheduleSettings {
    fn default() -> Self {
        Self {
            health_interval_secs: 30,
            prune_interval_secs: 60 * 60,
            scan_interval_secs: 5 * 60,
        }
    }
}

/// Recurring-work credit bookkeeping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CreditSettings {
    /// Dollars per hour of recurring work.
    pub rate_per_hour: f64,
    /// Start without the documented recurring issues.
    pub skip_known_issues: bool,
}

impl Default for CreditSettings {
    fn default() -> Self {
        Self {
            rate_per_hour: 50.0,
            skip_known_issues: false,
        }
    }
}

impl Settings {
    /// Parse a TOML settings document.
    pub fn from_toml_str(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    /// Parse a JSON settings document.
    pub fn from_json_str(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}
