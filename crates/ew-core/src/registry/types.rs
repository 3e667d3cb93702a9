//! Types for the error-pattern registry.

use chrono::{DateTime, Utc};
use ew_common::{ErrorKind, Severity};
use regex::Regex;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// How a pattern is tested against error text.
#[derive(Debug, Clone)]
pub enum PatternMatcher {
    /// Seeded or configured signature. Matches when the text contains the
    /// source literally or the compiled regex finds a match.
    Regex(Regex),
    /// Learned from an unknown error. Substring containment only, so
    /// arbitrary error text never has to compile as a regex.
    Literal(String),
}

impl PatternMatcher {
    /// Compile a regex matcher.
    pub fn compile(source: &str) -> Result<Self, regex::Error> {
        Regex::new(source).map(PatternMatcher::Regex)
    }

    pub fn literal(text: impl Into<String>) -> Self {
        PatternMatcher::Literal(text.into())
    }

    /// The pattern text as it was written.
    pub fn source(&self) -> &str {
        match self {
            PatternMatcher::Regex(re) => re.as_str(),
            PatternMatcher::Literal(text) => text,
        }
    }

    pub fn is_match(&self, haystack: &str) -> bool {
        match self {
            PatternMatcher::Regex(re) => haystack.contains(re.as_str()) || re.is_match(haystack),
            // An empty learned prefix would otherwise swallow every later error.
            PatternMatcher::Literal(text) => !text.is_empty() && haystack.contains(text.as_str()),
        }
    }

    fn mode(&self) -> &'static str {
        match self {
            PatternMatcher::Regex(_) => "regex",
            PatternMatcher::Literal(_) => "literal",
        }
    }
}

impl Serialize for PatternMatcher {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("PatternMatcher", 2)?;
        state.serialize_field("mode", self.mode())?;
        state.serialize_field("source", self.source())?;
        state.end()
    }
}

/// Where a pattern entered the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternSource {
    /// Built-in seed list.
    Seed,
    /// Declared in the settings file.
    Config,
    /// Appended at runtime for an unmatched error.
    Learned,
}

/// Owned description of a pattern before it is compiled into the registry.
#[derive(Debug, Clone, PartialEq)]
pub struct PatternDefinition {
    pub kind: ErrorKind,
    pub pattern: String,
    pub description: String,
    pub resolution: String,
    pub prevention_strategy: String,
    pub severity: Severity,
    pub frequency: u64,
    pub source: PatternSource,
}

impl PatternDefinition {
    /// Identity key, `"{kind}_{pattern}"`.
    pub fn key(&self) -> String {
        pattern_key(self.kind, &self.pattern)
    }
}

impl From<&ew_config::PatternSpec> for PatternDefinition {
    fn from(spec: &ew_config::PatternSpec) -> Self {
        Self {
            kind: spec.kind,
            pattern: spec.pattern.clone(),
            description: spec.description.clone(),
            resolution: spec.resolution.clone(),
            prevention_strategy: spec.prevention_strategy.clone(),
            severity: spec.severity,
            frequency: spec.frequency,
            source: PatternSource::Config,
        }
    }
}

pub(crate) fn pattern_key(kind: ErrorKind, pattern: &str) -> String {
    format!("{}_{}", kind, pattern)
}

/// A known class of failure and its bookkeeping.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorPattern {
    pub kind: ErrorKind,
    pub matcher: PatternMatcher,
    pub description: String,
    pub resolution: String,
    pub prevention_strategy: String,
    pub severity: Severity,
    /// Number of matches, including any carried-over history.
    pub frequency: u64,
    /// Time of the latest match. `None` until the first match in this process.
    pub last_occurred: Option<DateTime<Utc>>,
    pub source: PatternSource,
}

impl ErrorPattern {
    pub fn key(&self) -> String {
        pattern_key(self.kind, self.matcher.source())
    }

    /// Count a match at `now`. `last_occurred` never moves backwards.
    pub(crate) fn record_match(&mut self, now: DateTime<Utc>) {
        self.frequency = self.frequency.saturating_add(1);
        self.last_occurred = Some(match self.last_occurred {
            Some(prev) if prev > now => prev,
            _ => now,
        });
    }

    /// Whether this is a critical pattern that matched within `[now - window, now]`.
    pub fn critical_within(&self, now: DateTime<Utc>, window: chrono::Duration) -> bool {
        self.severity.is_critical()
            && self
                .last_occurred
                .is_some_and(|at| at > now - window && at <= now)
    }
}

/// Two definitions that share one identity key.
///
/// The registry keeps a single entry at the position of the first
/// registration, carrying the values of the later one, and reports the
/// collision here so it can be fixed in the source data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeedConflict {
    pub key: String,
    pub position: usize,
    pub replaced_severity: Severity,
    pub replaced_resolution: String,
    pub kept_severity: Severity,
    pub kept_resolution: String,
}

/// Entry in the in-memory critical error log.
#[derive(Debug, Clone, Serialize)]
pub struct CriticalEntry {
    pub at: DateTime<Utc>,
    pub kind: ErrorKind,
    pub description: String,
    pub context: String,
}

impl std::fmt::Display for CriticalEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} in {}",
            self.at.to_rfc3339(),
            self.description,
            self.context
        )
    }
}
