//! Error-pattern registry.
//!
//! Classifies raw error text against an ordered table of known signatures,
//! counts recurrences and learns placeholder patterns for failures it has
//! never seen. The registry is an owned value: callers construct it once at
//! startup and hand it (usually as a [`SharedRegistry`]) to every error
//! handling entry point.
//!
//! # Matching
//!
//! The table is scanned in insertion order and the first matching pattern
//! wins. Seeded and configured patterns are regexes that are compiled when
//! the registry is built, so a malformed signature is a construction error
//! rather than a panic inside an error handler. Learned patterns are plain
//! substrings.
//!
//! # Example
//!
//! ```
//! use ew_core::registry::ErrorPatternRegistry;
//!
//! let mut registry = ErrorPatternRegistry::with_defaults().unwrap();
//! assert!(registry.learn_from_error(&"Access token required", "GET /api/me"));
//! let report = registry.health_report();
//! assert!(report.uptime <= 100.0);
//! ```

pub mod diagnostics;
pub mod health;
pub mod schema_fix;
pub mod seed;
pub mod shared;
pub mod types;

pub use diagnostics::Diagnostics;
pub use health::{HealthMetrics, HealthReport, KindCount};
pub use schema_fix::SchemaFix;
pub use seed::{seed_definitions, SeedPattern, SEED_PATTERNS};
pub use shared::{record_failure, share, SharedRegistry};
pub use types::{
    CriticalEntry, ErrorPattern, PatternDefinition, PatternMatcher, PatternSource, SeedConflict,
};

use chrono::{DateTime, Utc};
use ew_common::{Error, ErrorKind, Result, Severity};
use ew_config::RegistrySettings;
use serde::Serialize;
use std::collections::{HashMap, VecDeque};
use std::fmt;
use tracing::{error, info, warn};

/// Resolution text attached to learned patterns.
pub const LEARNED_RESOLUTION: &str = "Manual investigation required";

/// Prevention text attached to learned patterns.
pub const LEARNED_PREVENTION: &str = "Add specific handling once pattern is analyzed";

/// Tuning knobs, normally taken from [`RegistrySettings`].
#[derive(Debug, Clone)]
pub struct RegistryOptions {
    pub critical_window: chrono::Duration,
    pub critical_retention: chrono::Duration,
    pub learned_prefix_len: usize,
}

impl Default for RegistryOptions {
    fn default() -> Self {
        Self::from(&RegistrySettings::default())
    }
}

impl From<&RegistrySettings> for RegistryOptions {
    fn from(settings: &RegistrySettings) -> Self {
        Self {
            critical_window: secs(settings.critical_window_secs),
            critical_retention: secs(settings.critical_retention_secs),
            learned_prefix_len: settings.learned_prefix_len,
        }
    }
}

/// Longest window accepted from settings; larger values are clamped.
const MAX_WINDOW_SECS: u64 = 10 * 365 * 24 * 60 * 60;

fn secs(n: u64) -> chrono::Duration {
    chrono::Duration::seconds(n.min(MAX_WINDOW_SECS) as i64)
}

/// Remediation emitted when a critical pattern matches.
#[derive(Debug, Clone, Serialize)]
pub struct EmergencyResponse {
    pub description: String,
    pub context: String,
    pub resolution: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_fix: Option<SchemaFix>,
}

/// What `classify` did with one error.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LearnOutcome {
    /// An existing pattern matched and was updated.
    Matched {
        index: usize,
        key: String,
        description: String,
        resolution: String,
        severity: Severity,
        frequency: u64,
        #[serde(skip_serializing_if = "Option::is_none")]
        emergency: Option<EmergencyResponse>,
    },
    /// Nothing matched; a placeholder pattern was appended.
    Learned {
        index: usize,
        key: String,
        kind: ErrorKind,
        description: String,
    },
}

impl LearnOutcome {
    pub fn is_match(&self) -> bool {
        matches!(self, LearnOutcome::Matched { .. })
    }

    pub fn index(&self) -> usize {
        match self {
            LearnOutcome::Matched { index, .. } | LearnOutcome::Learned { index, .. } => *index,
        }
    }
}

/// Guess a kind for an unknown error from keywords in its text.
pub fn categorize_error(text: &str) -> ErrorKind {
    // Case-sensitive: "Database connection refused" is a network failure.
    let has = |words: &[&str]| words.iter().any(|w| text.contains(w));
    if has(&["column", "table", "database"]) {
        ErrorKind::Database
    } else if has(&["token", "authentication", "unauthorized"]) {
        ErrorKind::Authentication
    } else if has(&["network", "connection", "timeout"]) {
        ErrorKind::Network
    } else if has(&["schema", "validation"]) {
        ErrorKind::Schema
    } else {
        ErrorKind::Api
    }
}

/// Ordered table of error patterns plus the critical error log.
#[derive(Debug, Clone)]
pub struct ErrorPatternRegistry {
    patterns: Vec<ErrorPattern>,
    index: HashMap<String, usize>,
    conflicts: Vec<SeedConflict>,
    critical_log: VecDeque<CriticalEntry>,
    metrics: Option<HealthMetrics>,
    options: RegistryOptions,
}

impl ErrorPatternRegistry {
    /// Empty registry with no patterns.
    pub fn empty(options: RegistryOptions) -> Self {
        Self {
            patterns: Vec::new(),
            index: HashMap::new(),
            conflicts: Vec::new(),
            critical_log: VecDeque::new(),
            metrics: None,
            options,
        }
    }

    /// Build from an explicit definition list, compiling every pattern.
    pub fn with_definitions(
        definitions: impl IntoIterator<Item = PatternDefinition>,
        options: RegistryOptions,
    ) -> Result<Self> {
        let mut registry = Self::empty(options);
        for def in definitions {
            registry.register(def)?;
        }
        for conflict in &registry.conflicts {
            warn!(
                target: "registry.seed",
                key = %conflict.key,
                position = conflict.position,
                replaced = %conflict.replaced_severity,
                kept = %conflict.kept_severity,
                "Duplicate pattern key in seed data; later definition overrides earlier one"
            );
        }
        info!(
            target: "registry.init",
            patterns = registry.patterns.len(),
            conflicts = registry.conflicts.len(),
            "Error pattern registry initialized"
        );
        Ok(registry)
    }

    /// Built-in seeds with default options.
    pub fn with_defaults() -> Result<Self> {
        Self::with_definitions(seed_definitions(), RegistryOptions::default())
    }

    /// Built-in seeds (unless disabled) followed by configured patterns.
    pub fn from_settings(settings: &RegistrySettings) -> Result<Self> {
        let seeds: Vec<PatternDefinition> = if settings.skip_builtin_patterns {
            Vec::new()
        } else {
            seed_definitions().collect()
        };
        let extra = settings.patterns.iter().map(PatternDefinition::from);
        Self::with_definitions(seeds.into_iter().chain(extra), RegistryOptions::from(settings))
    }

    /// Add a definition. A repeated key overwrites in place and is recorded
    /// as a [`SeedConflict`].
    pub fn register(&mut self, def: PatternDefinition) -> Result<()> {
        let key = def.key();
        let matcher =
            PatternMatcher::compile(&def.pattern).map_err(|e| Error::invalid_pattern(&key, e))?;
        let pattern = ErrorPattern {
            kind: def.kind,
            matcher,
            description: def.description,
            resolution: def.resolution,
            prevention_strategy: def.prevention_strategy,
            severity: def.severity,
            frequency: def.frequency,
            last_occurred: None,
            source: def.source,
        };

        match self.index.get(&key) {
            Some(&position) => {
                let previous = &self.patterns[position];
                self.conflicts.push(SeedConflict {
                    key,
                    position,
                    replaced_severity: previous.severity,
                    replaced_resolution: previous.resolution.clone(),
                    kept_severity: pattern.severity,
                    kept_resolution: pattern.resolution.clone(),
                });
                self.patterns[position] = pattern;
            }
            None => {
                self.index.insert(key, self.patterns.len());
                self.patterns.push(pattern);
            }
        }
        Ok(())
    }

    /// Record an error. Always returns `true`; nothing here can fail the caller.
    pub fn learn_from_error(&mut self, error: &dyn fmt::Display, context: &str) -> bool {
        self.classify_at(error, context, Utc::now());
        true
    }

    /// Record an error and report what happened.
    pub fn classify(&mut self, error: &dyn fmt::Display, context: &str) -> LearnOutcome {
        self.classify_at(error, context, Utc::now())
    }

    /// [`classify`](Self::classify) with an explicit clock.
    pub fn classify_at(
        &mut self,
        error: &dyn fmt::Display,
        context: &str,
        now: DateTime<Utc>,
    ) -> LearnOutcome {
        let text = error.to_string();

        let Some(position) = self.patterns.iter().position(|p| p.matcher.is_match(&text)) else {
            return self.learn_new(&text, context, now);
        };

        let pattern = &mut self.patterns[position];
        pattern.record_match(now);
        info!(
            target: "registry.learn",
            key = %pattern.key(),
            frequency = pattern.frequency,
            severity = %pattern.severity,
            context,
            resolution = %pattern.resolution,
            "Known error pattern detected: {}",
            pattern.description
        );

        let emergency = if pattern.severity.is_critical() {
            let pattern = pattern.clone();
            Some(self.emergency_response(&pattern, &text, context, now))
        } else {
            None
        };

        let pattern = &self.patterns[position];
        LearnOutcome::Matched {
            index: position,
            key: pattern.key(),
            description: pattern.description.clone(),
            resolution: pattern.resolution.clone(),
            severity: pattern.severity,
            frequency: pattern.frequency,
            emergency,
        }
    }

    fn learn_new(&mut self, text: &str, context: &str, now: DateTime<Utc>) -> LearnOutcome {
        let prefix: String = text.chars().take(self.options.learned_prefix_len).collect();
        let kind = categorize_error(text);
        let description = format!("New error pattern discovered in {context}");
        let pattern = ErrorPattern {
            kind,
            matcher: PatternMatcher::literal(prefix),
            description: description.clone(),
            resolution: LEARNED_RESOLUTION.to_string(),
            prevention_strategy: LEARNED_PREVENTION.to_string(),
            severity: Severity::Medium,
            frequency: 1,
            last_occurred: Some(now),
            source: PatternSource::Learned,
        };
        let key = pattern.key();
        let position = self.patterns.len();
        self.index.entry(key.clone()).or_insert(position);
        self.patterns.push(pattern);

        info!(
            target: "registry.learn",
            key = %key,
            kind = %kind,
            context,
            "Learned new error pattern"
        );

        LearnOutcome::Learned {
            index: position,
            key,
            kind,
            description,
        }
    }

    fn emergency_response(
        &mut self,
        pattern: &ErrorPattern,
        text: &str,
        context: &str,
        now: DateTime<Utc>,
    ) -> EmergencyResponse {
        self.critical_log.push_back(CriticalEntry {
            at: now,
            kind: pattern.kind,
            description: pattern.description.clone(),
            context: context.to_string(),
        });

        let schema_fix = if pattern.kind == ErrorKind::Database
            && pattern.matcher.source().contains("does not exist")
        {
            schema_fix::suggest(text).or_else(|| schema_fix::suggest(pattern.matcher.source()))
        } else {
            None
        };

        error!(
            target: "registry.emergency",
            context,
            pattern = %pattern.description,
            action = %pattern.resolution,
            "Critical error detected, emergency response initiated"
        );
        if let Some(fix) = &schema_fix {
            error!(target: "registry.emergency", fix = %fix.summary(), "Schema fix suggested");
        }

        EmergencyResponse {
            description: pattern.description.clone(),
            context: context.to_string(),
            resolution: pattern.resolution.clone(),
            schema_fix,
        }
    }

    /// Health report as of now.
    pub fn health_report(&self) -> HealthReport {
        self.health_report_at(Utc::now())
    }

    /// Health report at an explicit time.
    pub fn health_report_at(&self, now: DateTime<Utc>) -> HealthReport {
        let recent = health::recent_critical_count(&self.patterns, now, self.options.critical_window);
        let retention_cutoff = now - self.options.critical_retention;
        HealthReport {
            generated_at: now,
            uptime: health::uptime_for(recent),
            error_rate: recent,
            last_health_check: self.metrics.as_ref().map(|m| m.last_health_check),
            total_error_patterns: self.patterns.len(),
            critical_errors_last_hour: self
                .critical_log
                .iter()
                .filter(|e| e.at > retention_cutoff)
                .count(),
            top_error_types: health::top_error_types(&self.patterns, health::TOP_ERROR_TYPES),
            prevention_strategies: health::prevention_strategies(
                &self.patterns,
                health::MAX_PREVENTION_STRATEGIES,
            ),
        }
    }

    /// Periodic health refresh: recompute and store the metrics snapshot.
    pub fn refresh_health(&mut self, now: DateTime<Utc>) -> HealthMetrics {
        let recent = health::recent_critical_count(&self.patterns, now, self.options.critical_window);
        let metrics = HealthMetrics {
            uptime: health::uptime_for(recent),
            error_rate: recent,
            last_health_check: now,
        };
        info!(
            target: "registry.health",
            uptime = metrics.uptime,
            recent_errors = metrics.error_rate,
            "Site health update"
        );
        self.metrics = Some(metrics.clone());
        metrics
    }

    /// Last stored metrics snapshot.
    pub fn metrics(&self) -> Option<&HealthMetrics> {
        self.metrics.as_ref()
    }

    /// Drop critical log entries older than the retention window. Returns how many were removed.
    pub fn prune_critical_log(&mut self, now: DateTime<Utc>) -> usize {
        let cutoff = now - self.options.critical_retention;
        let before = self.critical_log.len();
        self.critical_log.retain(|e| e.at > cutoff);
        let removed = before - self.critical_log.len();
        if removed > 0 {
            info!(target: "registry.prune", removed, remaining = self.critical_log.len(), "Pruned critical error log");
        }
        removed
    }

    /// Diagnostics over the critical log.
    pub fn diagnostics(&self, now: DateTime<Utc>) -> Diagnostics {
        let log: Vec<CriticalEntry> = self.critical_log.iter().cloned().collect();
        diagnostics::evaluate(&log, now)
    }

    pub fn patterns(&self) -> &[ErrorPattern] {
        &self.patterns
    }

    pub fn get(&self, key: &str) -> Option<&ErrorPattern> {
        self.index.get(key).map(|&i| &self.patterns[i])
    }

    pub fn seed_conflicts(&self) -> &[SeedConflict] {
        &self.conflicts
    }

    pub fn critical_log(&self) -> impl Iterator<Item = &CriticalEntry> {
        self.critical_log.iter()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn options(&self) -> &RegistryOptions {
        &self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 25, 12, 0, 0).unwrap()
    }

    fn def(kind: ErrorKind, pattern: &str, severity: Severity, frequency: u64) -> PatternDefinition {
        PatternDefinition {
            kind,
            pattern: pattern.to_string(),
            description: format!("{pattern} description"),
            resolution: format!("{pattern} resolution"),
            prevention_strategy: format!("{pattern} prevention"),
            severity,
            frequency,
            source: PatternSource::Seed,
        }
    }

    #[test]
    fn defaults_load_nineteen_distinct_patterns_and_one_conflict() {
        let registry = ErrorPatternRegistry::with_defaults().unwrap();
        assert_eq!(registry.len(), 19);
        let conflicts = registry.seed_conflicts();
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].key, "api_Unexpected token.*is not valid JSON");
        assert_eq!(conflicts[0].replaced_severity, Severity::Resolved);
        assert_eq!(conflicts[0].kept_severity, Severity::High);
        // Stays at the position of the first registration.
        assert_eq!(conflicts[0].position, 9);
        assert!(registry.patterns().iter().all(|p| p.last_occurred.is_none()));
    }

    #[test]
    fn malformed_pattern_fails_construction() {
        let result = ErrorPatternRegistry::with_definitions(
            vec![def(ErrorKind::Api, "unbalanced (", Severity::Low, 0)],
            RegistryOptions::default(),
        );
        let err = result.unwrap_err();
        assert_eq!(err.code(), 20);
        assert!(err.to_string().contains("api_unbalanced ("));
    }

    #[test]
    fn match_increments_frequency_by_one_and_stamps_time() {
        let mut registry = ErrorPatternRegistry::with_defaults().unwrap();
        let key = "authentication_Access token required";
        let before = registry.get(key).unwrap().frequency;
        let outcome = registry.classify_at(&"401: Access token required", "GET /api/me", t0());
        assert!(outcome.is_match());
        let p = registry.get(key).unwrap();
        assert_eq!(p.frequency, before + 1);
        assert_eq!(p.last_occurred, Some(t0()));
        assert_eq!(registry.len(), 19);
    }

    #[test]
    fn first_match_wins_in_insertion_order() {
        let mut registry = ErrorPatternRegistry::with_defaults().unwrap();
        // Matches both the workflow_data seed and the generic column seed.
        let outcome =
            registry.classify_at(&r#"column "workflow_data" does not exist"#, "boot", t0());
        assert_eq!(outcome.index(), 0);
        assert_eq!(registry.patterns()[1].frequency, 0);
    }

    #[test]
    fn unmatched_error_appends_literal_pattern() {
        let mut registry = ErrorPatternRegistry::with_defaults().unwrap();
        let long = format!("ECONNRESET while talking to upstream {}", "x".repeat(200));
        let outcome = registry.classify_at(&long, "POST /api/bookings", t0());
        let LearnOutcome::Learned { index, kind, description, .. } = outcome else {
            panic!("expected a learned pattern");
        };
        assert_eq!(index, 19);
        assert_eq!(kind, ErrorKind::Api);
        assert_eq!(description, "New error pattern discovered in POST /api/bookings");

        let learned = &registry.patterns()[index];
        assert_eq!(learned.frequency, 1);
        assert_eq!(learned.severity, Severity::Medium);
        assert_eq!(learned.source, PatternSource::Learned);
        assert_eq!(learned.matcher.source().chars().count(), 100);
        assert!(matches!(learned.matcher, PatternMatcher::Literal(_)));
    }

    #[test]
    fn learned_pattern_with_regex_metacharacters_is_safe() {
        let mut registry = ErrorPatternRegistry::with_defaults().unwrap();
        let weird = "TypeError: (intermediate value)[0] is not a function";
        registry.classify_at(&weird, "render", t0());
        let outcome = registry.classify_at(&weird, "render", t0());
        assert!(outcome.is_match());
        assert_eq!(registry.len(), 20);
    }

    #[test]
    fn fresh_registries_each_learn_the_same_error() {
        for _ in 0..2 {
            let mut registry = ErrorPatternRegistry::with_defaults().unwrap();
            let outcome = registry.classify_at(&"mystery failure 42", "job", t0());
            assert!(!outcome.is_match());
            assert_eq!(registry.len(), 20);
        }
    }

    #[test]
    fn critical_match_logs_and_suggests_schema_fix() {
        let mut registry = ErrorPatternRegistry::with_defaults().unwrap();
        let outcome = registry.classify_at(
            &r#"error: column "venue_id" of relation "bookings" does not exist"#,
            "GET /api/bookings",
            t0(),
        );
        let LearnOutcome::Matched { emergency: Some(em), severity, .. } = outcome else {
            panic!("expected a critical match");
        };
        assert_eq!(severity, Severity::Critical);
        assert_eq!(em.context, "GET /api/bookings");
        match em.schema_fix {
            Some(SchemaFix::AddColumn { table, column, .. }) => {
                assert_eq!(table, "bookings");
                assert_eq!(column, "venue_id");
            }
            other => panic!("unexpected fix {other:?}"),
        }
        let log: Vec<_> = registry.critical_log().collect();
        assert_eq!(log.len(), 1);
        assert!(log[0].to_string().contains("in GET /api/bookings"));
    }

    #[test]
    fn non_critical_match_has_no_emergency() {
        let mut registry = ErrorPatternRegistry::with_defaults().unwrap();
        let outcome = registry.classify_at(&"Access token required", "GET /", t0());
        assert!(matches!(outcome, LearnOutcome::Matched { emergency: None, .. }));
        assert_eq!(registry.critical_log().count(), 0);
    }

    #[test]
    fn historical_json_entry_matches_and_keeps_configured_severity() {
        let mut registry = ErrorPatternRegistry::with_definitions(
            vec![def(
                ErrorKind::Api,
                "Unexpected token.*is not valid JSON",
                Severity::High,
                4,
            )],
            RegistryOptions::default(),
        )
        .unwrap();
        let outcome = registry.classify_at(
            &"Unexpected token o in JSON at position 0 is not valid JSON",
            "POST /api/bookings",
            t0(),
        );
        let LearnOutcome::Matched { frequency, severity, .. } = outcome else {
            panic!("expected match");
        };
        assert_eq!(frequency, 5);
        assert_eq!(severity, Severity::High);
    }

    #[test]
    fn uptime_drops_per_recent_critical_and_recovers() {
        let mut registry = ErrorPatternRegistry::with_defaults().unwrap();
        assert_eq!(registry.health_report_at(t0()).uptime, 100.0);

        registry.classify_at(&"CheckCircle is not defined", "render", t0());
        registry.classify_at(&r#"relation "fans" does not exist"#, "GET /fans", t0());
        let report = registry.health_report_at(t0() + chrono::Duration::seconds(10));
        assert_eq!(report.uptime, 80.0);
        assert_eq!(report.error_rate, 2);

        // Same pattern twice only counts once.
        registry.classify_at(&"CheckCircle is not defined", "render", t0());
        assert_eq!(registry.health_report_at(t0()).uptime, 80.0);

        let later = t0() + chrono::Duration::seconds(61);
        assert_eq!(registry.health_report_at(later).uptime, 100.0);
    }

    #[test]
    fn top_types_and_strategies_come_from_table() {
        let registry = ErrorPatternRegistry::with_defaults().unwrap();
        let report = registry.health_report_at(t0());
        assert_eq!(report.top_error_types.len(), 3);
        // schema: 1+6+4+1+1+1 = 14 from seed history.
        assert_eq!(report.top_error_types[0].kind, ErrorKind::Schema);
        assert_eq!(report.top_error_types[0].frequency, 14);
        assert!(report.prevention_strategies.len() <= 5);
        assert_eq!(
            report.prevention_strategies[0],
            "Always verify schema changes are applied before deploying new features"
        );
    }

    #[test]
    fn refresh_and_prune() {
        let mut registry = ErrorPatternRegistry::with_defaults().unwrap();
        registry.classify_at(&"CheckCircle is not defined", "render", t0());
        let metrics = registry.refresh_health(t0());
        assert_eq!(metrics.uptime, 90.0);
        assert_eq!(
            registry.health_report_at(t0()).last_health_check,
            Some(t0())
        );

        assert_eq!(registry.prune_critical_log(t0() + chrono::Duration::minutes(30)), 0);
        assert_eq!(registry.prune_critical_log(t0() + chrono::Duration::minutes(61)), 1);
        assert_eq!(registry.critical_log().count(), 0);
    }

    #[test]
    fn settings_patterns_follow_seeds() {
        let settings = RegistrySettings {
            patterns: vec![ew_config::PatternSpec {
                kind: ErrorKind::Network,
                pattern: "ECONNRESET".to_string(),
                description: "Peer reset".to_string(),
                resolution: "Retry with backoff".to_string(),
                prevention_strategy: String::new(),
                severity: Severity::High,
                frequency: 0,
            }],
            ..RegistrySettings::default()
        };
        let mut registry = ErrorPatternRegistry::from_settings(&settings).unwrap();
        assert_eq!(registry.len(), 20);
        assert_eq!(registry.patterns()[19].source, PatternSource::Config);
        let outcome = registry.classify_at(&"read ECONNRESET", "socket", t0());
        assert_eq!(outcome.index(), 19);

        let only_config = RegistrySettings {
            skip_builtin_patterns: true,
            ..settings
        };
        assert_eq!(ErrorPatternRegistry::from_settings(&only_config).unwrap().len(), 1);
    }

    #[test]
    fn categorize_error_keywords() {
        assert_eq!(categorize_error("table users is locked"), ErrorKind::Database);
        assert_eq!(categorize_error("Invalid token"), ErrorKind::Authentication);
        assert_eq!(categorize_error("socket timeout"), ErrorKind::Network);
        assert_eq!(categorize_error("validation failed"), ErrorKind::Schema);
        assert_eq!(categorize_error("boom"), ErrorKind::Api);
    }

    #[test]
    fn categorize_error_is_case_sensitive() {
        assert_eq!(categorize_error("Database connection refused"), ErrorKind::Network);
        assert_eq!(categorize_error("Unauthorized"), ErrorKind::Api);
        assert_eq!(categorize_error("Token expired"), ErrorKind::Api);
    }

    #[test]
    fn learn_from_error_always_returns_true() {
        let mut registry = ErrorPatternRegistry::with_defaults().unwrap();
        assert!(registry.learn_from_error(&"", "empty"));
        assert!(registry.learn_from_error(&"Access token required", "auth"));
    }
}
