//! Semantic validation of a parsed [`Settings`] document.

use crate::settings::Settings;
use regex::Regex;
use thiserror::Error;

/// A single problem found in a settings document.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("I/O error: {0}")]
    IoError(String),

    #[error("parse error: {0}")]
    ParseError(String),

    #[error("unsupported schema version: {0}")]
    SchemaVersion(String),

    #[error("{field} must be greater than zero")]
    ZeroValue { field: &'static str },

    #[error("{field} must be a finite, non-negative number (got {value})")]
    NegativeValue { field: &'static str, value: f64 },

    #[error("registry.patterns[{index}] ({pattern:?}) does not compile: {reason}")]
    BadPattern {
        index: usize,
        pattern: String,
        reason: String,
    },

    #[error("registry.patterns[{index}] has an empty pattern")]
    EmptyPattern { index: usize },
}

/// Outcome of validating one document.
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Collapse into the first error, if any.
    pub fn into_result(self) -> Result<(), ValidationError> {
        match self.errors.into_iter().next() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Check ranges and compile every configured pattern.
pub fn validate(settings: &Settings) -> ValidationResult {
    let mut errors = Vec::new();

    if let Some(version) = &settings.schema_version {
        if !ew_common::schema::is_compatible(version) {
            errors.push(ValidationError::SchemaVersion(version.clone()));
        }
    }

    let zero_checks: [(&'static str, u64); 5] = [
        (
            "registry.critical_window_secs",
            settings.registry.critical_window_secs,
        ),
        (
            "registry.critical_retention_secs",
            settings.registry.critical_retention_secs,
        ),
        (
            "schedule.health_interval_secs",
            settings.schedule.health_interval_secs,
        ),
        (
            "schedule.prune_interval_secs",
            settings.schedule.prune_interval_secs,
        ),
        (
            "schedule.scan_interval_secs",
            settings.schedule.scan_interval_secs,
        ),
    ];
    for (field, value) in zero_checks {
        if value == 0 {
            errors.push(ValidationError::ZeroValue { field });
        }
    }
    if settings.registry.learned_prefix_len == 0 {
        errors.push(ValidationError::ZeroValue {
            field: "registry.learned_prefix_len",
        });
    }

    let rate = settings.credits.rate_per_hour;
    if !rate.is_finite() || rate < 0.0 {
        errors.push(ValidationError::NegativeValue {
            field: "credits.rate_per_hour",
            value: rate,
        });
    }

    for (index, spec) in settings.registry.patterns.iter().enumerate() {
        if spec.pattern.is_empty() {
            errors.push(ValidationError::EmptyPattern { index });
            continue;
        }
        if let Err(e) = Regex::new(&spec.pattern) {
            errors.push(ValidationError::BadPattern {
                index,
                pattern: spec.pattern.clone(),
                reason: e.to_string(),
            });
        }
    }

    ValidationResult { errors }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::PatternSpec;
    use ew_common::{ErrorKind, Severity};

    fn spec(pattern: &str) -> PatternSpec {
        PatternSpec {
            kind: ErrorKind::Api,
            pattern: pattern.to_string(),
            description: "test".to_string(),
            resolution: String::new(),
            prevention_strategy: String::new(),
            severity: Severity::Low,
            frequency: 0,
        }
    }

    #[test]
    fn defaults_are_valid() {
        assert!(validate(&Settings::default()).is_valid());
    }

    #[test]
    fn zero_intervals_are_reported_individually() {
        let mut settings = Settings::default();
        settings.schedule.health_interval_secs = 0;
        settings.schedule.scan_interval_secs = 0;
        let result = validate(&settings);
        assert_eq!(result.errors.len(), 2);
        assert!(result
            .errors
            .contains(&ValidationError::ZeroValue {
                field: "schedule.scan_interval_secs"
            }));
    }

    #[test]
    fn malformed_regex_is_caught_before_use() {
        let mut settings = Settings::default();
        settings.registry.patterns = vec![spec("fine"), spec("column \"(unclosed")];
        let result = validate(&settings);
        match result.into_result() {
            Err(ValidationError::BadPattern { index, .. }) => assert_eq!(index, 1),
            other => panic!("expected BadPattern, got {other:?}"),
        }
    }

    #[test]
    fn negative_rate_and_empty_pattern() {
        let mut settings = Settings::default();
        settings.credits.rate_per_hour = -1.0;
        settings.registry.patterns = vec![spec("")];
        let result = validate(&settings);
        assert_eq!(result.errors.len(), 2);
    }

    #[test]
    fn incompatible_schema_version() {
        let settings = Settings {
            schema_version: Some("2.0.0".to_string()),
            ..Settings::default()
        };
        assert_eq!(
            validate(&settings).into_result(),
            Err(ValidationError::SchemaVersion("2.0.0".to_string()))
        );
    }
}
