//! Built-in error signatures loaded at startup.
//!
//! Order matters: matching is first-match-wins in this order. The list
//! contains one known duplicate key (`api_Unexpected token.*is not valid JSON`,
//! registered as `resolved` and later as `high`); the registry reports it as a
//! [`SeedConflict`](super::SeedConflict) instead of hiding it.

use super::types::{PatternDefinition, PatternSource};
use ew_common::{ErrorKind, Severity};

/// Static form of a seed entry.
#[derive(Debug, Clone, Copy)]
pub struct SeedPattern {
    pub kind: ErrorKind,
    pub pattern: &'static str,
    pub description: &'static str,
    pub resolution: &'static str,
    pub prevention_strategy: &'static str,
    pub severity: Severity,
    pub frequency: u64,
}

impl SeedPattern {
    pub fn to_definition(&self) -> PatternDefinition {
        PatternDefinition {
            kind: self.kind,
            pattern: self.pattern.to_string(),
            description: self.description.to_string(),
            resolution: self.resolution.to_string(),
            prevention_strategy: self.prevention_strategy.to_string(),
            severity: self.severity,
            frequency: self.frequency,
            source: PatternSource::Seed,
        }
    }
}

pub static SEED_PATTERNS: &[SeedPattern] = &[
    SeedPattern {
        kind: ErrorKind::Database,
        pattern: r#"column "workflow_data" does not exist"#,
        description: "Database schema missing workflow tracking columns",
        resolution: "Run ALTER TABLE commands to add missing columns: workflow_data, current_workflow_step, last_modified",
        prevention_strategy: "Always verify schema changes are applied before deploying new features",
        severity: Severity::Critical,
        frequency: 1,
    },
    SeedPattern {
        kind: ErrorKind::Database,
        pattern: r#"column ".*" does not exist"#,
        description: "Missing database columns preventing functionality",
        resolution: "Check the schema definitions and run the appropriate ALTER TABLE commands",
        prevention_strategy: "Implement pre-deployment schema verification",
        severity: Severity::Critical,
        frequency: 0,
    },
    SeedPattern {
        kind: ErrorKind::Schema,
        pattern: "CheckCircle is not defined",
        description: "Missing icon import causing component crashes",
        resolution: "Add the missing icon to the icon import statement: CheckCircle",
        prevention_strategy: "Always verify all imported components and icons are properly included in import statements",
        severity: Severity::Critical,
        frequency: 1,
    },
    SeedPattern {
        kind: ErrorKind::Schema,
        pattern: "Property .* does not exist on type",
        description: "Interface mismatches between component props and expected types",
        resolution: "Update component props to match interface definitions or update interface types",
        prevention_strategy: "Use strict type checking and validate component interfaces before deployment",
        severity: Severity::High,
        frequency: 6,
    },
    SeedPattern {
        kind: ErrorKind::Schema,
        pattern: "Property .* does not exist.*Did you mean.*open",
        description: "Modal component prop naming inconsistency between isOpen and open",
        resolution: "Standardize modal props to use consistent naming (isOpen vs open)",
        prevention_strategy: "Create consistent modal component interface and enforce across all modals",
        severity: Severity::Medium,
        frequency: 4,
    },
    SeedPattern {
        kind: ErrorKind::Database,
        pattern: "FATAL.*57P01.*ProcessInterrupts",
        description: "PostgreSQL connection interruption causing data access failures",
        resolution: "Implement database connection retry logic and connection pooling improvements",
        prevention_strategy: "Monitor database connection health and implement automatic reconnection",
        severity: Severity::Critical,
        frequency: 1,
    },
    SeedPattern {
        kind: ErrorKind::Network,
        pattern: "WebSocket.*length.*severity.*FATAL",
        description: "WebSocket connection failures affecting real-time features",
        resolution: "Implement WebSocket reconnection logic and fallback mechanisms",
        prevention_strategy: "Add WebSocket health monitoring and automatic reconnection",
        severity: Severity::High,
        frequency: 1,
    },
    SeedPattern {
        kind: ErrorKind::Api,
        pattern: "The above error occurred in the.*component",
        description: "Component rendering failures causing white screen",
        resolution: "Check for missing imports, prop mismatches, and component dependencies",
        prevention_strategy: "Implement error boundaries and comprehensive component testing",
        severity: Severity::Critical,
        frequency: 2,
    },
    SeedPattern {
        kind: ErrorKind::Schema,
        pattern: "Element implicitly has.*any.*type because expression of type.*number",
        description: "Index signature issues with category mapping objects",
        resolution: "Use keyof typeof for type-safe object property access",
        prevention_strategy: "Use proper typing for object property access",
        severity: Severity::Medium,
        frequency: 1,
    },
    SeedPattern {
        kind: ErrorKind::Api,
        pattern: "Unexpected token.*is not valid JSON",
        description: "Double-stringified JSON requests causing parse failures - marked resolved",
        resolution: "Custom JSON parsing middleware replaces the default body parser and unwraps nested string bodies",
        prevention_strategy: "Recursive body parsing prevents all double-stringify cases",
        severity: Severity::Resolved,
        frequency: 0,
    },
    SeedPattern {
        kind: ErrorKind::Schema,
        pattern: "Cannot find name.*",
        description: "Missing imports or exports causing undefined references",
        resolution: "Add proper import statements and verify exports in target modules",
        prevention_strategy: "Use auto-import tooling and verify all dependencies before deployment",
        severity: Severity::High,
        frequency: 1,
    },
    SeedPattern {
        kind: ErrorKind::Api,
        pattern: "type is invalid.*expected a string.*but got: undefined",
        description: "Component undefined due to missing or incorrect imports",
        resolution: "Verify component exports and import statements, check for mixed default/named imports",
        prevention_strategy: "Always verify component exports and use consistent import patterns",
        severity: Severity::Critical,
        frequency: 1,
    },
    SeedPattern {
        kind: ErrorKind::Schema,
        pattern: "Type.*is not assignable to.*",
        description: "Type mismatches between interfaces and database schemas",
        resolution: "Align interfaces with actual database schema types (string vs number, null handling)",
        prevention_strategy: "Keep interfaces synchronized with database schema definitions",
        severity: Severity::Medium,
        frequency: 1,
    },
    SeedPattern {
        kind: ErrorKind::Database,
        pattern: "Property.*does not exist on type.*Storage",
        description: "Missing database methods in storage interface implementation",
        resolution: "Implement missing methods or use correct method names (e.g. getBooking vs getBookingById)",
        prevention_strategy: "Implement complete storage interface methods and use consistent naming conventions",
        severity: Severity::High,
        frequency: 1,
    },
    SeedPattern {
        kind: ErrorKind::Api,
        pattern: "Cannot read property.*of undefined",
        description: "Null/undefined object access causing API failures",
        resolution: "Add null safety checks and proper error handling",
        prevention_strategy: "Implement comprehensive null safety validation",
        severity: Severity::High,
        frequency: 0,
    },
    SeedPattern {
        kind: ErrorKind::Database,
        pattern: r#"relation ".*" does not exist"#,
        description: "Missing database tables referenced in code - schema not synchronized",
        resolution: "Check the schema definitions and create missing tables with the schema push",
        prevention_strategy: "Always verify table creation after schema changes, implement database health checks",
        severity: Severity::Critical,
        frequency: 1,
    },
    SeedPattern {
        kind: ErrorKind::Api,
        pattern: "Unexpected token.*is not valid JSON",
        description: "Double-stringified JSON requests - body contains escaped JSON string instead of parsed object",
        resolution: "Detect a string body after JSON parsing and parse it a second time",
        prevention_strategy: "Implement post-JSON-parsing middleware to handle double-stringify edge cases",
        severity: Severity::High,
        frequency: 1,
    },
    SeedPattern {
        kind: ErrorKind::Database,
        pattern: "Too many database connection attempts are currently ongoing",
        description: "Database connection pool exhaustion due to concurrent queries",
        resolution: "Implement connection pooling limits, query timeouts, and retry logic",
        prevention_strategy: "Monitor connection pool usage and implement proper connection management",
        severity: Severity::High,
        frequency: 1,
    },
    SeedPattern {
        kind: ErrorKind::Database,
        pattern: "terminating connection due to administrator command",
        description: "Database connection terminated unexpectedly - likely due to connection limits or admin restart",
        resolution: "Implement connection retry logic and graceful error handling for database failures",
        prevention_strategy: "Add database reconnection logic and connection health monitoring",
        severity: Severity::High,
        frequency: 1,
    },
    SeedPattern {
        kind: ErrorKind::Authentication,
        pattern: "Access token required",
        description: "Authentication failures preventing API access",
        resolution: "Verify JWT token generation and validation",
        prevention_strategy: "Implement token refresh and validation middleware",
        severity: Severity::High,
        frequency: 0,
    },
];

/// Seed definitions in registration order.
pub fn seed_definitions() -> impl Iterator<Item = PatternDefinition> {
    SEED_PATTERNS.iter().map(SeedPattern::to_definition)
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;
    use std::collections::HashMap;

    #[test]
    fn every_seed_compiles() {
        for seed in SEED_PATTERNS {
            assert!(
                Regex::new(seed.pattern).is_ok(),
                "seed {:?} does not compile",
                seed.pattern
            );
        }
    }

    #[test]
    fn seed_list_has_exactly_one_duplicate_key() {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for def in seed_definitions() {
            *counts.entry(def.key()).or_default() += 1;
        }
        let dupes: Vec<_> = counts.iter().filter(|(_, n)| **n > 1).collect();
        assert_eq!(dupes.len(), 1);
        assert_eq!(dupes[0].0, "api_Unexpected token.*is not valid JSON");
        assert_eq!(SEED_PATTERNS.len(), 20);
        assert_eq!(counts.len(), 19);
    }
}
