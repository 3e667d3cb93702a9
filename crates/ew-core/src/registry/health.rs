//! Health heuristics derived from the pattern table.

use super::types::ErrorPattern;
use chrono::{DateTime, Utc};
use ew_common::ErrorKind;
use serde::Serialize;

/// Each critical pattern that matched inside the window costs this many points.
pub const UPTIME_PENALTY_PER_CRITICAL: f64 = 10.0;

/// Number of kinds reported in `top_error_types`.
pub const TOP_ERROR_TYPES: usize = 3;

/// Cap on reported prevention strategies.
pub const MAX_PREVENTION_STRATEGIES: usize = 5;

/// Snapshot written by the periodic health refresh.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthMetrics {
    pub uptime: f64,
    pub error_rate: u64,
    pub last_health_check: DateTime<Utc>,
}

/// Kind plus summed frequency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KindCount {
    pub kind: ErrorKind,
    pub frequency: u64,
}

/// Full health report.
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub generated_at: DateTime<Utc>,
    /// Percentage in `[0, 100]`.
    pub uptime: f64,
    /// Critical patterns matched inside the window.
    pub error_rate: u64,
    /// Time of the last periodic refresh, if one has run.
    pub last_health_check: Option<DateTime<Utc>>,
    pub total_error_patterns: usize,
    pub critical_errors_last_hour: usize,
    pub top_error_types: Vec<KindCount>,
    pub prevention_strategies: Vec<String>,
}

/// Count critical patterns that matched in the trailing window.
pub fn recent_critical_count(
    patterns: &[ErrorPattern],
    now: DateTime<Utc>,
    window: chrono::Duration,
) -> u64 {
    patterns
        .iter()
        .filter(|p| p.critical_within(now, window))
        .count() as u64
}

/// `100 - 10 × recent`, clamped to `[0, 100]`.
pub fn uptime_for(recent_critical: u64) -> f64 {
    (100.0 - UPTIME_PENALTY_PER_CRITICAL * recent_critical as f64).clamp(0.0, 100.0)
}

/// Kinds ordered by summed frequency, highest first; ties keep first appearance.
pub fn top_error_types(patterns: &[ErrorPattern], limit: usize) -> Vec<KindCount> {
    let mut totals: Vec<KindCount> = Vec::new();
    for p in patterns {
        match totals.iter_mut().find(|t| t.kind == p.kind) {
            Some(t) => t.frequency = t.frequency.saturating_add(p.frequency),
            None => totals.push(KindCount {
                kind: p.kind,
                frequency: p.frequency,
            }),
        }
    }
    // Stable sort keeps insertion order among equal totals.
    totals.sort_by(|a, b| b.frequency.cmp(&a.frequency));
    totals.truncate(limit);
    totals
}

/// Distinct prevention strategies of high and critical patterns, in table order.
pub fn prevention_strategies(patterns: &[ErrorPattern], limit: usize) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for p in patterns.iter().filter(|p| p.severity.is_elevated()) {
        if out.len() == limit {
            break;
        }
        if !out.iter().any(|s| s == &p.prevention_strategy) {
            out.push(p.prevention_strategy.clone());
        }
    }
    out
}
