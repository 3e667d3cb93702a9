//! System diagnostics computed from the critical error log.

use super::types::CriticalEntry;
use chrono::{DateTime, Utc};
use ew_common::ErrorKind;
use serde::Serialize;

/// Lookback for trend analysis.
pub const TREND_WINDOW_HOURS: i64 = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentStatus {
    Healthy,
    NeedsAttention,
    Critical,
}

/// Score for one subsystem.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentHealth {
    pub score: u32,
    pub recent_errors: usize,
    pub status: ComponentStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Stable,
    Concerning,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorTrends {
    pub total: usize,
    pub last_24h: usize,
    pub trend: Trend,
}

/// Output of `ErrorPatternRegistry::diagnostics`.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostics {
    pub generated_at: DateTime<Utc>,
    pub database: ComponentHealth,
    pub json_parsing: ComponentHealth,
    pub connection_pool: ComponentHealth,
    pub trends: ErrorTrends,
    pub recommendations: Vec<String>,
}

fn score(count: usize, penalty: u32) -> u32 {
    100u32.saturating_sub(penalty.saturating_mul(count as u32))
}

fn mentions(entry: &CriticalEntry, needle: &str) -> bool {
    entry.description.to_lowercase().contains(needle)
        || entry.context.to_lowercase().contains(needle)
}

/// Evaluate the critical log at `now`.
pub fn evaluate(log: &[CriticalEntry], now: DateTime<Utc>) -> Diagnostics {
    let cutoff = now - chrono::Duration::hours(TREND_WINDOW_HOURS);
    let recent: Vec<&CriticalEntry> = log.iter().filter(|e| e.at > cutoff).collect();

    let db_errors = recent
        .iter()
        .filter(|e| e.kind == ErrorKind::Database || mentions(e, "database"))
        .count();
    let database = ComponentHealth {
        score: score(db_errors, 10),
        recent_errors: db_errors,
        status: if db_errors == 0 {
            ComponentStatus::Healthy
        } else {
            ComponentStatus::NeedsAttention
        },
    };

    let json_errors = log.iter().filter(|e| mentions(e, "json")).count();
    let json_parsing = ComponentHealth {
        score: score(json_errors, 15),
        recent_errors: json_errors,
        status: if json_errors == 0 {
            ComponentStatus::Healthy
        } else {
            ComponentStatus::NeedsAttention
        },
    };

    let pool_errors = log
        .iter()
        .filter(|e| mentions(e, "connection") || mentions(e, "pool"))
        .count();
    let connection_pool = ComponentHealth {
        score: score(pool_errors, 20),
        recent_errors: pool_errors,
        status: if pool_errors == 0 {
            ComponentStatus::Healthy
        } else {
            ComponentStatus::Critical
        },
    };

    let trends = ErrorTrends {
        total: log.len(),
        last_24h: recent.len(),
        trend: if recent.is_empty() {
            Trend::Stable
        } else {
            Trend::Concerning
        },
    };

    let mut recommendations = Vec::new();
    if database.score < 90 {
        recommendations.push(
            "Database optimization required - consider connection pooling improvements"
                .to_string(),
        );
    }
    if connection_pool.status == ComponentStatus::Critical {
        recommendations
            .push("Connection failures logged - review pool limits and retry logic".to_string());
    }
    if trends.last_24h > 0 {
        recommendations
            .push("Critical errors detected - immediate attention required".to_string());
    }

    Diagnostics {
        generated_at: now,
        database,
        json_parsing,
        connection_pool,
        trends,
        recommendations,
    }
}
