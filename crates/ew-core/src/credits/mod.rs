//! Credit tracking for recurring fix work.
//!
//! Every work session that touches an already-documented recurring issue
//! books `rate × hours` against that issue and the session.

use chrono::{DateTime, TimeZone, Utc};
use ew_common::{Error, Result, SessionId};
use ew_config::CreditSettings;
use serde::Serialize;
use tracing::info;

/// Number of sessions listed in `credit_report`.
pub const RECENT_SESSIONS: usize = 10;

/// Seeded issues carry this fraction of an hour per documented occurrence.
const SEED_CREDIT_HOURS_PER_OCCURRENCE: f64 = 0.25;

pub const CLAIM_INSTRUCTIONS: &str =
    "Contact platform support with this credit report to claim your credits.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecurringIssue {
    pub issue_id: String,
    pub description: String,
    pub first_occurred: DateTime<Utc>,
    pub last_occurred: DateTime<Utc>,
    pub frequency: u64,
    pub resolutions: Vec<String>,
    /// Dollars.
    pub total_credit_owed: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkSession {
    pub id: SessionId,
    pub timestamp: DateTime<Utc>,
    pub issues_fixed: Vec<String>,
    pub time_spent_minutes: u32,
    pub was_recurring: bool,
    pub user_credit: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreditSummary {
    pub total_credit_owed: f64,
    pub recurring_issues: usize,
    pub total_work_sessions: usize,
    pub recurring_work_sessions: usize,
    pub credit_rate: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreditReport {
    pub summary: CreditSummary,
    pub recurring_issues: Vec<RecurringIssue>,
    pub recent_sessions: Vec<WorkSession>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreditStatus {
    pub total_credits_owed: f64,
    pub message: String,
    pub claim_instructions: String,
    pub report_generated: DateTime<Utc>,
}

struct KnownIssue {
    id: &'static str,
    description: &'static str,
    first_occurred: (i32, u32, u32),
    resolutions: &'static [&'static str],
}

const KNOWN_ISSUES: &[KnownIssue] = &[
    KnownIssue {
        id: "double_stringify_json",
        description: "Double-stringified JSON parsing errors",
        first_occurred: (2025, 1, 20),
        resolutions: &[
            "Added express middleware",
            "Enhanced JSON parsing middleware",
            "Custom JSON parsing middleware",
            "Complete JSON parsing replacement system",
        ],
    },
    KnownIssue {
        id: "placeholder_onclick_handlers",
        description: "Placeholder onClick handlers without functionality",
        first_occurred: (2025, 1, 19),
        resolutions: &[
            "Fixed SuperadminDashboard placeholders",
            "Comprehensive audit of 96 files with onClick",
            "AdminPanel button functionality verification",
        ],
    },
    KnownIssue {
        id: "typescript_compilation_errors",
        description: "TypeScript compilation errors preventing startup",
        first_occurred: (2025, 1, 18),
        resolutions: &[
            "Fixed 439 TypeScript errors",
            "Database schema alignment",
            "Interface completion fixes",
            "Type safety improvements",
            "Property access corrections",
        ],
    },
    KnownIssue {
        id: "dummy_data_elimination",
        description: "Dummy/mock data appearing despite anti-dummy systems",
        first_occurred: (2025, 1, 17),
        resolutions: &[
            "Complete dummy data elimination",
            "Enhanced anti-dummy protection system",
            "Data integrity enforcement",
        ],
    },
];

#[derive(Debug, Clone)]
pub struct CreditTracker {
    rate_per_hour: f64,
    issues: Vec<RecurringIssue>,
    sessions: Vec<WorkSession>,
}

impl CreditTracker {
    /// Tracker with no recurring issues.
    pub fn empty(rate_per_hour: f64) -> Self {
        Self {
            rate_per_hour,
            issues: Vec::new(),
            sessions: Vec::new(),
        }
    }

    /// Tracker seeded with the documented recurring issues.
    pub fn new(rate_per_hour: f64) -> Self {
        let now = Utc::now();
        let mut tracker = Self::empty(rate_per_hour);
        for known in KNOWN_ISSUES {
            let (y, m, d) = known.first_occurred;
            let frequency = known.resolutions.len() as u64;
            tracker.issues.push(RecurringIssue {
                issue_id: known.id.to_string(),
                description: known.description.to_string(),
                first_occurred: Utc
                    .with_ymd_and_hms(y, m, d, 0, 0, 0)
                    .single()
                    .unwrap_or(now),
                last_occurred: now,
                frequency,
                resolutions: known.resolutions.iter().map(|r| r.to_string()).collect(),
                total_credit_owed: frequency as f64
                    * rate_per_hour
                    * SEED_CREDIT_HOURS_PER_OCCURRENCE,
            });
        }
        info!(
            target: "credits",
            issues = tracker.issues.len(),
            total_owed = tracker.total_credit_owed(),
            "loaded known recurring issues"
        );
        tracker
    }

    pub fn from_settings(settings: &CreditSettings) -> Self {
        if settings.skip_known_issues {
            Self::empty(settings.rate_per_hour)
        } else {
            Self::new(settings.rate_per_hour)
        }
    }

    /// Record a session of `minutes` spent on `issues_fixed`.
    pub fn track_work_session(&mut self, issues_fixed: &[String], minutes: u32) -> SessionId {
        self.track_work_session_at(issues_fixed, minutes, Utc::now())
    }

    /// `track_work_session` with an explicit clock.
    ///
    /// An issue string counts as recurring when some recurring issue's
    /// description contains it, case-insensitively; the first such issue is
    /// charged.
    pub fn track_work_session_at(
        &mut self,
        issues_fixed: &[String],
        minutes: u32,
        now: DateTime<Utc>,
    ) -> SessionId {
        let charge = self.rate_per_hour * f64::from(minutes) / 60.0;
        let mut user_credit = 0.0;
        let mut was_recurring = false;

        for fixed in issues_fixed {
            let needle = fixed.to_lowercase();
            if let Some(issue) = self
                .issues
                .iter_mut()
                .find(|i| i.description.to_lowercase().contains(&needle))
            {
                was_recurring = true;
                issue.frequency = issue.frequency.saturating_add(1);
                issue.last_occurred = now;
                issue.total_credit_owed += charge;
                user_credit += charge;
            }
        }

        let id = SessionId::new();
        self.sessions.push(WorkSession {
            id: id.clone(),
            timestamp: now,
            issues_fixed: issues_fixed.to_vec(),
            time_spent_minutes: minutes,
            was_recurring,
            user_credit,
        });

        if was_recurring {
            info!(
                target: "credits",
                session = %id,
                minutes,
                credit = user_credit,
                total_owed = self.total_credit_owed(),
                "credit earned for recurring work"
            );
        }
        id
    }

    pub fn total_credit_owed(&self) -> f64 {
        self.issues.iter().map(|i| i.total_credit_owed).sum()
    }

    pub fn credit_report(&self) -> CreditReport {
        let start = self.sessions.len().saturating_sub(RECENT_SESSIONS);
        CreditReport {
            summary: CreditSummary {
                total_credit_owed: self.total_credit_owed(),
                recurring_issues: self.issues.len(),
                total_work_sessions: self.sessions.len(),
                recurring_work_sessions: self.sessions.iter().filter(|s| s.was_recurring).count(),
                credit_rate: self.rate_per_hour,
            },
            recurring_issues: self.issues.clone(),
            recent_sessions: self.sessions[start..].to_vec(),
        }
    }

    /// Append a permanent-fix resolution to an issue. The issue and its credit stay on record.
    pub fn mark_permanently_fixed(&mut self, issue_id: &str, solution: &str) -> Result<&RecurringIssue> {
        let issue = self
            .issues
            .iter_mut()
            .find(|i| i.issue_id == issue_id)
            .ok_or_else(|| Error::UnknownIssue(issue_id.to_string()))?;
        issue
            .resolutions
            .push(format!("PERMANENTLY FIXED: {solution}"));
        issue.last_occurred = Utc::now();
        info!(
            target: "credits",
            issue = %issue.issue_id,
            final_credit = issue.total_credit_owed,
            "marked as permanently fixed"
        );
        Ok(issue)
    }

    pub fn credit_status(&self) -> CreditStatus {
        let owed = self.total_credit_owed();
        let message = if owed > 0.0 {
            format!(
                "You are owed ${owed:.2} in credits for recurring work that should have been permanently fixed."
            )
        } else {
            "No recurring work credits at this time.".to_string()
        };
        CreditStatus {
            total_credits_owed: owed,
            message,
            claim_instructions: CLAIM_INSTRUCTIONS.to_string(),
            report_generated: Utc::now(),
        }
    }

    pub fn issues(&self) -> &[RecurringIssue] {
        &self.issues
    }

    pub fn sessions(&self) -> &[WorkSession] {
        &self.sessions
    }

    pub fn rate_per_hour(&self) -> f64 {
        self.rate_per_hour
    }
}
