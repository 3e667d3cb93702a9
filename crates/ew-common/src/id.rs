//! Session and run identity types.

use serde::{Deserialize, Serialize};
use std::fmt;

fn short_random() -> String {
    uuid::Uuid::new_v4()
        .simple()
        .to_string()
        .chars()
        .take(6)
        .collect()
}

/// Session ID for tracked work sessions.
///
/// Format: `sess-<date>-<time>-<random>`
/// Example: `sess-20260115-143022-abc123`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub String);

impl SessionId {
    /// Generate a new session ID.
    pub fn new() -> Self {
        let now = chrono::Utc::now();
        SessionId(format!(
            "sess-{}-{}",
            now.format("%Y%m%d-%H%M%S"),
            short_random()
        ))
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier stamped on every CLI invocation and daemon tick report.
///
/// Format: `run-<date>-<time>-<random>`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(pub String);

impl RunId {
    pub fn new() -> Self {
        let now = chrono::Utc::now();
        RunId(format!(
            "run-{}-{}",
            now.format("%Y%m%d-%H%M%S"),
            short_random()
        ))
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_id_format() {
        let sid = SessionId::new();
        assert!(sid.0.starts_with("sess-"));
        assert!(sid.0.len() > 20);
        assert_eq!(sid.0.matches('-').count(), 3);
    }

    #[test]
    fn test_run_ids_are_unique() {
        let a = RunId::new();
        let b = RunId::new();
        assert!(a.0.starts_with("run-"));
        assert_ne!(a, b);
    }
}
