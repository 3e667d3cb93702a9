//! Proactive file scanner.
//!
//! Greps a fixed list of source files for disallowed idioms and keeps the
//! latest violations per file. Block-level violations are only reported;
//! nothing is halted, and the auto-fix pass proposes edits without writing
//! them.

pub mod rules;

pub use rules::{builtin_rules, ProactiveRule};

use ew_common::{Error, Result, RuleAction};
use ew_config::ScannerSettings;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// One rule hit in one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub rule_id: String,
    pub description: String,
    pub action: RuleAction,
    pub autofix: bool,
    pub file: PathBuf,
    /// 1-based line of the rule's first match.
    pub line: usize,
}

/// Outcome of one `scan_project` pass.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanSummary {
    pub files_scanned: usize,
    pub files_with_violations: usize,
    pub violations: usize,
    pub blocking: usize,
    /// Files that could not be read, with the reason.
    pub errors: Vec<ScanFailure>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScanFailure {
    pub file: PathBuf,
    pub reason: String,
}

/// An edit the auto-fix pass would make.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProposedFix {
    pub file: PathBuf,
    pub line: usize,
    pub rule_id: String,
    pub replacement: String,
}

/// Result of `auto_fix_violations`. Always a dry run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AutoFixOutcome {
    pub fixable: usize,
    pub proposed: Vec<ProposedFix>,
    pub applied: bool,
}

/// Aggregate over the current results map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ViolationReport {
    pub total_files: usize,
    pub total_violations: usize,
    pub violations_by_type: BTreeMap<String, usize>,
    pub critical_blocks: usize,
}

/// 1-based line number of a byte offset.
fn line_of(content: &str, offset: usize) -> usize {
    content[..offset].matches('\n').count() + 1
}

#[derive(Debug)]
pub struct ProactiveFileScanner {
    rules: Vec<ProactiveRule>,
    root: PathBuf,
    files: Vec<PathBuf>,
    results: BTreeMap<PathBuf, Vec<Violation>>,
}

impl ProactiveFileScanner {
    /// Scanner over `files`, resolved against `root`, with the given rules.
    pub fn new(rules: Vec<ProactiveRule>, root: impl Into<PathBuf>, files: Vec<PathBuf>) -> Self {
        let root = root.into();
        info!(
            target: "scanner.init",
            rules = rules.len(),
            files = files.len(),
            root = %root.display(),
            "proactive scanner initialized"
        );
        Self {
            rules,
            root,
            files,
            results: BTreeMap::new(),
        }
    }

    /// Build from settings. The root defaults to the working directory.
    pub fn from_settings(settings: &ScannerSettings) -> Result<Self> {
        let rules = builtin_rules(&settings.disabled_rules)?;
        let root = match &settings.root {
            Some(root) => root.clone(),
            None => std::env::current_dir()?,
        };
        Ok(Self::new(rules, root, settings.files.clone()))
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    /// Test every rule against one file.
    ///
    /// Each rule contributes at most one violation, located at its first
    /// match. A file that does not exist has no violations; any other read
    /// failure is an error. Invalid UTF-8 is replaced, not rejected.
    pub fn scan_file_for_violations(&self, path: &Path) -> Result<Vec<Violation>> {
        let full = self.resolve(path);
        let bytes = match std::fs::read(&full) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(target: "scanner.scan", file = %full.display(), "file missing, skipped");
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(Error::Scan {
                    path: full,
                    reason: e.to_string(),
                })
            }
        };
        let content = String::from_utf8_lossy(&bytes);

        Ok(self
            .rules
            .iter()
            .filter_map(|rule| {
                rule.first_match(&content).map(|offset| Violation {
                    rule_id: rule.id.to_string(),
                    description: rule.description.to_string(),
                    action: rule.action,
                    autofix: rule.autofix,
                    file: path.to_path_buf(),
                    line: line_of(&content, offset),
                })
            })
            .collect())
    }

    /// Scan every configured file and refresh the results map.
    pub fn scan_project(&mut self) -> ScanSummary {
        info!(target: "scanner.scan", files = self.files.len(), "proactive scan starting");
        let mut summary = ScanSummary::default();

        for file in self.files.clone() {
            summary.files_scanned += 1;
            let violations = match self.scan_file_for_violations(&file) {
                Ok(v) => v,
                Err(e) => {
                    error!(target: "scanner.scan", file = %file.display(), error = %e, "scan failed");
                    summary.errors.push(ScanFailure {
                        file,
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            if violations.is_empty() {
                self.results.remove(&file);
                continue;
            }

            warn!(
                target: "scanner.scan",
                file = %file.display(),
                count = violations.len(),
                "violations found"
            );
            for v in violations.iter().filter(|v| v.action == RuleAction::Block) {
                error!(
                    target: "scanner.scan",
                    rule = %v.rule_id,
                    file = %file.display(),
                    line = v.line,
                    "BLOCKING: {}",
                    v.description
                );
                summary.blocking += 1;
            }
            summary.files_with_violations += 1;
            summary.violations += violations.len();
            self.results.insert(file, violations);
        }

        info!(
            target: "scanner.scan",
            violations = summary.violations,
            blocking = summary.blocking,
            "proactive scan completed"
        );
        summary
    }

    /// Collect the edits fixable violations would receive. Writes nothing.
    pub fn auto_fix_violations(&self) -> AutoFixOutcome {
        let mut outcome = AutoFixOutcome::default();
        for (file, violations) in &self.results {
            for v in violations.iter().filter(|v| v.autofix) {
                let replacement = self
                    .rules
                    .iter()
                    .find(|r| r.id == v.rule_id)
                    .and_then(|r| r.replacement);
                if let Some(replacement) = replacement {
                    outcome.fixable += 1;
                    outcome.proposed.push(ProposedFix {
                        file: file.clone(),
                        line: v.line,
                        rule_id: v.rule_id.clone(),
                        replacement: replacement.to_string(),
                    });
                }
            }
        }
        info!(
            target: "scanner.autofix",
            fixable = outcome.fixable,
            "auto-fix pass completed (dry run)"
        );
        outcome
    }

    pub fn violation_report(&self) -> ViolationReport {
        let mut report = ViolationReport {
            total_files: self.results.len(),
            ..Default::default()
        };
        for v in self.results.values().flatten() {
            report.total_violations += 1;
            *report.violations_by_type.entry(v.rule_id.clone()).or_default() += 1;
            if v.action == RuleAction::Block {
                report.critical_blocks += 1;
            }
        }
        report
    }

    /// Latest violations, keyed by configured path.
    pub fn results(&self) -> &BTreeMap<PathBuf, Vec<Violation>> {
        &self.results
    }

    pub fn rules(&self) -> &[ProactiveRule] {
        &self.rules
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn scanner(dir: &TempDir, files: &[&str]) -> ProactiveFileScanner {
        ProactiveFileScanner::new(
            builtin_rules(&[]).unwrap(),
            dir.path(),
            files.iter().map(PathBuf::from).collect(),
        )
    }

    #[test]
    fn line_numbers_are_one_based() {
        assert_eq!(line_of("abc", 0), 1);
        assert_eq!(line_of("a\nb\nc", 4), 3);
    }

    #[test]
    fn missing_file_has_no_violations() {
        let dir = TempDir::new().unwrap();
        let s = scanner(&dir, &[]);
        assert!(s
            .scan_file_for_violations(Path::new("nope.tsx"))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn one_violation_per_rule_at_first_match() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("Panel.tsx"),
            "import x from 'y';\nconsole.log('a');\nconsole.log('b');\nconsole.log('c');\n",
        )
        .unwrap();
        let s = scanner(&dir, &[]);
        let v = s.scan_file_for_violations(Path::new("Panel.tsx")).unwrap();
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].rule_id, "console_logs");
        assert_eq!(v[0].line, 2);
        assert_eq!(v[0].file, PathBuf::from("Panel.tsx"));
        assert!(v[0].autofix);
    }

    #[test]
    fn invalid_utf8_is_still_scanned() {
        let dir = TempDir::new().unwrap();
        let mut bytes = b"const label = '\xff\xfe';\n".to_vec();
        bytes.extend_from_slice(b"console.log(label);\n");
        fs::write(dir.path().join("Legacy.tsx"), bytes).unwrap();
        let s = scanner(&dir, &[]);
        let v = s.scan_file_for_violations(Path::new("Legacy.tsx")).unwrap();
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].rule_id, "console_logs");
        assert_eq!(v[0].line, 2);
    }

    #[test]
    fn placeholder_handler_and_double_stringify_are_detected() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("B.tsx"),
            "<Button onClick={() => { console.log(\"x\") }} />\nconst s = JSON.stringify(JSON.stringify(x));\n",
        )
        .unwrap();
        let s = scanner(&dir, &[]);
        let v = s.scan_file_for_violations(Path::new("B.tsx")).unwrap();
        let placeholder = v.iter().find(|v| v.rule_id == "placeholder_onclick").unwrap();
        assert_eq!(placeholder.action, RuleAction::Block);
        assert_eq!(placeholder.line, 1);
        let stringify = v.iter().find(|v| v.rule_id == "double_stringify").unwrap();
        assert!(stringify.autofix);
        assert_eq!(stringify.line, 2);
    }

    #[test]
    fn directory_in_place_of_file_is_a_scan_error() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("Panel.tsx")).unwrap();
        let s = scanner(&dir, &[]);
        let err = s
            .scan_file_for_violations(Path::new("Panel.tsx"))
            .unwrap_err();
        assert_eq!(err.code(), 30);
    }

    #[test]
    fn scan_project_records_and_clears_results() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Dash.tsx");
        fs::write(
            &path,
            "<b onClick={() => { alert('todo') }} />\n// TODO: remove\nconst body = JSON.stringify(JSON.stringify(x));\n",
        )
        .unwrap();
        let mut s = scanner(&dir, &["Dash.tsx", "Missing.tsx"]);

        let summary = s.scan_project();
        assert_eq!(summary.files_scanned, 2);
        assert_eq!(summary.files_with_violations, 1);
        assert_eq!(summary.violations, 3);
        assert_eq!(summary.blocking, 1);
        assert!(summary.errors.is_empty());

        let report = s.violation_report();
        assert_eq!(report.total_files, 1);
        assert_eq!(report.total_violations, 3);
        assert_eq!(report.critical_blocks, 1);
        assert_eq!(report.violations_by_type["todo_comments"], 1);

        fs::write(&path, "export const ok = true;\n").unwrap();
        s.scan_project();
        assert!(s.results().is_empty());
        assert_eq!(s.violation_report(), ViolationReport::default());
    }

    #[test]
    fn unreadable_file_does_not_stop_the_pass() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("Broken.tsx")).unwrap();
        fs::write(dir.path().join("Ok.tsx"), "console.log(1)\n").unwrap();
        let mut s = scanner(&dir, &["Broken.tsx", "Ok.tsx"]);
        let summary = s.scan_project();
        assert_eq!(summary.errors.len(), 1);
        assert_eq!(summary.violations, 1);
        assert!(s.results().contains_key(Path::new("Ok.tsx")));
    }

    #[test]
    fn auto_fix_is_a_dry_run_over_fixable_rules() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("A.tsx");
        let original = "console.log(1)\nJSON.stringify(JSON.stringify(v))\n// TODO\n";
        fs::write(&path, original).unwrap();
        let mut s = scanner(&dir, &["A.tsx"]);
        s.scan_project();

        let outcome = s.auto_fix_violations();
        assert_eq!(outcome.fixable, 2);
        assert!(!outcome.applied);
        let ids: Vec<_> = outcome.proposed.iter().map(|p| p.rule_id.as_str()).collect();
        assert_eq!(ids, vec!["double_stringify", "console_logs"]);
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
    }
}
