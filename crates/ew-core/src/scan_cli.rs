//! CLI command for one proactive scan pass.

use crate::exit_codes::ExitCode;
use crate::output;
use crate::scanner::{ProactiveFileScanner, ScanSummary};
use clap::Args;
use ew_common::OutputFormat;
use ew_config::Settings;
use std::path::PathBuf;

/// Arguments for the scan command
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Directory the file list is resolved against (default: configured root or cwd)
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,
    /// Rule ids to skip, in addition to configured ones
    #[arg(long = "disable", value_name = "RULE")]
    pub disable: Vec<String>,
    /// Files to scan instead of the configured list
    #[arg(value_name = "FILES")]
    pub files: Vec<PathBuf>,
}

fn scanner_for(settings: &Settings, args: &ScanArgs) -> ew_common::Result<ProactiveFileScanner> {
    let mut scanner = settings.scanner.clone();
    if let Some(root) = &args.root {
        scanner.root = Some(root.clone());
    }
    if !args.files.is_empty() {
        scanner.files = args.files.clone();
    }
    scanner.disabled_rules.extend(args.disable.iter().cloned());
    ProactiveFileScanner::from_settings(&scanner)
}

/// Exit code for a finished pass.
///
/// Read failures only decide the code when no violation was found.
pub fn exit_for(summary: &ScanSummary) -> ExitCode {
    if summary.blocking > 0 {
        ExitCode::Blocked
    } else if summary.violations > 0 {
        ExitCode::ViolationsFound
    } else if !summary.errors.is_empty() {
        ExitCode::ScanError
    } else {
        ExitCode::Clean
    }
}

pub fn run_scan(format: &OutputFormat, settings: &Settings, args: &ScanArgs) -> ExitCode {
    let mut scanner = match scanner_for(settings, args) {
        Ok(s) => s,
        Err(e) => return output::fail("scan", &e),
    };

    let summary = scanner.scan_project();
    let fixes = scanner.auto_fix_violations();
    let report = scanner.violation_report();

    match format {
        OutputFormat::Json => output::print_json(
            "scan",
            serde_json::json!({
                "root": scanner.root(),
                "summary": summary,
                "report": report,
                "violations": scanner.results().values().flatten().collect::<Vec<_>>(),
                "auto_fix": fixes,
            }),
        ),
        OutputFormat::Summary => {
            for v in scanner.results().values().flatten() {
                println!(
                    "{}:{}: [{}] {} ({})",
                    v.file.display(),
                    v.line,
                    v.action,
                    v.description,
                    v.rule_id
                );
            }
            for f in &summary.errors {
                println!("{}: scan failed: {}", f.file.display(), f.reason);
            }
            println!();
            println!(
                "{} files scanned, {} violations in {} files, {} blocking, {} auto-fixable (not applied)",
                summary.files_scanned,
                summary.violations,
                summary.files_with_violations,
                summary.blocking,
                fixes.fixable
            );
        }
    }

    exit_for(&summary)
}
