//! CLI commands backed by the error-pattern registry: classify, patterns, health.

use crate::exit_codes::ExitCode;
use crate::output;
use crate::registry::{ErrorPatternRegistry, LearnOutcome};
use chrono::Utc;
use clap::{Args, Subcommand};
use ew_common::{OutputFormat, Result};
use ew_config::Settings;
use serde::Serialize;
use std::path::PathBuf;

/// Arguments for the classify command
#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// Error messages to classify, in order
    #[arg(value_name = "TEXT")]
    pub errors: Vec<String>,
    /// Where the errors were raised (route, job name, ...)
    #[arg(long, default_value = "cli")]
    pub context: String,
    /// Read additional errors from a file, one per non-empty line
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,
}

/// Arguments for the patterns command
#[derive(Args, Debug)]
pub struct PatternsArgs {
    #[command(subcommand)]
    pub command: PatternsCommands,
}

#[derive(Subcommand, Debug)]
pub enum PatternsCommands {
    /// List the pattern table in match order
    List {
        /// Only show critical patterns
        #[arg(long)]
        critical_only: bool,
    },
    /// Show duplicate keys found while loading the seed list and configuration
    Conflicts,
}

fn build_registry(settings: &Settings) -> Result<ErrorPatternRegistry> {
    ErrorPatternRegistry::from_settings(&settings.registry)
}

fn collect_errors(args: &ClassifyArgs) -> Result<Vec<String>> {
    let mut errors = args.errors.clone();
    if let Some(path) = &args.file {
        let text = std::fs::read_to_string(path)?;
        errors.extend(
            text.lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_string),
        );
    }
    Ok(errors)
}

#[derive(Serialize)]
struct ClassifyOutput<'a> {
    context: &'a str,
    results: Vec<ClassifiedError>,
    health: crate::registry::HealthReport,
}

#[derive(Serialize)]
struct ClassifiedError {
    error: String,
    #[serde(flatten)]
    outcome: LearnOutcome,
}

pub fn run_classify(format: &OutputFormat, settings: &Settings, args: &ClassifyArgs) -> ExitCode {
    let errors = match collect_errors(args) {
        Ok(e) => e,
        Err(e) => return output::fail("classify", &e),
    };
    if errors.is_empty() {
        eprintln!("errwatch classify: no error text given (pass TEXT or --file)");
        return ExitCode::ArgsError;
    }
    let mut registry = match build_registry(settings) {
        Ok(r) => r,
        Err(e) => return output::fail("classify", &e),
    };

    let results: Vec<ClassifiedError> = errors
        .into_iter()
        .map(|error| {
            let outcome = registry.classify(&error, &args.context);
            ClassifiedError { error, outcome }
        })
        .collect();

    match format {
        OutputFormat::Json => output::print_json(
            "classify",
            ClassifyOutput {
                context: &args.context,
                results,
                health: registry.health_report(),
            },
        ),
        OutputFormat::Summary => {
            for r in &results {
                match &r.outcome {
                    LearnOutcome::Matched {
                        key,
                        severity,
                        resolution,
                        emergency,
                        ..
                    } => {
                        println!("[{severity}] {key}");
                        println!("  resolution: {resolution}");
                        if let Some(fix) = emergency.as_ref().and_then(|e| e.schema_fix.as_ref()) {
                            println!("  schema fix: {}", fix.summary());
                        }
                    }
                    LearnOutcome::Learned { key, kind, .. } => {
                        println!("[new/{kind}] {key}");
                    }
                }
            }
            let health = registry.health_report();
            println!();
            println!(
                "uptime {:.0}%  critical in window: {}  patterns: {}",
                health.uptime, health.error_rate, health.total_error_patterns
            );
        }
    }
    ExitCode::Clean
}

pub fn run_patterns(format: &OutputFormat, settings: &Settings, args: &PatternsArgs) -> ExitCode {
    let registry = match build_registry(settings) {
        Ok(r) => r,
        Err(e) => return output::fail("patterns", &e),
    };
    match &args.command {
        PatternsCommands::List { critical_only } => {
            let patterns: Vec<_> = registry
                .patterns()
                .iter()
                .filter(|p| !critical_only || p.severity.is_critical())
                .collect();
            match format {
                OutputFormat::Json => output::print_json(
                    "patterns list",
                    serde_json::json!({ "count": patterns.len(), "patterns": patterns }),
                ),
                OutputFormat::Summary => {
                    println!("# Error patterns ({} total)", patterns.len());
                    println!();
                    for p in &patterns {
                        println!(
                            "  {:<8} {:<14} {:<8} {}",
                            p.severity.as_str(),
                            p.kind.as_str(),
                            p.frequency,
                            p.matcher.source()
                        );
                    }
                }
            }
        }
        PatternsCommands::Conflicts => {
            let conflicts = registry.seed_conflicts();
            match format {
                OutputFormat::Json => output::print_json(
                    "patterns conflicts",
                    serde_json::json!({ "count": conflicts.len(), "conflicts": conflicts }),
                ),
                OutputFormat::Summary => {
                    if conflicts.is_empty() {
                        println!("No duplicate pattern keys.");
                    }
                    for c in conflicts {
                        println!(
                            "{} (position {}): {} -> {}",
                            c.key, c.position, c.replaced_severity, c.kept_severity
                        );
                    }
                }
            }
        }
    }
    ExitCode::Clean
}

pub fn run_health(format: &OutputFormat, settings: &Settings) -> ExitCode {
    let registry = match build_registry(settings) {
        Ok(r) => r,
        Err(e) => return output::fail("health", &e),
    };
    let now = Utc::now();
    let report = registry.health_report_at(now);
    let diagnostics = registry.diagnostics(now);

    match format {
        OutputFormat::Json => output::print_json(
            "health",
            serde_json::json!({ "report": report, "diagnostics": diagnostics }),
        ),
        OutputFormat::Summary => {
            println!("# Site health");
            println!();
            println!("  uptime:            {:.0}%", report.uptime);
            println!("  error rate:        {}", report.error_rate);
            println!("  patterns:          {}", report.total_error_patterns);
            println!("  critical (1h):     {}", report.critical_errors_last_hour);
            println!("  top error types:");
            for t in &report.top_error_types {
                println!("    {:<14} {}", t.kind.as_str(), t.frequency);
            }
            println!("  prevention:");
            for s in &report.prevention_strategies {
                println!("    - {s}");
            }
            println!();
            println!(
                "  database {}  json {}  pool {}",
                diagnostics.database.score,
                diagnostics.json_parsing.score,
                diagnostics.connection_pool.score
            );
            for r in &diagnostics.recommendations {
                println!("  ! {r}");
            }
        }
    }
    ExitCode::Clean
}
