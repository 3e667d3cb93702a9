//! CLI command that runs the periodic jobs in the foreground.

use crate::daemon::{self, SharedScanner};
use crate::exit_codes::ExitCode;
use crate::output;
use crate::registry::{self, record_failure, ErrorPatternRegistry, SharedRegistry};
use crate::scanner::ProactiveFileScanner;
use clap::Args;
use ew_common::OutputFormat;
use ew_config::Settings;
use std::io::BufRead;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Arguments for the daemon command
#[derive(Args, Debug)]
pub struct DaemonArgs {
    /// Stop after this many seconds (default: run until stdin closes).
    ///
    /// Each non-empty stdin line is recorded as an application error.
    #[arg(long, value_name = "SECS")]
    pub run_for_secs: Option<u64>,
}

const POLL: Duration = Duration::from_millis(200);

/// Context label for errors fed through stdin.
pub const STDIN_CONTEXT: &str = "stdin";

pub fn run_daemon(format: &OutputFormat, settings: &Settings, args: &DaemonArgs) -> ExitCode {
    let registry = match ErrorPatternRegistry::from_settings(&settings.registry) {
        Ok(r) => registry::share(r),
        Err(e) => return output::fail("daemon", &e),
    };
    let scanner: SharedScanner = match ProactiveFileScanner::from_settings(&settings.scanner) {
        Ok(s) => Arc::new(Mutex::new(s)),
        Err(e) => return output::fail("daemon", &e),
    };

    let scheduler =
        match daemon::start_default_jobs(&settings.schedule, Arc::clone(&registry), scanner) {
            Ok(s) => s,
            Err(e) => return output::fail("daemon", &e),
        };

    let started = Instant::now();
    let recorded = match args.run_for_secs {
        Some(secs) => {
            let feed = Arc::clone(&registry);
            // Detached: a terminal stdin may never reach EOF.
            std::thread::spawn(move || record_lines(std::io::stdin().lock(), &feed, STDIN_CONTEXT));
            let deadline = Duration::from_secs(secs);
            while started.elapsed() < deadline {
                std::thread::sleep(POLL.min(deadline.saturating_sub(started.elapsed())));
            }
            None
        }
        None => Some(record_lines(std::io::stdin().lock(), &registry, STDIN_CONTEXT)),
    };

    info!(target: "daemon", elapsed_secs = started.elapsed().as_secs(), "shutting down");
    let runs: Vec<(String, u64)> = scheduler
        .job_names()
        .into_iter()
        .map(|name| (name.to_string(), scheduler.runs(name).unwrap_or(0)))
        .collect();
    scheduler.shutdown();

    let report = registry::shared::lock(&registry).health_report();
    match format {
        OutputFormat::Json => output::print_json(
            "daemon",
            serde_json::json!({
                "elapsed_secs": started.elapsed().as_secs(),
                "errors_recorded": recorded,
                "job_runs": runs.iter().map(|(n, r)| serde_json::json!({ "job": n, "runs": r })).collect::<Vec<_>>(),
                "health": report,
            }),
        ),
        OutputFormat::Summary => {
            for (name, count) in &runs {
                println!("{name}: {count} runs");
            }
            if let Some(n) = recorded {
                println!("{n} errors recorded from stdin");
            }
            println!("uptime {:.0}%", report.uptime);
        }
    }
    ExitCode::Clean
}

/// Record every non-empty line of `reader` until EOF. Returns the number recorded.
pub fn record_lines(reader: impl BufRead, registry: &SharedRegistry, context: &str) -> usize {
    let mut recorded = 0;
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!(target: "daemon", error = %e, "stopped reading error feed");
                break;
            }
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        record_failure(registry, &line, context);
        recorded += 1;
    }
    debug!(target: "daemon", recorded, "error feed closed");
    recorded
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn fed_lines_reach_the_shared_registry() {
        let shared = registry::share(ErrorPatternRegistry::with_defaults().unwrap());
        let feed = Cursor::new("column \"venue_id\" does not exist\n\n  CheckCircle is not defined  \nmystery\n");
        assert_eq!(record_lines(feed, &shared, STDIN_CONTEXT), 3);

        let guard = registry::shared::lock(&shared);
        assert_eq!(guard.critical_log().count(), 2);
        assert!(guard.critical_log().all(|e| e.context == STDIN_CONTEXT));
        assert_eq!(guard.len(), 20);
    }
}
