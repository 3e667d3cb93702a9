//! errwatch command-line entry point.

use clap::{Parser, Subcommand};
use ew_common::OutputFormat;
use ew_config::{resolve_config, ConfigPaths, Settings};
use ew_core::credits_cli::{run_credits, CreditsArgs};
use ew_core::daemon_cli::{run_daemon, DaemonArgs};
use ew_core::exit_codes::ExitCode;
use ew_core::logging::{init_logging, LogFormat};
use ew_core::registry_cli::{run_classify, run_health, run_patterns, ClassifyArgs, PatternsArgs};
use ew_core::scan_cli::{run_scan, ScanArgs};
use std::path::PathBuf;
use tracing::debug;

/// Error-pattern registry, proactive scanner and credit tracking for a web backend.
#[derive(Parser, Debug)]
#[command(name = "errwatch", version, about)]
struct Cli {
    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Summary)]
    format: OutputFormat,

    /// Settings file (TOML or JSON); overrides ERRWATCH_CONFIG and the XDG default
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Log line format on stderr
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Classify error messages against the pattern table
    Classify(ClassifyArgs),
    /// Inspect the pattern table
    Patterns(PatternsArgs),
    /// Health report and diagnostics
    Health,
    /// Scan source files for disallowed idioms
    Scan(ScanArgs),
    /// Recurring-work credit tracking
    Credits(CreditsArgs),
    /// Run the periodic jobs in the foreground
    Daemon(DaemonArgs),
}

fn load_settings(cli: &Cli) -> Result<Settings, ExitCode> {
    match resolve_config(&ConfigPaths::from_env(cli.config.clone())) {
        Ok(resolved) => {
            debug!(target: "config", source = ?resolved.source, "settings resolved");
            Ok(resolved.settings)
        }
        Err(e) => {
            eprintln!("errwatch: configuration error: {e}");
            Err(ExitCode::ConfigError)
        }
    }
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.verbose, cli.quiet);

    let settings = match load_settings(&cli) {
        Ok(s) => s,
        Err(code) => return code.into(),
    };

    let code = match &cli.command {
        Commands::Classify(args) => run_classify(&cli.format, &settings, args),
        Commands::Patterns(args) => run_patterns(&cli.format, &settings, args),
        Commands::Health => run_health(&cli.format, &settings),
        Commands::Scan(args) => run_scan(&cli.format, &settings, args),
        Commands::Credits(args) => run_credits(&cli.format, &settings, args),
        Commands::Daemon(args) => run_daemon(&cli.format, &settings, args),
    };
    code.into()
}
