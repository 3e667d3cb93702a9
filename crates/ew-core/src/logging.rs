//! Tracing subscriber setup for the errwatch binary.

use clap::ValueEnum;
use std::sync::Once;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Shape of log lines on stderr.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Default filter directive for a verbosity level.
///
/// `quiet` wins over `verbose`. `RUST_LOG` overrides both.
pub fn default_directive(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. Later calls are no-ops.
pub fn init_logging(format: LogFormat, verbose: u8, quiet: bool) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, quiet)));
        let registry = tracing_subscriber::registry().with(filter);
        // A subscriber installed elsewhere (tests, embedding) is left in place.
        let _ = match format {
            LogFormat::Text => registry
                .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
                .try_init(),
            LogFormat::Json => registry
                .with(
                    fmt::layer()
                        .json()
                        .with_writer(std::io::stderr)
                        .with_current_span(false),
                )
                .try_init(),
        };
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_overrides_verbose() {
        assert_eq!(default_directive(3, true), "error");
        assert_eq!(default_directive(0, false), "warn");
        assert_eq!(default_directive(2, false), "debug");
        assert_eq!(default_directive(9, false), "trace");
    }

    #[test]
    fn init_is_idempotent() {
        init_logging(LogFormat::Text, 0, true);
        init_logging(LogFormat::Json, 2, false);
    }
}
