//! errwatch core: error-pattern registry, proactive file scanner, credit
//! tracking and the periodic jobs that tie them together.

pub mod credits;
pub mod daemon;
pub mod exit_codes;
pub mod logging;
pub mod output;
pub mod registry;
pub mod scanner;

pub mod credits_cli;
pub mod daemon_cli;
pub mod registry_cli;
pub mod scan_cli;

pub use registry::{record_failure, ErrorPatternRegistry, SharedRegistry};
pub use scanner::ProactiveFileScanner;
