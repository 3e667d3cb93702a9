//! errwatch configuration loading and validation.
//!
//! This crate provides:
//! - Typed settings for the registry, scanner, scheduler and credit tracker
//! - Config resolution (CLI → env → XDG → defaults)
//! - Range checks and up-front compilation of configured patterns

pub mod resolve;
pub mod settings;
pub mod validate;

pub use resolve::{resolve_config, ConfigPaths, ConfigSource, ResolvedConfig};
pub use settings::{
    CreditSettings, PatternSpec, RegistrySettings, ScannerSettings, ScheduleSettings, Settings,
};
pub use validate::{ValidationError, ValidationResult};
