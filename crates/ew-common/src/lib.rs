//! errwatch common types, IDs, and errors.
//!
//! This crate provides foundational types shared across ew-core modules:
//! - Session and scan identifiers
//! - Schema versioning for JSON outputs
//! - Error kind, severity and rule action enums
//! - Common error types
//! - Output format specifications

pub mod error;
pub mod id;
pub mod kinds;
pub mod output;
pub mod schema;

pub use error::{Error, Result};
pub use id::{RunId, SessionId};
pub use kinds::{ErrorKind, RuleAction, Severity};
pub use output::OutputFormat;
pub use schema::SCHEMA_VERSION;
