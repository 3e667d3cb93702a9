//! Schema versioning for JSON reports and settings files.

/// Current schema version for all JSON outputs.
///
/// Follows semver: MAJOR.MINOR.PATCH. Only the major component gates
/// compatibility; new optional fields bump MINOR.
pub const SCHEMA_VERSION: &str = "1.0.0";

fn major_of(version: &str) -> Option<u32> {
    version.trim().split('.').next()?.parse().ok()
}

/// Whether a settings file or report written at `version` can be read by this build.
pub fn is_compatible(version: &str) -> bool {
    match (major_of(SCHEMA_VERSION), major_of(version)) {
        (Some(ours), Some(theirs)) => ours == theirs,
        _ => false,
    }
}
