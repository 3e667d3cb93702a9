//! Handle for sharing one registry between error handlers and periodic jobs.

use super::ErrorPatternRegistry;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// The registry as held by long-lived services.
pub type SharedRegistry = Arc<Mutex<ErrorPatternRegistry>>;

/// Wrap a registry for sharing.
pub fn share(registry: ErrorPatternRegistry) -> SharedRegistry {
    Arc::new(Mutex::new(registry))
}

/// Lock the registry, recovering from a poisoned lock.
///
/// The registry holds only counters and logs, so state left behind by a
/// panicking holder is still usable.
pub fn lock(registry: &SharedRegistry) -> MutexGuard<'_, ErrorPatternRegistry> {
    registry.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Entry point for error handlers. Never fails and never panics on a poisoned lock.
pub fn record_failure(registry: &SharedRegistry, error: &dyn fmt::Display, context: &str) -> bool {
    lock(registry).learn_from_error(error, context)
}
