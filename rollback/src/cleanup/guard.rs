//! Scope guards that run cleanup on every exit path.
//!
//! Rust has no `defer`; the "always runs at scope exit" guarantee comes from a
//! guard object whose `Drop` performs the cleanup. Both guards here are armed
//! from construction and must be explicitly disarmed on the success path.

use crate::cleanup::registry::CleanupRegistry;
use std::ops::{Deref, DerefMut};
use tracing::{debug, warn};

/// Owns a [`CleanupRegistry`] and runs it when dropped.
///
/// Dropping the guard on any exit path of the enclosing function (early error
/// return, normal return, panic unwind) runs every pending release action.
/// Call [`disarm`](Self::disarm) once the whole acquisition sequence has
/// succeeded to make the drop a no-op.
///
/// The guard derefs to its registry, so call sites register through it
/// directly.
#[derive(Debug, Default)]
pub struct CleanupGuard {
    registry: CleanupRegistry,
}

impl CleanupGuard {
    /// Creates a guard with a fresh, empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an already-populated registry.
    #[must_use]
    pub fn from_registry(registry: CleanupRegistry) -> Self {
        Self { registry }
    }

    /// Discards all pending release actions; the drop will perform nothing.
    pub fn disarm(&mut self) {
        self.registry.unregister_all();
    }
}

impl Deref for CleanupGuard {
    type Target = CleanupRegistry;

    fn deref(&self) -> &Self::Target {
        &self.registry
    }
}

impl DerefMut for CleanupGuard {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.registry
    }
}

impl Drop for CleanupGuard {
    fn drop(&mut self) {
        if self.registry.is_empty() {
            return;
        }

        debug!(
            pending = self.registry.pending_count(),
            "rolling back partially-acquired resources"
        );

        // Errors cannot propagate out of Drop; the caller keeps seeing only
        // the original acquisition failure.
        if let Err(errors) = self.registry.run_all() {
            warn!(failed = errors.len(), "rollback finished with failures: {errors}");
        }
    }
}

/// Runs a single closure on drop unless disarmed.
///
/// Returned by [`defer`].
#[must_use]
pub struct Defer<F: FnOnce()> {
    action: Option<F>,
}

impl<F: FnOnce()> Defer<F> {
    /// Discards the closure without running it.
    pub fn disarm(mut self) {
        self.action = None;
    }
}

impl<F: FnOnce()> Drop for Defer<F> {
    fn drop(&mut self) {
        if let Some(action) = self.action.take() {
            action();
        }
    }
}

/// Schedules `action` to run at scope exit.
///
/// The single-action counterpart of [`CleanupGuard`] for call sites with
/// exactly one resource to roll back.
#[must_use]
pub fn defer<F: FnOnce()>(action: F) -> Defer<F> {
    Defer {
        action: Some(action),
    }
}
