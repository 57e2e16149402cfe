//! Registry of release actions for one acquisition sequence.

use crate::errors::{CleanupErrors, CleanupFailure};
use std::panic::{self, AssertUnwindSafe};
use tracing::warn;

type BoxedAction = Box<dyn FnOnce() -> anyhow::Result<()>>;

/// A release action with an optional name.
struct CleanupAction {
    /// The action itself.
    action: BoxedAction,
    /// Optional name used in failure reports and log lines.
    name: Option<String>,
}

/// Accumulates release actions during a multi-step acquisition and runs them
/// in registration order if the sequence is not explicitly marked successful.
///
/// A registry is created fresh per acquisition sequence and is exclusively
/// owned by that call site; all operations are synchronous and take `&mut self`.
/// Actions close over the handles they release, not the registry.
///
/// Most call sites want [`CleanupGuard`](crate::cleanup::CleanupGuard), which
/// owns a registry and guarantees [`run_all`](Self::run_all) on every exit path.
#[derive(Default)]
pub struct CleanupRegistry {
    /// Registered actions, oldest first.
    actions: Vec<CleanupAction>,
}

impl CleanupRegistry {
    /// Creates a new, empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a release action for one successful acquisition.
    ///
    /// Always succeeds; the action may be a no-op.
    pub fn register<F>(&mut self, action: F)
    where
        F: FnOnce() + 'static,
    {
        self.push(None, action_infallible(action));
    }

    /// Registers a named release action.
    ///
    /// The name shows up in failure reports and log lines.
    pub fn register_named<F>(&mut self, name: impl Into<String>, action: F)
    where
        F: FnOnce() + 'static,
    {
        self.push(Some(name.into()), action_infallible(action));
    }

    /// Registers a release action that may itself fail.
    ///
    /// A returned error is collected by [`run_all`](Self::run_all) without
    /// stopping the remaining actions.
    pub fn register_fallible<F>(&mut self, name: impl Into<String>, action: F)
    where
        F: FnOnce() -> anyhow::Result<()> + 'static,
    {
        self.push(Some(name.into()), Box::new(action));
    }

    fn push(&mut self, name: Option<String>, action: BoxedAction) {
        self.actions.push(CleanupAction { action, name });
    }

    /// Runs every registered action in registration order, oldest first.
    ///
    /// The registry is drained before anything runs, so invoking this again
    /// after a prior `run_all` or [`unregister_all`](Self::unregister_all) is a
    /// no-op. A failing or panicking action never prevents the remaining
    /// actions from running; each failure is logged and all of them are
    /// returned in one [`CleanupErrors`] aggregate.
    pub fn run_all(&mut self) -> Result<(), CleanupErrors> {
        let actions = std::mem::take(&mut self.actions);
        let mut failures = Vec::new();

        for (index, entry) in actions.into_iter().enumerate() {
            let name = entry.name.unwrap_or_else(|| "<unnamed>".to_string());

            match panic::catch_unwind(AssertUnwindSafe(entry.action)) {
                Ok(Ok(())) => {}
                Ok(Err(error)) => {
                    warn!(action = %name, index, "cleanup action failed: {error:#}");
                    failures.push(CleanupFailure::from_error(index, &name, &error));
                }
                Err(payload) => {
                    warn!(action = %name, index, "cleanup action panicked");
                    failures.push(CleanupFailure::from_panic(index, &name, payload.as_ref()));
                }
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(CleanupErrors::new(failures))
        }
    }

    /// Discards every registered action without running it.
    ///
    /// Call once the whole acquisition sequence succeeded, so the `run_all` at
    /// scope exit performs nothing.
    pub fn unregister_all(&mut self) {
        self.actions.clear();
    }

    /// Returns the number of pending release actions.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.actions.len()
    }

    /// Returns true if no actions are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

fn action_infallible<F>(action: F) -> BoxedAction
where
    F: FnOnce() + 'static,
{
    Box::new(move || {
        action();
        Ok(())
    })
}

impl std::fmt::Debug for CleanupRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CleanupRegistry")
            .field("pending_count", &self.pending_count())
            .finish()
    }
}
