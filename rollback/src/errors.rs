//! Error types for cleanup execution.
//!
//! The crate produces no domain errors of its own; the only failure surface is
//! a registered release action failing (or panicking) while the registry runs.

use std::any::Any;
use thiserror::Error;

/// A single release action that failed during
/// [`CleanupRegistry::run_all`](crate::cleanup::CleanupRegistry::run_all).
#[derive(Debug, Clone, Error)]
#[error("cleanup action '{name}' (#{index}) failed: {reason}")]
pub struct CleanupFailure {
    /// Zero-based registration index of the action.
    pub index: usize,
    /// Debug name of the action, or `"<unnamed>"`.
    pub name: String,
    /// Why the action failed.
    pub reason: String,
}

impl CleanupFailure {
    pub(crate) fn from_error(index: usize, name: &str, error: &anyhow::Error) -> Self {
        Self {
            index,
            name: name.to_string(),
            reason: format!("{error:#}"),
        }
    }

    pub(crate) fn from_panic(index: usize, name: &str, payload: &(dyn Any + Send)) -> Self {
        let reason = if let Some(message) = payload.downcast_ref::<&str>() {
            format!("panicked: {message}")
        } else if let Some(message) = payload.downcast_ref::<String>() {
            format!("panicked: {message}")
        } else {
            "panicked".to_string()
        };

        Self {
            index,
            name: name.to_string(),
            reason,
        }
    }
}

/// Aggregate of every failure from a single cleanup pass.
///
/// Returned by [`CleanupRegistry::run_all`](crate::cleanup::CleanupRegistry::run_all)
/// when at least one action failed. The pass always attempts every action; this
/// lists the ones that did not release cleanly.
#[derive(Debug, Error)]
#[error("{} cleanup action(s) failed", .failures.len())]
pub struct CleanupErrors {
    failures: Vec<CleanupFailure>,
}

impl CleanupErrors {
    pub(crate) fn new(failures: Vec<CleanupFailure>) -> Self {
        Self { failures }
    }

    /// The individual failures, in registration order.
    #[must_use]
    pub fn failures(&self) -> &[CleanupFailure] {
        &self.failures
    }

    /// Number of failed actions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.failures.len()
    }

    /// True if no action failed (never the case for a returned value).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    /// Consumes the aggregate, yielding the individual failures.
    #[must_use]
    pub fn into_failures(self) -> Vec<CleanupFailure> {
        self.failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cleanup_failure_display() {
        let failure = CleanupFailure {
            index: 2,
            name: "socket".to_string(),
            reason: "already closed".to_string(),
        };

        assert_eq!(
            failure.to_string(),
            "cleanup action 'socket' (#2) failed: already closed"
        );
    }

    #[test]
    fn test_cleanup_failure_from_error() {
        let error = anyhow::anyhow!("release refused");
        let failure = CleanupFailure::from_error(0, "lock", &error);

        assert_eq!(failure.index, 0);
        assert_eq!(failure.name, "lock");
        assert!(failure.reason.contains("release refused"));
    }

    #[test]
    fn test_cleanup_failure_from_panic_payloads() {
        let from_str = CleanupFailure::from_panic(1, "a", &"boom");
        assert_eq!(from_str.reason, "panicked: boom");

        let from_string = CleanupFailure::from_panic(1, "b", &"boom".to_string());
        assert_eq!(from_string.reason, "panicked: boom");

        let from_other = CleanupFailure::from_panic(1, "c", &42_u32);
        assert_eq!(from_other.reason, "panicked");
    }

    #[test]
    fn test_cleanup_errors_display_and_accessors() {
        let errors = CleanupErrors::new(vec![
            CleanupFailure {
                index: 0,
                name: "first".to_string(),
                reason: "failed".to_string(),
            },
            CleanupFailure {
                index: 3,
                name: "fourth".to_string(),
                reason: "failed".to_string(),
            },
        ]);

        assert_eq!(errors.to_string(), "2 cleanup action(s) failed");
        assert_eq!(errors.len(), 2);
        assert!(!errors.is_empty());
        assert_eq!(errors.failures()[1].index, 3);

        let failures = errors.into_failures();
        assert_eq!(failures.len(), 2);
    }
}
