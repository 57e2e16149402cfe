//! Deferred cleanup for multi-step resource acquisition.
//!
//! This module provides:
//! - [`CleanupRegistry`] for accumulating release actions, one per successful
//!   acquisition
//! - [`CleanupGuard`] for running the registry on every exit path unless
//!   disarmed
//! - [`defer`] for the single-action case

mod guard;
mod registry;


pub use guard::{defer, CleanupGuard, Defer};
pub use registry::CleanupRegistry;
