//! # Rollback
//!
//! A deferred-cleanup registry for multi-step resource acquisition.
//!
//! Acquiring several resources in sequence means every failure branch has to
//! release whatever was already acquired, which is easy to get wrong by hand.
//! Rollback inverts that: each successful step registers one release action,
//! and a scope guard runs all of them on every exit path unless the caller
//! reaches the success path and explicitly disarms it.
//!
//! ## Quick Start
//!
//! ```rust
//! use rollback::prelude::*;
//!
//! # fn open(name: &str) -> Result<i32, String> { Ok(name.len() as i32) }
//! # fn close(_fd: i32) {}
//! fn open_both() -> Result<(i32, i32), String> {
//!     let mut guard = CleanupGuard::new();
//!
//!     let first = open("first")?;
//!     guard.register(move || close(first));
//!
//!     let second = open("second")?;
//!     guard.register(move || close(second));
//!
//!     // Every `?` above rolls back the earlier acquisitions automatically.
//!     guard.disarm();
//!     Ok((first, second))
//! }
//! # open_both().unwrap();
//! ```
//!
//! Each action captures the specific handle it releases by value; handles that
//! are not `Copy` can be shared with the action through `Rc` or `Arc`.
//!
//! Release actions run in registration order, oldest first. A failing action
//! never prevents the remaining actions from running; failures are logged and
//! aggregated into [`errors::CleanupErrors`].

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod cleanup;
pub mod errors;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::cleanup::{defer, CleanupGuard, CleanupRegistry, Defer};
    pub use crate::errors::{CleanupErrors, CleanupFailure};
}
