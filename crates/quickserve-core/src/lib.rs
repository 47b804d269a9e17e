//! quickserve core: error types, metric primitives, and injectable time and
//! randomness shared by the order exporter and the content server.
//!
//! This crate carries no transport or runtime dependencies so the simulator
//! can be driven deterministically from tests.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Fallible paths surface as `QuickServeError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod clock;
pub mod error;
pub mod obs;
pub mod rng;

/// Shared result type.
pub use error::{Result, QuickServeError};
