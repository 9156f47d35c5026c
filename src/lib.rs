//! Concurrent Append-Target Stress Harness
//!
//! A small library for demonstrating and property-testing what happens when
//! many parallel writers append to one shared character buffer. It packages
//! the three classic contention scenarios behind one driver:
//!
//! - **No lock**: [`RacyBuffer`] appends with a deliberately non-atomic
//!   reserve-then-publish sequence. Concurrent writers overwrite each other's
//!   reservations and updates are silently lost. The final length is bounded
//!   above by the bytes submitted, and that is the *only* guarantee it keeps.
//! - **Per-call lock**: [`SyncBuffer`] takes an internal mutex on every
//!   `append`. Nothing is ever lost, at the cost of one lock acquire/release
//!   per call: N writers looping M times pay N×M lock operations.
//! - **Coarse lock**: a writer takes [`SyncBuffer::lock`] once and performs
//!   its whole batch through the guard. Same exactness guarantee, but lock
//!   traffic drops from N×M acquisitions to N, with the lock held for a
//!   full batch at a time.
//!
//! [`Contention`] is the driver: it fans out N OS threads (true parallelism,
//! not cooperative interleaving), each looping M appends against the shared
//! target, signals completion through a [`CountdownLatch`], bounded-waits,
//! joins, and hands back a [`StressReport`] with the expected and observed
//! final lengths.
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//!
//! use appendx::{Contention, SyncBuffer};
//!
//! let buffer = Arc::new(SyncBuffer::new());
//! let report = Contention::new(8, 100).run(&buffer).unwrap();
//!
//! // Per-call locking never loses an append.
//! assert!(report.is_exact());
//! assert_eq!(buffer.contents().len(), 800);
//! ```
//!
//! And the hazard itself:
//!
//! ```
//! use std::sync::Arc;
//!
//! use appendx::{Contention, RacyBuffer};
//!
//! let config = Contention::new(64, 500);
//! let buffer = Arc::new(RacyBuffer::with_capacity(config.expected()));
//! let report = config.run(&buffer).unwrap();
//!
//! // The unsynchronized buffer can only promise an upper bound. Whether any
//! // update was actually lost this run is up to the scheduler.
//! assert!(report.observed <= report.expected);
//! ```
//!
//! # Bounded Waits
//!
//! The original demonstration this crate reproduces waits unconditionally for
//! its writers. [`Contention`] instead bounds the wait (60 s by default) and
//! reports [`StressError::DeadlineExpired`] if writers fail to signal in
//! time; [`Contention::unbounded`] restores the unconditional wait.
//!
//! # Tracing
//!
//! Structured logging is available behind the off-by-default `tracing`
//! feature. When disabled, the logging statements are removed at compile time
//! via `#[cfg(feature = "tracing")]` and the `tracing` crate isn't linked.

// Module declarations
mod driver;
mod error;
mod latch;
mod racy;
mod synced;
mod target;

// Public re-exports
pub use driver::{Contention, StressReport};
pub use error::{StressError, StressResult};
pub use latch::CountdownLatch;
pub use racy::RacyBuffer;
pub use synced::SyncBuffer;
pub use target::AppendTarget;
