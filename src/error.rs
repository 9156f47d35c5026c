//! Error types for contention runs.
//!
//! This module defines the errors the driver can report while fanning out,
//! waiting on, and joining its writer threads.

use std::time::Duration;

/// Errors that can occur while driving a contention run
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum StressError {
    /// The bounded wait expired before every writer signaled completion
    DeadlineExpired { pending: usize, deadline: Duration },
    /// A writer panicked during its append loop
    WriterPanicked {
        worker: usize,
        panic_message: String,
    },
}

impl std::fmt::Display for StressError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StressError::DeadlineExpired { pending, deadline } => {
                write!(
                    f,
                    "{} writer(s) had not signaled completion within {:?}\n\
                     \n\
                     The bounded wait expired. Unfinished writers are left detached and \
                     their appends may still land after this error is returned.",
                    pending, deadline
                )
            }
            StressError::WriterPanicked {
                worker,
                panic_message,
            } => {
                write!(
                    f,
                    "Writer #{} panicked during its append loop: {}",
                    worker, panic_message
                )
            }
        }
    }
}

impl std::error::Error for StressError {}

/// Result type for contention runs
pub type StressResult<T> = Result<T, StressError>;
