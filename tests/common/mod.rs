// Common test utilities and helpers for the test suite

use std::sync::Arc;
use std::time::Duration;

use appendx::{Contention, RacyBuffer, StressReport, SyncBuffer};

/// Concrete scenario from the demonstration: 1000 writers × 100 appends.
pub const WRITERS: usize = 1000;
pub const APPENDS: usize = 100;

/// Generous enough for a loaded CI box, tight enough to fail fast on a hang.
pub const TEST_DEADLINE: Duration = Duration::from_secs(30);

fn config(writers: usize, appends: usize) -> Contention {
    Contention::new(writers, appends).deadline(TEST_DEADLINE)
}

/// Drive the unsynchronized target with per-call appends.
pub fn run_racy(writers: usize, appends: usize) -> StressReport {
    let config = config(writers, appends);
    let buffer = Arc::new(RacyBuffer::with_capacity(config.expected()));
    config.run(&buffer).expect("racy run should complete")
}

/// Drive the synchronized target with per-call appends.
pub fn run_per_call(writers: usize, appends: usize) -> (StressReport, Arc<SyncBuffer>) {
    let buffer = Arc::new(SyncBuffer::new());
    let report = config(writers, appends)
        .run(&buffer)
        .expect("per-call run should complete");
    (report, buffer)
}

/// Drive the synchronized target with each writer holding the lock across
/// its whole loop.
pub fn run_coarse(writers: usize, appends: usize) -> (StressReport, Arc<SyncBuffer>) {
    let buffer = Arc::new(SyncBuffer::new());
    let report = config(writers, appends)
        .run_coarse(&buffer)
        .expect("coarse run should complete");
    (report, buffer)
}
