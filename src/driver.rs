//! Contention driver: fan out writer threads, wait, join, report.
//!
//! `Contention` is the harness shared by all three scenarios. It owns the
//! fan-out/latch/join choreography so the scenarios differ only in what each
//! writer does per iteration: append through the target's own locking, or
//! hold one coarse lock across the whole loop.

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

#[cfg(feature = "tracing")]
use tracing::{debug, error, info};

use crate::error::{StressError, StressResult};
use crate::latch::CountdownLatch;
use crate::synced::SyncBuffer;
use crate::target::AppendTarget;

// Dropped on every exit path, so a panicking writer still signals and the
// driver's wait can complete. The panic itself surfaces at join.
struct SignalGuard {
    latch: Arc<CountdownLatch>,
}

impl Drop for SignalGuard {
    fn drop(&mut self) {
        self.latch.count_down();
    }
}

/// Configuration and entry point for one contention run.
///
/// A `Contention` describes the shape of the load — how many writer threads,
/// how many appends each performs, which character they append — and drives
/// it against a shared target:
///
/// 1. Spawn `writers` OS threads, each looping `appends` times
/// 2. Each writer signals a [`CountdownLatch`] exactly once on completion
/// 3. Block until every writer has signaled, bounded by the deadline
/// 4. Join the writers and convert any panic into an error
/// 5. Return a [`StressReport`] comparing expected and observed final length
///
/// [`run`](Contention::run) exercises per-call appends against any
/// [`AppendTarget`]; [`run_coarse`](Contention::run_coarse) has each writer
/// hold [`SyncBuffer::lock`] across its whole loop instead.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use appendx::{Contention, RacyBuffer, SyncBuffer};
///
/// let config = Contention::new(32, 200);
///
/// // Unsynchronized target: upper bound only.
/// let racy = Arc::new(RacyBuffer::with_capacity(config.expected()));
/// let report = config.run(&racy).unwrap();
/// assert!(report.observed <= report.expected);
///
/// // Per-call locking: exact.
/// let synced = Arc::new(SyncBuffer::new());
/// assert!(config.run(&synced).unwrap().is_exact());
///
/// // Coarse locking: exact, one lock acquisition per writer.
/// let coarse = Arc::new(SyncBuffer::new());
/// assert!(config.run_coarse(&coarse).unwrap().is_exact());
/// ```
#[derive(Debug, Clone)]
pub struct Contention {
    writers: usize,
    appends: usize,
    fill: char,
    deadline: Option<Duration>,
}

impl Contention {
    /// Deadline applied to the final wait unless overridden.
    pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(60);

    /// Configure a run of `writers` threads × `appends` appends each.
    ///
    /// Fill character defaults to `'a'`; the final wait is bounded by
    /// [`DEFAULT_DEADLINE`](Contention::DEFAULT_DEADLINE).
    pub fn new(writers: usize, appends: usize) -> Self {
        Self {
            writers,
            appends,
            fill: 'a',
            deadline: Some(Self::DEFAULT_DEADLINE),
        }
    }

    /// Set the character every writer appends.
    pub fn fill(mut self, fill: char) -> Self {
        self.fill = fill;
        self
    }

    /// Bound the final wait by `deadline`.
    pub fn deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Wait unconditionally for the writers, as the original demonstration
    /// does. If a writer never signals, [`run`](Contention::run) never
    /// returns.
    pub fn unbounded(mut self) -> Self {
        self.deadline = None;
        self
    }

    /// Total bytes the run submits: `writers × appends × fill.len_utf8()`.
    ///
    /// A safe target finishes with exactly this length; the racy target with
    /// at most this length.
    pub fn expected(&self) -> usize {
        self.writers * self.appends * self.fill.len_utf8()
    }

    /// Run the per-call scenario: every writer calls
    /// [`AppendTarget::append`] once per iteration, `appends` times.
    ///
    /// # Errors
    ///
    /// [`StressError::DeadlineExpired`] if the bounded wait runs out —
    /// unfinished writers are left detached, since an OS thread cannot be
    /// cancelled. [`StressError::WriterPanicked`] if a writer panicked.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip(self, target), fields(writers = self.writers, appends = self.appends))
    )]
    pub fn run<T>(&self, target: &Arc<T>) -> StressResult<StressReport>
    where
        T: AppendTarget + 'static,
    {
        #[cfg(feature = "tracing")]
        info!("starting per-call contention run");

        let appends = self.appends;
        let chunk = self.fill.to_string();
        let work: Arc<dyn Fn() + Send + Sync> = {
            let target = Arc::clone(target);
            Arc::new(move || {
                for _ in 0..appends {
                    target.append(&chunk);
                }
            })
        };

        let elapsed = self.fan_out(&work)?;
        Ok(self.report(target.len(), elapsed))
    }

    /// Run the coarse scenario: every writer acquires
    /// [`SyncBuffer::lock`] once and performs its whole loop through the
    /// guard, so the run pays `writers` lock acquisitions instead of
    /// `writers × appends`.
    ///
    /// # Errors
    ///
    /// Same as [`run`](Contention::run).
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip(self, buffer), fields(writers = self.writers, appends = self.appends))
    )]
    pub fn run_coarse(&self, buffer: &Arc<SyncBuffer>) -> StressResult<StressReport> {
        #[cfg(feature = "tracing")]
        info!("starting coarse-lock contention run");

        let appends = self.appends;
        let fill = self.fill;
        let work: Arc<dyn Fn() + Send + Sync> = {
            let buffer = Arc::clone(buffer);
            Arc::new(move || {
                // One acquisition for the whole batch.
                let mut guard = buffer.lock();
                for _ in 0..appends {
                    guard.push(fill);
                }
            })
        };

        let elapsed = self.fan_out(&work)?;
        Ok(self.report(buffer.len(), elapsed))
    }

    // Shared choreography: spawn, latch-wait, join. The latch (not join) is
    // what the driver blocks on, so the wait can be bounded; joining after a
    // successful wait is immediate.
    fn fan_out(&self, work: &Arc<dyn Fn() + Send + Sync>) -> StressResult<Duration> {
        let latch = Arc::new(CountdownLatch::new(self.writers));
        let started = Instant::now();

        #[cfg(feature = "tracing")]
        debug!(writers = self.writers, "spawning writers");

        let mut writers = Vec::with_capacity(self.writers);
        for _ in 0..self.writers {
            let work = Arc::clone(work);
            let latch = Arc::clone(&latch);
            writers.push(thread::spawn(move || {
                let _signal = SignalGuard { latch };
                work();
            }));
        }

        match self.deadline {
            Some(deadline) => {
                if !latch.wait_for(deadline) {
                    let pending = latch.pending();

                    #[cfg(feature = "tracing")]
                    error!(pending, ?deadline, "bounded wait expired");

                    return Err(StressError::DeadlineExpired { pending, deadline });
                }
            }
            None => latch.wait(),
        }

        for (worker, writer) in writers.into_iter().enumerate() {
            if let Err(payload) = writer.join() {
                let panic_message = if let Some(s) = payload.downcast_ref::<&str>() {
                    s.to_string()
                } else if let Some(s) = payload.downcast_ref::<String>() {
                    s.clone()
                } else {
                    "unknown panic".to_string()
                };

                #[cfg(feature = "tracing")]
                error!(worker, panic_message = %panic_message, "writer panicked");

                return Err(StressError::WriterPanicked {
                    worker,
                    panic_message,
                });
            }
        }

        Ok(started.elapsed())
    }

    fn report(&self, observed: usize, elapsed: Duration) -> StressReport {
        let report = StressReport {
            expected: self.expected(),
            observed,
            elapsed,
        };

        #[cfg(feature = "tracing")]
        debug!(
            expected = report.expected,
            observed = report.observed,
            lost = report.lost(),
            ?elapsed,
            "contention run complete"
        );

        report
    }
}

/// Outcome of a contention run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StressReport {
    /// Total bytes submitted across all writers.
    pub expected: usize,
    /// Final target length after every writer finished.
    pub observed: usize,
    /// Wall time from first spawn until every writer signaled and joined.
    pub elapsed: Duration,
}

impl StressReport {
    /// Whether every submitted byte landed.
    pub fn is_exact(&self) -> bool {
        self.observed == self.expected
    }

    /// Bytes lost to unsynchronized interleaving (zero for safe targets).
    pub fn lost(&self) -> usize {
        self.expected.saturating_sub(self.observed)
    }
}
