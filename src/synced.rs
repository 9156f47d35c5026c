//! The synchronized append target.

use parking_lot::{Mutex, MutexGuard};

use crate::target::AppendTarget;

/// A character buffer that serializes every append behind an internal mutex.
///
/// Each [`append`](SyncBuffer::append) call locks, applies the whole chunk,
/// and unlocks: after all callers complete, the total length exactly equals
/// the sum of all appended byte counts, and the contents are some valid
/// interleaving of the submitted chunks. Ordering across threads is
/// unspecified; no chunk is ever torn apart or dropped.
///
/// The cost is one lock acquire/release per call — N writers looping M
/// appends pay N×M lock operations. When a caller wants to batch that cost,
/// [`lock`](SyncBuffer::lock) exposes the guard directly so an entire loop
/// can run under a single acquisition (N acquisitions total), at the price of
/// holding the lock for the whole batch.
///
/// # Examples
///
/// Per-call locking:
///
/// ```
/// use appendx::SyncBuffer;
///
/// let buffer = SyncBuffer::new();
/// buffer.append("ab");
/// buffer.push('c');
///
/// assert_eq!(buffer.contents(), "abc");
/// ```
///
/// Coarse locking — one acquisition for a whole batch:
///
/// ```
/// use appendx::SyncBuffer;
///
/// let buffer = SyncBuffer::new();
/// {
///     let mut guard = buffer.lock();
///     for _ in 0..100 {
///         guard.push('a');
///     }
/// }
///
/// assert_eq!(buffer.len(), 100);
/// ```
pub struct SyncBuffer {
    inner: Mutex<String>,
}

impl SyncBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(String::new()),
        }
    }

    /// Create an empty buffer with space reserved for `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(String::with_capacity(capacity)),
        }
    }

    /// Append `chunk`, serialized against all other calls on this instance.
    pub fn append(&self, chunk: &str) {
        self.inner.lock().push_str(chunk);
    }

    /// Append a single character, serialized against all other calls.
    pub fn push(&self, ch: char) {
        self.inner.lock().push(ch);
    }

    /// Acquire the buffer's lock and return the guard.
    ///
    /// Holding the guard across a batch of pushes turns per-call locking into
    /// coarse locking: other callers (including [`append`](SyncBuffer::append))
    /// block until the guard is dropped.
    pub fn lock(&self) -> MutexGuard<'_, String> {
        self.inner.lock()
    }

    /// Number of bytes currently held.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Whether the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Clone the current contents.
    pub fn contents(&self) -> String {
        self.inner.lock().clone()
    }
}

impl Default for SyncBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl AppendTarget for SyncBuffer {
    fn append(&self, chunk: &str) {
        SyncBuffer::append(self, chunk);
    }

    fn len(&self) -> usize {
        SyncBuffer::len(self)
    }
}
