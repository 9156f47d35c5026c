//! The unsynchronized append target.
//!
//! `RacyBuffer` reproduces the classic lost-update hazard of sharing an
//! unguarded growable string across writers, modeled with relaxed atomics so
//! the crate stays sound while the races stay observable.

use std::sync::atomic::{AtomicU8, AtomicUsize, Ordering};

use crate::target::AppendTarget;

/// A fixed-capacity character buffer whose append is **not** atomic.
///
/// Each append claims the current cursor position, writes its byte there, and
/// publishes `cursor + 1` — as three independent operations with no
/// compare-and-swap between them. Two concurrent writers can read the same
/// cursor value, write the same slot, and publish the same new length, losing
/// one of the two appends. No error is raised; the failure mode is silent
/// data loss.
///
/// What *does* hold, every run:
///
/// - [`len`](RacyBuffer::len) never exceeds the total bytes submitted, and
///   never exceeds the capacity.
/// - Slot values are never torn: a slot always holds a byte some writer
///   submitted (slots are single bytes, written whole).
/// - Single-threaded use is exact.
///
/// Appends beyond capacity are silently discarded — under this type's
/// contract, a dropped byte is indistinguishable from a lost one.
///
/// # Examples
///
/// ```
/// use appendx::RacyBuffer;
///
/// let buffer = RacyBuffer::with_capacity(16);
/// buffer.push('a');
/// buffer.push('b');
///
/// // No contention, so nothing was lost.
/// assert_eq!(buffer.len(), 2);
/// assert_eq!(buffer.contents(), "ab");
/// ```
pub struct RacyBuffer {
    slots: Box<[AtomicU8]>,
    cursor: AtomicUsize,
}

impl RacyBuffer {
    /// Create a buffer that can hold up to `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        let slots = (0..capacity).map(|_| AtomicU8::new(0)).collect();
        Self {
            slots,
            cursor: AtomicUsize::new(0),
        }
    }

    /// Append a single character with no synchronization against other
    /// callers.
    pub fn push(&self, ch: char) {
        let mut utf8 = [0u8; 4];
        for &byte in ch.encode_utf8(&mut utf8).as_bytes() {
            self.push_byte(byte);
        }
    }

    // The hazard on display: claim-then-publish as three independent relaxed
    // operations. Nothing stops two writers from claiming the same slot.
    fn push_byte(&self, byte: u8) {
        let at = self.cursor.load(Ordering::Relaxed);
        if at >= self.slots.len() {
            return;
        }
        self.slots[at].store(byte, Ordering::Relaxed);
        self.cursor.store(at + 1, Ordering::Relaxed);
    }

    /// Number of bytes claimed so far. Under contention this undercounts the
    /// bytes submitted; it never overcounts.
    pub fn len(&self) -> usize {
        self.cursor.load(Ordering::Relaxed)
    }

    /// Whether nothing has been appended yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of bytes the buffer can hold.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Snapshot of the claimed prefix.
    ///
    /// Meaningful once all writers have finished (and a happens-before edge
    /// exists, e.g. the threads were joined). Read mid-run it is exactly as
    /// trustworthy as the rest of this type.
    pub fn contents(&self) -> String {
        let claimed = self.len().min(self.slots.len());
        let bytes: Vec<u8> = self.slots[..claimed]
            .iter()
            .map(|slot| slot.load(Ordering::Relaxed))
            .collect();
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl AppendTarget for RacyBuffer {
    fn append(&self, chunk: &str) {
        for &byte in chunk.as_bytes() {
            self.push_byte(byte);
        }
    }

    fn len(&self) -> usize {
        RacyBuffer::len(self)
    }
}
