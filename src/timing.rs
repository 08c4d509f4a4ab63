//! Per-worker busy-time accumulation for the parallel multiply
//!
//! A [`WorkerTimingTable`] is a fixed-length array of atomic nanosecond
//! accumulators, one slot per available worker thread. Workers computing
//! output rows add each row's elapsed time into the slot at their worker
//! index modulo the table length. When more logical workers exist than
//! slots, totals alias by construction; the table approximates per-worker
//! busy time, it is not a strict per-thread ledger.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Fixed-size table of accumulated per-worker compute time, in nanoseconds
///
/// Writes use an atomic add so concurrent increments from rayon workers are
/// never lost. Reads are only meaningful after the fan-out's join, which is
/// the sole memory barrier the benchmark relies on.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use parmul::WorkerTimingTable;
///
/// let table = WorkerTimingTable::new(4);
/// table.record(1, Duration::from_nanos(250));
/// table.record(5, Duration::from_nanos(750)); // aliases to slot 1
/// assert_eq!(table.slot_nanos(1), 1_000);
/// assert_eq!(table.total_nanos(), 1_000);
/// ```
#[derive(Debug)]
pub struct WorkerTimingTable {
    slots: Box<[AtomicU64]>,
}

impl WorkerTimingTable {
    /// Creates a table with the given number of slots (at least one)
    pub fn new(slot_count: usize) -> Self {
        let slots = (0..slot_count.max(1))
            .map(|_| AtomicU64::new(0))
            .collect::<Vec<_>>()
            .into_boxed_slice();
        WorkerTimingTable { slots }
    }

    /// Creates a table with one slot per thread in rayon's current pool
    pub fn for_current_pool() -> Self {
        Self::new(rayon::current_num_threads())
    }

    /// Returns the number of slots
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if the table has no slots (never the case in practice)
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Resets every slot to zero
    ///
    /// Called at the start of each benchmark iteration.
    pub fn reset(&self) {
        for slot in self.slots.iter() {
            slot.store(0, Ordering::Relaxed);
        }
    }

    /// Adds `elapsed` into the slot for `worker`, wrapping modulo table length
    pub fn record(&self, worker: usize, elapsed: Duration) {
        let slot = worker % self.slots.len();
        self.slots[slot].fetch_add(elapsed.as_nanos() as u64, Ordering::Relaxed);
    }

    /// Adds `elapsed` into the slot for the calling rayon worker
    ///
    /// The slot index comes from the pool's own worker index rather than a
    /// raw OS thread id, so it is stable and bounded for the pool's lifetime.
    /// Calls from outside any rayon pool land in slot zero.
    pub fn record_current_worker(&self, elapsed: Duration) {
        self.record(rayon::current_thread_index().unwrap_or(0), elapsed);
    }

    /// Returns the accumulated nanoseconds in one slot
    ///
    /// # Panics
    ///
    /// Panics if `slot` is out of bounds.
    pub fn slot_nanos(&self, slot: usize) -> u64 {
        self.slots[slot].load(Ordering::Relaxed)
    }

    /// Returns every slot's accumulated nanoseconds in slot order
    pub fn snapshot(&self) -> Vec<u64> {
        self.slots
            .iter()
            .map(|slot| slot.load(Ordering::Relaxed))
            .collect()
    }

    /// Returns the sum of all slots, in nanoseconds
    pub fn total_nanos(&self) -> u64 {
        self.slots
            .iter()
            .map(|slot| slot.load(Ordering::Relaxed))
            .sum()
    }
}
