//! Bounded per-operation record buffer

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use crate::record::LogRecord;

/// A bounded FIFO of log records attached to one operation
///
/// Deliberately lossy: appending past capacity evicts the oldest record
/// rather than applying backpressure (the freshest context is the most
/// useful when a failure is diagnosed). Appends and snapshots may interleave
/// freely from different threads; the queue is guarded by a short-held lock
/// that recovers from poisoning so logging can never panic the host.
pub struct ReplayBuffer {
    capacity: usize,
    records: Mutex<VecDeque<LogRecord>>,
}

impl ReplayBuffer {
    /// Create an empty buffer holding at most `capacity` records
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            records: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    /// Append a record, evicting the oldest if the buffer is full.
    /// Always succeeds.
    pub fn append(&self, record: LogRecord) {
        let mut records = self.lock();
        records.push_back(record);
        while records.len() > self.capacity {
            records.pop_front();
        }
    }

    /// Snapshot of all held records, oldest first.
    ///
    /// Non-destructive: the buffer is not cleared, so overlapping ancestor
    /// walks re-read the same records.
    pub fn snapshot(&self) -> Vec<LogRecord> {
        self.lock().iter().cloned().collect()
    }

    /// Number of records currently held
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the buffer holds no records
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// The configured capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, VecDeque<LogRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for ReplayBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReplayBuffer")
            .field("capacity", &self.capacity)
            .field("len", &self.len())
            .finish()
    }
}
