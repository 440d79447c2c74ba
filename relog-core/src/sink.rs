//! Log sinks
//!
//! The dispatcher and the replay engine both emit through [`LogSink`].
//! [`TracingSink`] forwards into the `tracing` ecosystem for production
//! use; [`MemorySink`] captures records for tests and inspection.

use std::sync::{Mutex, PoisonError};

use crate::record::{LogRecord, Severity};

/// Destination for emitted log records
///
/// Implementations must not panic: logging never fails the operation it
/// instruments.
pub trait LogSink: Send + Sync {
    /// Emit one record
    fn log(&self, record: &LogRecord);
}

/// Forwards records to the `tracing` ecosystem as structured events
#[derive(Debug, Default)]
pub struct TracingSink;

impl TracingSink {
    /// Create a tracing sink
    pub fn new() -> Self {
        Self
    }
}

impl LogSink for TracingSink {
    fn log(&self, record: &LogRecord) {
        match record.severity {
            Severity::Trace => tracing::trace!(
                category = %record.category,
                event_id = record.event_id,
                thread = %record.thread,
                exception = record.exception.as_deref(),
                "{}",
                record.message
            ),
            Severity::Debug => tracing::debug!(
                category = %record.category,
                event_id = record.event_id,
                thread = %record.thread,
                exception = record.exception.as_deref(),
                "{}",
                record.message
            ),
            Severity::Info => tracing::info!(
                category = %record.category,
                event_id = record.event_id,
                thread = %record.thread,
                exception = record.exception.as_deref(),
                "{}",
                record.message
            ),
            Severity::Warn => tracing::warn!(
                category = %record.category,
                event_id = record.event_id,
                thread = %record.thread,
                exception = record.exception.as_deref(),
                "{}",
                record.message
            ),
            Severity::Error => tracing::error!(
                category = %record.category,
                event_id = record.event_id,
                thread = %record.thread,
                exception = record.exception.as_deref(),
                "{}",
                record.message
            ),
        }
    }
}

/// Captures records in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<LogRecord>>,
}

impl MemorySink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// All records emitted so far, in emission order
    pub fn records(&self) -> Vec<LogRecord> {
        self.lock().clone()
    }

    /// Number of records emitted so far
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether no records have been emitted
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Discard all captured records
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Export the captured records as JSON
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string(&self.records())?)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<LogRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl LogSink for MemorySink {
    fn log(&self, record: &LogRecord) {
        self.lock().push(record.clone());
    }
}
