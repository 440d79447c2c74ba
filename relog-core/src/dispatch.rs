//! Log dispatch
//!
//! Every log call goes through [`LogDispatcher`]: the live stream sees the
//! record if it clears the minimum severity filter, and independently the
//! record is buffered on the active operation if the policy deems its
//! severity bufferable. A record can take both paths, either one, or
//! neither.

use std::sync::Arc;

use crate::config::ReplayConfig;
use crate::operation::OperationContext;
use crate::record::{LogRecord, Severity};
use crate::replay::ReplayPolicy;
use crate::sink::LogSink;

/// Routes records to the live sink and, when applicable, into the active
/// operation's replay buffer
pub struct LogDispatcher {
    policy: ReplayPolicy,
    sink: Arc<dyn LogSink>,
    min_severity: Severity,
    buffer_capacity: usize,
}

impl LogDispatcher {
    /// Create a dispatcher from configuration
    pub fn new(config: &ReplayConfig, sink: Arc<dyn LogSink>) -> Self {
        Self {
            policy: ReplayPolicy::new(config),
            sink,
            min_severity: config.min_severity,
            buffer_capacity: config.max_records_per_operation,
        }
    }

    /// The policy this dispatcher consults
    pub fn policy(&self) -> &ReplayPolicy {
        &self.policy
    }

    /// Dispatch one record against the currently active operation, if any.
    /// Never fails and never panics.
    pub fn dispatch(&self, operation: Option<&OperationContext>, record: LogRecord) {
        // Live path: the ambient severity filter, independent of replay
        if record.severity >= self.min_severity {
            self.sink.log(&record);
        }

        // Buffer path: even records the filter suppressed are kept for a
        // possible replay
        if let Some(operation) = operation {
            if self.policy.is_bufferable(record.severity) {
                operation
                    .replay_buffer_or_attach(self.buffer_capacity)
                    .append(record);
            }
        }
    }
}
