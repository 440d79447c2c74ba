//! Replay engine

use std::sync::Arc;

use crate::operation::OperationContext;
use crate::sink::LogSink;

use super::policy::ReplayPolicy;
use super::{REPLAY_PREFIX, REPLAY_SEVERITY};

/// Replays buffered records of a failed operation's ancestor chain
///
/// The outcome gate is evaluated once, on the completing operation;
/// ancestors are then replayed unconditionally, parent before child, so the
/// emitted stream preserves causal order. Replay never fails: an absent
/// buffer is simply skipped, and the sink is non-throwing by contract.
pub struct ReplayEngine {
    policy: ReplayPolicy,
    sink: Arc<dyn LogSink>,
}

impl ReplayEngine {
    /// Create an engine emitting into the given sink
    pub fn new(policy: ReplayPolicy, sink: Arc<dyn LogSink>) -> Self {
        Self { policy, sink }
    }

    /// The policy this engine consults
    pub fn policy(&self) -> &ReplayPolicy {
        &self.policy
    }

    /// Called when an operation finishes. If its outcome warrants replay,
    /// drains every buffer on the chain from the root down to the operation
    /// itself into the sink, each record elevated and marker-prefixed.
    pub fn on_operation_completed(&self, operation: &OperationContext) {
        if !self.policy.should_replay(operation) {
            return;
        }
        self.replay_chain(operation);
    }

    /// Replay ancestors first, then this operation's own records
    fn replay_chain(&self, operation: &OperationContext) {
        if let Some(parent) = operation.parent() {
            self.replay_chain(parent);
        }
        if let Some(buffer) = operation.replay_buffer() {
            for record in buffer.snapshot() {
                self.sink.log(&record.replayed(REPLAY_SEVERITY, REPLAY_PREFIX));
            }
        }
    }
}
