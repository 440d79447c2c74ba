//! Logging pipeline facade
//!
//! [`LoggingPipeline`] bundles the dispatcher and the replay engine behind
//! the two calls host code actually makes: `log` on every record, and
//! `complete` when a unit of work finishes.

use std::sync::Arc;

use crate::config::ReplayConfig;
use crate::dispatch::LogDispatcher;
use crate::operation::OperationContext;
use crate::record::LogRecord;
use crate::replay::{ReplayEngine, ReplayPolicy};
use crate::sink::LogSink;

/// Dispatch plus completion-triggered replay, sharing one sink
pub struct LoggingPipeline {
    dispatcher: LogDispatcher,
    engine: ReplayEngine,
    result_tag: String,
}

impl LoggingPipeline {
    /// Build a pipeline from configuration, emitting into the given sink
    pub fn new(config: &ReplayConfig, sink: Arc<dyn LogSink>) -> Self {
        Self {
            dispatcher: LogDispatcher::new(config, Arc::clone(&sink)),
            engine: ReplayEngine::new(ReplayPolicy::new(config), sink),
            result_tag: config.result_tag.clone(),
        }
    }

    /// Log one record against the currently active operation, if any
    pub fn log(&self, operation: Option<&OperationContext>, record: LogRecord) {
        self.dispatcher.dispatch(operation, record);
    }

    /// Complete an operation with a final outcome: stop it, record the
    /// outcome tag, and replay the ancestor chain if the outcome warrants
    /// it. A repeat completion is a full no-op (the first stop wins; the
    /// outcome tag is not rewritten and replay is not re-triggered).
    pub fn complete(&self, operation: &OperationContext, outcome: impl Into<String>) {
        if !operation.stop() {
            return;
        }
        operation.set_tag(self.result_tag.clone(), outcome);
        self.engine.on_operation_completed(operation);
    }
}
