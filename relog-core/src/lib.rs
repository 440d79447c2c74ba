//! # Relog - Replayable-Activity Logging
//!
//! Relog keeps the low-severity context of a failure. Trace and debug
//! records are usually filtered or sampled out of the live log stream;
//! Relog buffers them per traced operation and, when an operation completes
//! with the recognized failure outcome, replays the whole ancestor chain's
//! buffered records at elevated severity so nothing relevant is lost.
//!
//! ## Quick Start
//!
//! ```rust
//! use relog_core::prelude::*;
//! use std::sync::Arc;
//!
//! let sink = Arc::new(MemorySink::new());
//! let pipeline = LoggingPipeline::new(&ReplayConfig::default(), sink.clone());
//!
//! let op = OperationContext::start("checkout");
//! // Suppressed from the live stream, kept for a possible replay
//! pipeline.log(Some(&op), LogRecord::new("app", Severity::Debug, 1, "cart loaded"));
//!
//! // The failure outcome triggers the replay
//! pipeline.complete(&op, "SystemError");
//! assert_eq!(sink.records()[0].message, "[Replay] cart loaded");
//! ```
//!
//! ## Architecture
//!
//! - **Operations**: tree-structured units of work with tags, inherited
//!   baggage, and an idempotent stop ([`operation::OperationContext`])
//! - **Buffering**: bounded drop-oldest FIFO per operation, attached lazily
//!   ([`replay::ReplayBuffer`])
//! - **Policy**: which severities buffer, which outcomes replay
//!   ([`replay::ReplayPolicy`])
//! - **Replay**: ancestor-first chain walk into the sink
//!   ([`replay::ReplayEngine`])
//! - **Dispatch**: the live severity filter and the buffer path, decided
//!   independently per record ([`dispatch::LogDispatcher`])

pub mod config;
pub mod dispatch;
pub mod error;
pub mod operation;
pub mod pipeline;
pub mod record;
pub mod replay;
pub mod sink;

/// Current library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{
        DEFAULT_BUFFER_CAPACITY, DEFAULT_FAILURE_OUTCOME, DEFAULT_RESULT_TAG, ReplayConfig,
    };
    pub use crate::dispatch::LogDispatcher;
    pub use crate::error::{RelogError, Result};
    pub use crate::operation::OperationContext;
    pub use crate::pipeline::LoggingPipeline;
    pub use crate::record::{LogRecord, Severity};
    pub use crate::replay::{REPLAY_PREFIX, ReplayBuffer, ReplayEngine, ReplayPolicy};
    pub use crate::sink::{LogSink, MemorySink, TracingSink};
}
