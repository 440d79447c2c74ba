//! Failure-triggered log replay
//!
//! Low-severity log records are usually filtered or sampled out of the live
//! log stream. This module keeps a bounded per-operation buffer of those
//! records and, when an operation completes with the recognized failure
//! outcome, replays the buffered records of the whole ancestor chain at
//! elevated severity so the context of the failure is not lost.
//!
//! # Architecture
//!
//! - [`ReplayBuffer`]: bounded drop-oldest FIFO of records, one per
//!   operation, attached lazily by the dispatcher.
//! - [`ReplayPolicy`]: decides which severities are buffered and which
//!   completed operations warrant replay.
//! - [`ReplayEngine`]: walks the completed operation's ancestor chain,
//!   parent-first, draining each buffer into the log sink.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use relog_core::config::ReplayConfig;
//! use relog_core::operation::OperationContext;
//! use relog_core::record::{LogRecord, Severity};
//! use relog_core::replay::{ReplayEngine, ReplayPolicy};
//! use relog_core::sink::MemorySink;
//!
//! let config = ReplayConfig::default();
//! let sink = Arc::new(MemorySink::new());
//! let engine = ReplayEngine::new(ReplayPolicy::new(&config), sink.clone());
//!
//! let op = OperationContext::start("checkout");
//! op.replay_buffer_or_attach(16)
//!     .append(LogRecord::new("app", Severity::Debug, 1, "cart loaded"));
//! op.set_tag("Result", "SystemError");
//!
//! engine.on_operation_completed(&op);
//! assert_eq!(sink.records()[0].message, "[Replay] cart loaded");
//! ```

mod buffer;
mod engine;
mod policy;

pub use buffer::ReplayBuffer;
pub use engine::ReplayEngine;
pub use policy::ReplayPolicy;

/// Marker prepended to every replayed message
pub const REPLAY_PREFIX: &str = "[Replay] ";

/// Fixed severity at which buffered records are replayed
pub const REPLAY_SEVERITY: crate::record::Severity = crate::record::Severity::Info;
