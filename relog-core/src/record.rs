//! Log severities and immutable log records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Log severity, ordered from most to least verbose
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Finest-grained diagnostic detail
    Trace,
    /// Debugging detail
    Debug,
    /// Normal operational messages
    Info,
    /// Something unexpected but recoverable
    Warn,
    /// A failure
    Error,
}

impl Severity {
    /// The two most verbose severities, eligible for replay buffering
    pub fn is_verbose(&self) -> bool {
        matches!(self, Severity::Trace | Severity::Debug)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Severity::Trace => "trace",
            Severity::Debug => "debug",
            Severity::Info => "info",
            Severity::Warn => "warn",
            Severity::Error => "error",
        };
        f.write_str(s)
    }
}

/// An immutable log record
///
/// Created once at the call site and copied by value into a replay buffer;
/// never mutated afterwards. The originating thread label is captured at
/// construction time so replayed records still identify the thread that
/// produced them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogRecord {
    /// Logger name / category
    pub category: String,
    /// Severity at the call site
    pub severity: Severity,
    /// Numeric event id
    pub event_id: u32,
    /// Label of the thread that produced the record
    pub thread: String,
    /// Rendered message text
    pub message: String,
    /// Associated exception text, if any
    pub exception: Option<String>,
    /// When the record was created
    pub timestamp: DateTime<Utc>,
}

impl LogRecord {
    /// Create a record, capturing the current thread label and timestamp
    pub fn new(
        category: impl Into<String>,
        severity: Severity,
        event_id: u32,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            severity,
            event_id,
            thread: current_thread_label(),
            message: message.into(),
            exception: None,
            timestamp: Utc::now(),
        }
    }

    /// Attach exception text
    pub fn with_exception(mut self, exception: impl Into<String>) -> Self {
        self.exception = Some(exception.into());
        self
    }

    /// Derive the replay form of this record: elevated severity and a
    /// marker prefix on the message, everything else preserved.
    pub fn replayed(&self, severity: Severity, prefix: &str) -> LogRecord {
        LogRecord {
            category: self.category.clone(),
            severity,
            event_id: self.event_id,
            thread: self.thread.clone(),
            message: format!("{}{}", prefix, self.message),
            exception: self.exception.clone(),
            timestamp: self.timestamp,
        }
    }
}

/// Name of the current thread, falling back to its id
fn current_thread_label() -> String {
    let thread = std::thread::current();
    match thread.name() {
        Some(name) => name.to_string(),
        None => format!("{:?}", thread.id()),
    }
}
