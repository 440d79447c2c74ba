//! Replay decision policy

use crate::config::ReplayConfig;
use crate::operation::OperationContext;
use crate::record::Severity;

/// Decides which records are buffered and which completed operations
/// warrant a replay
///
/// The outcome gate recognizes exactly one failure value, compared
/// ordinally against the configured result tag. A missing tag or any other
/// value, failure-like or not, means no replay.
#[derive(Debug, Clone)]
pub struct ReplayPolicy {
    enabled: bool,
    result_tag: String,
    failure_outcome: String,
}

impl ReplayPolicy {
    /// Build a policy from configuration
    pub fn new(config: &ReplayConfig) -> Self {
        Self {
            enabled: config.enabled,
            result_tag: config.result_tag.clone(),
            failure_outcome: config.failure_outcome.clone(),
        }
    }

    /// Whether replay buffering is enabled at all
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The tag key consulted for an operation's outcome
    pub fn result_tag(&self) -> &str {
        &self.result_tag
    }

    /// Whether a record of this severity is buffered instead of relying on
    /// the live stream alone. Only the two most verbose severities qualify,
    /// and only while the switch is on.
    pub fn is_bufferable(&self, severity: Severity) -> bool {
        self.enabled && severity.is_verbose()
    }

    /// Whether a completed operation's outcome warrants replaying its
    /// ancestor chain
    pub fn should_replay(&self, operation: &OperationContext) -> bool {
        if !self.enabled {
            return false;
        }
        operation
            .tag(&self.result_tag)
            .is_some_and(|outcome| outcome == self.failure_outcome)
    }
}
