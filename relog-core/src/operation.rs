//! Traced operation contexts
//!
//! An [`OperationContext`] is one logical unit of work: it carries an opaque
//! id, a parent link (forming a finite chain back to the root operation),
//! last-write-wins tags, baggage inherited by children at creation time, and
//! a lazily attached replay buffer. Contexts are shared behind `Arc` and are
//! safe to touch from any thread; an operation may span async continuations
//! resumed on different threads.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use once_cell::sync::OnceCell;
use uuid::Uuid;

use crate::replay::ReplayBuffer;

/// Recorded at the first (and only effective) stop
#[derive(Debug, Clone, Copy)]
struct Stopped {
    at: DateTime<Utc>,
    duration: Duration,
}

/// A traced unit of work
pub struct OperationContext {
    /// Opaque identity, assigned at start
    id: String,
    /// Human-readable operation name
    name: String,
    /// Parent operation, if any
    parent: Option<Arc<OperationContext>>,
    /// Single-valued, last-write-wins metadata; lookup is first-match
    tags: Mutex<Vec<(String, String)>>,
    /// Key/value state inherited by children at creation time
    baggage: Mutex<HashMap<String, String>>,
    /// Wall-clock start time
    started_at: DateTime<Utc>,
    /// Monotonic start for duration measurement
    started: Instant,
    /// Set exactly once, by the first stop
    stopped: Mutex<Option<Stopped>>,
    /// Replay buffer slot; attached on first buffered record, never replaced
    buffer: OnceCell<ReplayBuffer>,
}

impl OperationContext {
    /// Start a new root operation
    pub fn start(name: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            parent: None,
            tags: Mutex::new(Vec::new()),
            baggage: Mutex::new(HashMap::new()),
            started_at: Utc::now(),
            started: Instant::now(),
            stopped: Mutex::new(None),
            buffer: OnceCell::new(),
        })
    }

    /// Start a child operation, inheriting a copy of this operation's
    /// baggage. Tags are not inherited, and baggage set on the child never
    /// propagates back up.
    pub fn start_child(self: &Arc<Self>, name: impl Into<String>) -> Arc<OperationContext> {
        let baggage = lock(&self.baggage).clone();
        Arc::new(OperationContext {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            parent: Some(Arc::clone(self)),
            tags: Mutex::new(Vec::new()),
            baggage: Mutex::new(baggage),
            started_at: Utc::now(),
            started: Instant::now(),
            stopped: Mutex::new(None),
            buffer: OnceCell::new(),
        })
    }

    /// Get the operation id
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the operation name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the parent operation, if any
    pub fn parent(&self) -> Option<&Arc<OperationContext>> {
        self.parent.as_ref()
    }

    /// Wall-clock start time
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Set a tag. Tags are single-valued: setting an existing key replaces
    /// its value in place.
    pub fn set_tag(&self, key: impl Into<String>, value: impl Into<String>) {
        let (key, value) = (key.into(), value.into());
        let mut tags = lock(&self.tags);
        if let Some(entry) = tags.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            tags.push((key, value));
        }
    }

    /// Look up a tag by exact (case-sensitive) key; first match wins
    pub fn tag(&self, key: &str) -> Option<String> {
        lock(&self.tags)
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }

    /// Snapshot of all tags in insertion order
    pub fn tags(&self) -> Vec<(String, String)> {
        lock(&self.tags).clone()
    }

    /// Set a baggage entry on this operation. Visible to children created
    /// afterwards, never to the parent.
    pub fn set_baggage(&self, key: impl Into<String>, value: impl Into<String>) {
        lock(&self.baggage).insert(key.into(), value.into());
    }

    /// Look up a baggage entry
    pub fn baggage(&self, key: &str) -> Option<String> {
        lock(&self.baggage).get(key).cloned()
    }

    /// Stop the operation, fixing its duration. Idempotent: returns `true`
    /// only for the call that actually stopped it; repeat stops are no-ops.
    pub fn stop(&self) -> bool {
        let mut stopped = lock(&self.stopped);
        if stopped.is_some() {
            return false;
        }
        *stopped = Some(Stopped {
            at: Utc::now(),
            duration: self.started.elapsed(),
        });
        true
    }

    /// Whether the operation has been stopped
    pub fn is_stopped(&self) -> bool {
        lock(&self.stopped).is_some()
    }

    /// Wall-clock stop time, once stopped
    pub fn stopped_at(&self) -> Option<DateTime<Utc>> {
        lock(&self.stopped).map(|s| s.at)
    }

    /// Duration from start to the first stop
    pub fn duration(&self) -> Option<Duration> {
        lock(&self.stopped).map(|s| s.duration)
    }

    /// The attached replay buffer, if one has been attached
    pub fn replay_buffer(&self) -> Option<&ReplayBuffer> {
        self.buffer.get()
    }

    /// The attached replay buffer, attaching an empty one with the given
    /// capacity on first use. The buffer is never replaced once attached.
    pub fn replay_buffer_or_attach(&self, capacity: usize) -> &ReplayBuffer {
        self.buffer.get_or_init(|| ReplayBuffer::new(capacity))
    }
}

impl std::fmt::Debug for OperationContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OperationContext")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("parent", &self.parent.as_ref().map(|p| p.id()))
            .field("stopped", &self.is_stopped())
            .finish()
    }
}

/// Lock, recovering from poisoning: a panic elsewhere must never make
/// logging panic too.
fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_ids() {
        let a = OperationContext::start("op");
        let b = OperationContext::start("op");
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_parent_chain() {
        let root = OperationContext::start("root");
        let child = root.start_child("child");
        let grandchild = child.start_child("grandchild");

        assert!(root.parent().is_none());
        assert_eq!(child.parent().unwrap().id(), root.id());
        assert_eq!(grandchild.parent().unwrap().parent().unwrap().id(), root.id());
    }

    #[test]
    fn test_tags_last_write_wins() {
        let op = OperationContext::start("op");
        op.set_tag("Result", "Success");
        op.set_tag("Result", "SystemError");
        op.set_tag("region", "eu-west");

        assert_eq!(op.tag("Result").as_deref(), Some("SystemError"));
        assert_eq!(op.tags().len(), 2);
        // Lookup is case-sensitive
        assert!(op.tag("result").is_none());
    }

    #[test]
    fn test_baggage_copy_on_create() {
        let root = OperationContext::start("root");
        root.set_baggage("tenant", "acme");

        let child = root.start_child("child");
        assert_eq!(child.baggage("tenant").as_deref(), Some("acme"));

        // Later parent writes are not seen by existing children
        root.set_baggage("late", "value");
        assert!(child.baggage("late").is_none());

        // Child writes never flow upward
        child.set_baggage("child_only", "yes");
        assert!(root.baggage("child_only").is_none());
    }

    #[test]
    fn test_stop_is_idempotent() {
        let op = OperationContext::start("op");
        assert!(!op.is_stopped());
        assert!(op.duration().is_none());

        assert!(op.stop());
        let duration = op.duration().unwrap();
        let stopped_at = op.stopped_at().unwrap();

        std::thread::sleep(std::time::Duration::from_millis(5));
        assert!(!op.stop());
        assert_eq!(op.duration().unwrap(), duration);
        assert_eq!(op.stopped_at().unwrap(), stopped_at);
    }

    #[test]
    fn test_buffer_attached_once() {
        let op = OperationContext::start("op");
        assert!(op.replay_buffer().is_none());

        let first = op.replay_buffer_or_attach(10) as *const _;
        let second = op.replay_buffer_or_attach(99) as *const _;
        assert_eq!(first, second);
        assert_eq!(op.replay_buffer().unwrap().capacity(), 10);
    }
}
