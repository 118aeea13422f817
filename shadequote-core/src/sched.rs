//! Delayed single-shot continuations with cancellation
//!
//! The engine core is synchronous; the only time-based deferral it needs is
//! "deliver this event after a fixed delay, unless something cancels it
//! first" (letting a render pass complete before requesting initial focus,
//! for example). The scheduler models that as an explicit delayed payload
//! with a per-key cancellation handle.
//!
//! # Example
//!
//! ```ignore
//! use shadequote_core::sched::{ScheduleKey, Scheduler};
//! use std::time::Duration;
//!
//! let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
//! let mut sched = Scheduler::new(tx);
//!
//! // Deliver after 100ms; scheduling the same key again supersedes this one
//! sched.schedule("initial-focus", Duration::from_millis(100), Event::FocusFirstCell);
//!
//! // Teardown cancels everything still pending
//! sched.cancel_all();
//! ```

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::{AbortHandle, JoinHandle};

/// Identifies a pending continuation for cancellation and replacement.
///
/// Continuations with the same key are mutually exclusive - scheduling under
/// a key that is already pending supersedes the pending one.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ScheduleKey(String);

impl ScheduleKey {
    /// Create a new schedule key.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the key name.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for ScheduleKey {
    fn from(s: &'static str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ScheduleKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Schedules payloads for delayed delivery over a channel.
///
/// The scheduler keeps a registry of pending deliveries by key. Scheduling
/// under a key that is already pending cancels the pending delivery before
/// the new one is registered, so at most one delivery per key is ever in
/// flight. Dropping the scheduler cancels everything.
///
/// # Type Parameters
///
/// - `T`: The payload type delivered when the delay expires
pub struct Scheduler<T> {
    pending: HashMap<ScheduleKey, AbortHandle>,
    tx: mpsc::UnboundedSender<T>,
}

impl<T> Scheduler<T>
where
    T: Send + 'static,
{
    /// Create a new scheduler delivering over `tx`.
    pub fn new(tx: mpsc::UnboundedSender<T>) -> Self {
        Self {
            pending: HashMap::new(),
            tx,
        }
    }

    /// Schedule a payload for delivery after `delay`.
    ///
    /// Any pending delivery under the same key is cancelled first. If the
    /// delivery is cancelled before the delay expires, nothing is sent.
    pub fn schedule(&mut self, key: impl Into<ScheduleKey>, delay: Duration, payload: T) {
        let key = key.into();
        self.cancel(&key);

        let tx = self.tx.clone();
        let handle: JoinHandle<()> = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(payload);
        });

        self.pending.insert(key, handle.abort_handle());
    }

    /// Cancel a pending delivery by key.
    ///
    /// If nothing is pending under the key, this is a no-op.
    pub fn cancel(&mut self, key: &ScheduleKey) {
        if let Some(handle) = self.pending.remove(key) {
            handle.abort();
        }
    }

    /// Cancel every pending delivery.
    ///
    /// Useful for cleanup on shutdown.
    pub fn cancel_all(&mut self) {
        for (_, handle) in self.pending.drain() {
            handle.abort();
        }
    }

    /// Check whether a delivery is pending under the given key.
    ///
    /// This reflects whether the key has been cancelled or superseded, not
    /// whether the delay has already expired.
    pub fn is_pending(&self, key: &ScheduleKey) -> bool {
        self.pending.contains_key(key)
    }

    /// Number of registered deliveries.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Check whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl<T> Drop for Scheduler<T> {
    fn drop(&mut self) {
        for (_, handle) in self.pending.drain() {
            handle.abort();
        }
    }
}
