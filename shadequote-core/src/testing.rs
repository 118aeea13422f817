//! Test utilities for applications built on shadequote-core

use crate::store::Middleware;
use crate::Action;

/// Middleware that records the name of every dispatched action.
///
/// Useful in tests for asserting that a handler dispatched the expected
/// action sequence without inspecting intermediate states.
///
/// # Example
///
/// ```ignore
/// let mut store = StoreWithMiddleware::new(state, reducer, RecordingMiddleware::default());
/// store.dispatch(Action::Increment);
/// assert_eq!(store.middleware().names(), &["Increment"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecordingMiddleware {
    names: Vec<&'static str>,
}

impl RecordingMiddleware {
    /// Names of dispatched actions, in dispatch order.
    pub fn names(&self) -> &[&'static str] {
        &self.names
    }

    /// Clear the record and return what was captured so far.
    pub fn drain(&mut self) -> Vec<&'static str> {
        std::mem::take(&mut self.names)
    }
}

impl<A: Action> Middleware<A> for RecordingMiddleware {
    fn before(&mut self, _action: &A) {}

    fn after(&mut self, action: &A, _state_changed: bool) {
        self.names.push(action.name());
    }
}
