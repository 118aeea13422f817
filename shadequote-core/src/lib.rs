//! Core infrastructure for the shadequote engine
//!
//! This crate provides the business-agnostic building blocks for an
//! event-driven application with centralized state management, following a
//! Redux-inspired architecture:
//!
//! - **Action**: values that describe state changes
//! - **Store**: single owner of the state tree with a pure reducer
//! - **EventBus**: synchronous pub/sub routing with error isolation
//! - **Scheduler**: delayed single-shot continuations with cancellation
//!
//! # Basic Example
//!
//! ```ignore
//! use shadequote_core::prelude::*;
//!
//! #[derive(Clone, Debug)]
//! enum MyAction {
//!     Increment,
//!     Decrement,
//! }
//!
//! impl Action for MyAction {
//!     fn name(&self) -> &'static str {
//!         match self {
//!             MyAction::Increment => "Increment",
//!             MyAction::Decrement => "Decrement",
//!         }
//!     }
//! }
//!
//! #[derive(Clone, Debug, Default, PartialEq)]
//! struct AppState {
//!     counter: i32,
//! }
//!
//! fn reducer(state: &AppState, action: MyAction) -> AppState {
//!     let mut next = state.clone();
//!     match action {
//!         MyAction::Increment => next.counter += 1,
//!         MyAction::Decrement => next.counter -= 1,
//!     }
//!     next
//! }
//!
//! let mut store = Store::new(AppState::default(), reducer);
//! store.dispatch(MyAction::Increment);
//! assert_eq!(store.state().counter, 1);
//! ```
//!
//! # Event routing
//!
//! Events flow through an [`EventBus`] that delivers to subscribers
//! synchronously, in subscription order. Handlers receive the bus itself plus
//! a mutable context value, so a handler can publish further events as an
//! ordinary nested call. Subscription requires `&mut` access to the bus and
//! is therefore only possible during wiring, never mid-publish.

pub mod action;
pub mod bus;
pub mod sched;
pub mod store;
pub mod testing;

// Core trait exports
pub use action::Action;

// Event system exports
pub use bus::{BusEvent, EventBus, Handler, HandlerResult};

// Store exports
pub use store::{
    LoggingMiddleware, Middleware, NoopMiddleware, Reducer, Store, StoreWithMiddleware,
};

// Scheduler exports
pub use sched::{ScheduleKey, Scheduler};

// Testing exports
pub use testing::RecordingMiddleware;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::action::Action;
    pub use crate::bus::{BusEvent, EventBus, Handler, HandlerResult};
    pub use crate::sched::{ScheduleKey, Scheduler};
    pub use crate::store::{
        LoggingMiddleware, Middleware, NoopMiddleware, Reducer, Store, StoreWithMiddleware,
    };
}
