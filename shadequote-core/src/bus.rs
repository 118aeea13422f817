//! Synchronous event bus with ordered delivery and error isolation
//!
//! The bus is a pure routing table: it maps event tags to ordered handler
//! lists and holds no business state. Publishing delivers to every subscriber
//! for the event's tag, synchronously, in subscription order.
//!
//! Handlers receive `(&bus, &mut ctx, &event)`. The context is the single
//! owner of mutable application state; handing it through the bus means no
//! component ever needs a shared mutable reference. Because `publish` only
//! takes `&self`, a handler may publish further events reentrantly as an
//! ordinary nested call. `subscribe` takes `&mut self`, so registration is
//! confined to the wiring phase and can never interleave with delivery.
//!
//! A failing handler must not prevent later handlers for the same publish
//! from running: failures are logged via `tracing` and delivery continues.
//! This policy is decided here, once, for every subscriber.

use std::collections::HashMap;
use std::error::Error;
use std::hash::Hash;

use tracing::{error, trace};

/// An event that can be routed by the bus.
///
/// Every event maps to a statically enumerable tag; the tag is the
/// subscription key. Typically the event is an enum and the tag is a
/// field-less mirror of its variants.
pub trait BusEvent: std::fmt::Debug {
    /// Subscription key type.
    type Tag: Copy + Eq + Hash + std::fmt::Debug + 'static;

    /// The tag this event is routed under.
    fn tag(&self) -> Self::Tag;
}

/// Result type for event handlers.
///
/// User-facing errors should be converted to notifications at the point of
/// detection; an `Err` here signals a genuine fault, which the bus logs
/// before continuing with the remaining handlers.
pub type HandlerResult = Result<(), Box<dyn Error>>;

/// A subscribed event handler.
pub type Handler<C, E> = Box<dyn Fn(&EventBus<C, E>, &mut C, &E) -> HandlerResult>;

/// Event bus that manages subscriptions and dispatches events
///
/// Generic over:
/// - `C`: the context type handed to every handler (owns mutable state)
/// - `E`: the event type (must implement [`BusEvent`])
pub struct EventBus<C, E: BusEvent> {
    /// Subscriptions: event tag -> ordered list of handlers
    subscriptions: HashMap<E::Tag, Vec<Handler<C, E>>>,
}

impl<C, E: BusEvent> Default for EventBus<C, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C, E: BusEvent> EventBus<C, E> {
    /// Create a new event bus with no subscriptions.
    pub fn new() -> Self {
        Self {
            subscriptions: HashMap::new(),
        }
    }

    /// Subscribe a handler to an event tag.
    ///
    /// Handlers for the same tag are invoked in subscription order.
    pub fn subscribe<F>(&mut self, tag: E::Tag, handler: F)
    where
        F: Fn(&EventBus<C, E>, &mut C, &E) -> HandlerResult + 'static,
    {
        self.subscriptions
            .entry(tag)
            .or_default()
            .push(Box::new(handler));
    }

    /// Publish an event to every subscriber of its tag.
    ///
    /// Delivery is synchronous and in subscription order. A handler that
    /// returns `Err` is logged and does not stop delivery to the remaining
    /// handlers. Returns the number of handlers invoked.
    pub fn publish(&self, ctx: &mut C, event: &E) -> usize {
        let tag = event.tag();
        let Some(handlers) = self.subscriptions.get(&tag) else {
            trace!(?tag, "no subscribers for event");
            return 0;
        };

        for handler in handlers {
            if let Err(err) = handler(self, ctx, event) {
                error!(?tag, %err, "event handler failed; continuing delivery");
            }
        }
        handlers.len()
    }

    /// Number of handlers subscribed to a tag.
    pub fn subscriber_count(&self, tag: E::Tag) -> usize {
        self.subscriptions.get(&tag).map_or(0, Vec::len)
    }
}
