//! The engine context: single owner of mutable state
//!
//! Every bus handler receives `&mut Engine`. Components never hold shared
//! mutable references; they read the store snapshot and dispatch actions.

use shadequote_core::{EventBus, LoggingMiddleware, StoreWithMiddleware};

use crate::action::Action;
use crate::config::ConfigManager;
use crate::dialog::PendingDialog;
use crate::event::{AppEvent, NotificationKind};
use crate::focus::{FocusService, StandardFocusService};
use crate::product::ProductFactory;
use crate::reducer::reducer;
use crate::state::{AppState, QuoteItem};

/// The store type used throughout the engine.
pub type QuoteStore = StoreWithMiddleware<AppState, Action, LoggingMiddleware>;

/// The bus type used throughout the engine.
pub type Bus = EventBus<Engine, AppEvent>;

pub struct Engine {
    pub store: QuoteStore,
    pub config: ConfigManager,
    pub products: ProductFactory,
    pub focus: Box<dyn FocusService>,
    /// What the currently open choice dialog is about, if any.
    pub pending_dialog: Option<PendingDialog>,
}

impl Engine {
    /// An engine over a blank quote with the standard product line-up and
    /// focus policy.
    pub fn new(config: ConfigManager) -> Self {
        Self::with_state(AppState::default(), config)
    }

    pub fn with_state(state: AppState, config: ConfigManager) -> Self {
        Self {
            store: StoreWithMiddleware::new(state, reducer, LoggingMiddleware::new()),
            config,
            products: ProductFactory::standard(),
            focus: Box::new(StandardFocusService),
            pending_dialog: None,
        }
    }

    pub fn state(&self) -> &AppState {
        self.store.state()
    }

    /// Items of the current product.
    pub fn items(&self) -> &[QuoteItem] {
        self.state().items()
    }

    pub fn dispatch(&mut self, action: Action) -> bool {
        self.store.dispatch(action)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(ConfigManager::default())
    }
}

/// Publish a `StateChanged` carrying the current snapshot. The store never
/// publishes by itself; this is the engine layer's explicit closing step
/// after a batch of dispatches.
pub fn publish_state_change(bus: &Bus, engine: &mut Engine) {
    let snapshot = Box::new(engine.state().clone());
    bus.publish(engine, &AppEvent::StateChanged(snapshot));
}

/// Publish a user-facing notification.
pub fn notify(bus: &Bus, engine: &mut Engine, message: impl Into<String>, kind: NotificationKind) {
    bus.publish(
        engine,
        &AppEvent::ShowNotification {
            message: message.into(),
            kind,
        },
    );
}
