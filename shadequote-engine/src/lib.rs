//! Event-driven quote-builder engine for window coverings
//!
//! The engine coordinates a quick-quote grid (width, height, fabric type per
//! row), a fee-summary cascade, and the dialogs and persistence requests
//! around them. It follows a strict unidirectional loop:
//!
//! 1. collaborators publish inbound [`event::AppEvent`]s on the bus;
//! 2. the [`controller`] routes each event to a handler;
//! 3. handlers dispatch [`action::Action`]s into the store, whose pure
//!    [`reducer`] produces the next [`state::AppState`];
//! 4. handlers close with a `StateChanged` snapshot and, where needed,
//!    outbound requests (notifications, dialogs, persistence).
//!
//! Nothing in this crate renders, blocks, or touches the filesystem; all of
//! that lives in collaborators that subscribe to the outbound events.
//!
//! # Getting started
//!
//! ```ignore
//! use shadequote_engine::{ConfigManager, Session};
//!
//! let mut session = Session::new(ConfigManager::default())?;
//! // subscribe renderer/dialog/persistence collaborators on session.bus_mut()
//! session.start();
//! session.run().await;
//! ```

pub mod action;
pub mod calc;
pub mod config;
pub mod controller;
pub mod dialog;
pub mod editing;
pub mod engine;
pub mod error;
pub mod event;
pub mod fabric;
pub mod fees;
pub mod focus;
pub mod product;
pub mod reducer;
pub mod selection;
pub mod session;
pub mod state;
pub mod testkit;
pub mod workflow;

pub use action::{Action, ExcludableFee, FeeField};
pub use config::{ConfigManager, FeeConfig, PriceMatrix};
pub use dialog::{ChoiceId, DialogChoice, DialogRequest, FabricScope, PendingDialog};
pub use engine::{Bus, Engine, QuoteStore};
pub use error::{EngineError, ValidationError};
pub use event::{AppEvent, AppEventTag, Direction, NotificationKind, NumericKey};
pub use session::Session;
pub use state::{ActiveCell, AppState, Column, ProductKey, QuoteData, QuoteItem, Tab};
