//! Session lifecycle: wiring, startup, the event queue, teardown
//!
//! A session owns the bus, the engine, and the delayed-delivery scheduler.
//! Collaborators feed events through the session's queue sender; the session
//! pumps the queue into the bus. Startup clears any leftover selection,
//! announces readiness, and defers the initial focus request long enough for
//! the first render to land.

use std::time::Duration;

use tokio::sync::mpsc;
use tracing::debug;

use shadequote_core::Scheduler;

use crate::action::Action;
use crate::config::ConfigManager;
use crate::controller;
use crate::engine::{Bus, Engine};
use crate::error::EngineError;
use crate::event::AppEvent;
use crate::state::{AppState, Column};

const INITIAL_FOCUS_KEY: &str = "initial-focus";
const INITIAL_FOCUS_DELAY: Duration = Duration::from_millis(100);

pub struct Session {
    bus: Bus,
    engine: Engine,
    scheduler: Scheduler<AppEvent>,
    queue_tx: mpsc::UnboundedSender<AppEvent>,
    queue_rx: mpsc::UnboundedReceiver<AppEvent>,
}

impl Session {
    /// Build a fully wired session. Fails if the dispatch table leaves an
    /// inbound event without a subscriber.
    pub fn new(config: ConfigManager) -> Result<Self, EngineError> {
        let mut bus = Bus::new();
        controller::wire(&mut bus);
        controller::verify_wiring(&bus)?;

        let (queue_tx, queue_rx) = mpsc::unbounded_channel();
        Ok(Self {
            bus,
            engine: Engine::new(config),
            scheduler: Scheduler::new(queue_tx.clone()),
            queue_tx,
            queue_rx,
        })
    }

    pub fn state(&self) -> &AppState {
        self.engine.state()
    }

    /// Sender collaborators use to feed events into the session.
    pub fn sender(&self) -> mpsc::UnboundedSender<AppEvent> {
        self.queue_tx.clone()
    }

    /// Subscribe an outbound collaborator (renderer, dialog surface,
    /// persistence). Must happen before `start`.
    pub fn bus_mut(&mut self) -> &mut Bus {
        &mut self.bus
    }

    /// Run the startup sequence: drop stale selection state, announce
    /// readiness, and schedule the deferred initial focus.
    pub fn start(&mut self) {
        self.engine.dispatch(Action::UiClearMultiSelect);
        self.deliver(&AppEvent::AppReady);
        self.scheduler.schedule(
            INITIAL_FOCUS_KEY,
            INITIAL_FOCUS_DELAY,
            AppEvent::FocusCell {
                row: 0,
                column: Column::Width,
            },
        );
    }

    /// Deliver one event synchronously.
    pub fn deliver(&mut self, event: &AppEvent) -> usize {
        self.bus.publish(&mut self.engine, event)
    }

    /// Deliver everything currently sitting in the queue, without waiting.
    pub fn pump_pending(&mut self) -> usize {
        let mut delivered = 0;
        while let Ok(event) = self.queue_rx.try_recv() {
            self.deliver(&event);
            delivered += 1;
        }
        delivered
    }

    /// Pump the queue until it closes. The loop ends when every sender
    /// (including the scheduler's) is gone.
    pub async fn run(&mut self) {
        while let Some(event) = self.queue_rx.recv().await {
            self.deliver(&event);
        }
        debug!("event queue closed; session loop ending");
    }

    /// Cancel pending deferred deliveries. Queued events stay deliverable.
    pub fn shutdown(&mut self) {
        self.scheduler.cancel_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ActiveCell;

    #[tokio::test]
    async fn startup_defers_the_initial_focus() {
        let mut session = Session::new(ConfigManager::default()).expect("wired session");
        session.start();
        assert_eq!(session.state().ui.active_cell, None);

        // Nothing to pump until the delay expires.
        assert_eq!(session.pump_pending(), 0);

        tokio::time::sleep(INITIAL_FOCUS_DELAY + Duration::from_millis(50)).await;
        assert_eq!(session.pump_pending(), 1);
        assert_eq!(
            session.state().ui.active_cell,
            Some(ActiveCell {
                row: 0,
                column: Column::Width
            })
        );
    }

    #[tokio::test]
    async fn shutdown_cancels_the_deferred_focus() {
        let mut session = Session::new(ConfigManager::default()).expect("wired session");
        session.start();
        session.shutdown();

        tokio::time::sleep(INITIAL_FOCUS_DELAY + Duration::from_millis(50)).await;
        assert_eq!(session.pump_pending(), 0);
        assert_eq!(session.state().ui.active_cell, None);
    }

    #[tokio::test]
    async fn queued_events_flow_through_the_wired_bus() {
        let mut session = Session::new(ConfigManager::default()).expect("wired session");
        session.start();

        let sender = session.sender();
        sender
            .send(AppEvent::TableCellClicked {
                row: 1,
                column: Column::Height,
            })
            .expect("queue open");

        assert_eq!(session.pump_pending(), 1);
        assert_eq!(
            session.state().ui.active_cell,
            Some(ActiveCell {
                row: 1,
                column: Column::Height
            })
        );
    }

    #[tokio::test]
    async fn restarting_supersedes_the_pending_focus() {
        let mut session = Session::new(ConfigManager::default()).expect("wired session");
        session.start();
        session.start();

        tokio::time::sleep(INITIAL_FOCUS_DELAY + Duration::from_millis(50)).await;
        // One focus event, not two.
        assert_eq!(session.pump_pending(), 1);
    }
}
