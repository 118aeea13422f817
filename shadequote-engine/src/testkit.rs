//! Test doubles for handler-level tests
//!
//! Collaborator surfaces (renderer, notification toast, dialog overlay,
//! persistence) live outside this crate. Tests stand in for all of them with
//! a recording subscriber on the outbound tags.

use std::cell::RefCell;
use std::rc::Rc;

use crate::dialog::DialogRequest;
use crate::engine::Bus;
use crate::event::{AppEvent, AppEventTag, NotificationKind};

/// Records every outbound event (plus `StateChanged`) published on a bus.
#[derive(Clone)]
pub struct OutboundLog {
    events: Rc<RefCell<Vec<AppEvent>>>,
}

impl OutboundLog {
    /// Subscribe a recorder to every collaborator-facing tag on `bus`.
    pub fn attach(bus: &mut Bus) -> Self {
        let events = Rc::new(RefCell::new(Vec::new()));
        let tags = [
            AppEventTag::StateChanged,
            AppEventTag::ShowNotification,
            AppEventTag::ShowConfirmationDialog,
            AppEventTag::FileSaveRequested,
            AppEventTag::CsvExportRequested,
            AppEventTag::FileLoadRequested,
        ];
        for tag in tags {
            let sink = Rc::clone(&events);
            bus.subscribe(tag, move |_, _, event| {
                sink.borrow_mut().push(event.clone());
                Ok(())
            });
        }
        Self { events }
    }

    /// Everything recorded so far, in publish order.
    pub fn events(&self) -> Vec<AppEvent> {
        self.events.borrow().clone()
    }

    /// Drop everything recorded so far.
    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    /// All notifications, as `(message, kind)` pairs.
    pub fn notifications(&self) -> Vec<(String, NotificationKind)> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                AppEvent::ShowNotification { message, kind } => {
                    Some((message.clone(), *kind))
                }
                _ => None,
            })
            .collect()
    }

    /// All dialog requests.
    pub fn dialogs(&self) -> Vec<DialogRequest> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                AppEvent::ShowConfirmationDialog(request) => Some(request.clone()),
                _ => None,
            })
            .collect()
    }

    /// How many `StateChanged` snapshots were published.
    pub fn state_change_count(&self) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|event| matches!(event, AppEvent::StateChanged(_)))
            .count()
    }

    /// Tags of everything recorded, for order assertions.
    pub fn tags(&self) -> Vec<AppEventTag> {
        use shadequote_core::BusEvent;
        self.events.borrow().iter().map(BusEvent::tag).collect()
    }
}
