//! The dispatch table
//!
//! One exhaustive match from event to handler. Adding an `AppEvent` variant
//! without routing it is a compile error; forgetting to subscribe the router
//! to a tag is caught by `verify_wiring` at startup.

use shadequote_core::HandlerResult;

use crate::engine::{Bus, Engine};
use crate::error::EngineError;
use crate::event::{AppEvent, AppEventTag};
use crate::{calc, editing, fabric, selection, workflow};

/// Route one event to its handler.
pub fn route(bus: &Bus, engine: &mut Engine, event: &AppEvent) -> HandlerResult {
    match event {
        AppEvent::AppReady => workflow::handle_app_ready(bus, engine),
        AppEvent::FocusCell { row, column } => {
            workflow::handle_focus_cell(bus, engine, *row, *column);
        }
        AppEvent::StateChanged(_) => workflow::handle_state_changed(bus, engine),

        AppEvent::NumericKeyPressed { key } => selection::handle_numeric_key(bus, engine, *key),
        AppEvent::TableCellClicked { row, column } => {
            selection::handle_table_cell_click(bus, engine, *row, *column);
        }
        AppEvent::SequenceCellClicked { row } => {
            selection::handle_sequence_cell_click(bus, engine, *row);
        }

        AppEvent::InsertRowClicked => editing::handle_insert_row(bus, engine),
        AppEvent::DeleteRowClicked => editing::handle_delete_row(bus, engine),
        AppEvent::ClearRowClicked => editing::handle_clear_row(bus, engine),
        AppEvent::CycleTypeClicked => editing::handle_cycle_type(bus, engine),
        AppEvent::DialogChoiceSelected { choice } => {
            editing::handle_dialog_choice(bus, engine, choice);
        }
        AppEvent::ResetClicked => editing::handle_reset(bus, engine),

        AppEvent::TypeCellLongPress { row } => {
            fabric::handle_type_cell_long_press(bus, engine, *row);
        }
        AppEvent::TypeButtonLongPress => fabric::handle_type_button_long_press(bus, engine),
        AppEvent::MultiTypeSetRequested => fabric::handle_multi_type_set(bus, engine),

        AppEvent::CalculateSumClicked => calc::handle_calculate_sum(bus, engine),
        AppEvent::MoveActiveCell { direction } => {
            workflow::handle_move_active_cell(bus, engine, *direction);
        }
        AppEvent::RightPanelTabChanged { tab } => workflow::handle_tab_changed(bus, engine, *tab),
        AppEvent::FeeExclusionToggled { fee } => workflow::handle_fee_toggle(bus, engine, *fee),

        AppEvent::SaveToFileClicked => workflow::handle_save_to_file(bus, engine),
        AppEvent::ExportCsvClicked => workflow::handle_export_csv(bus, engine),
        AppEvent::SaveThenLoadClicked => workflow::handle_save_then_load(bus, engine),
        AppEvent::FileLoaded(data) => workflow::handle_file_loaded(bus, engine, data),

        // Outbound requests are consumed by collaborators, not by the engine.
        AppEvent::ShowNotification { .. }
        | AppEvent::ShowConfirmationDialog(_)
        | AppEvent::FileSaveRequested(_)
        | AppEvent::CsvExportRequested(_)
        | AppEvent::FileLoadRequested => {}
    }
    Ok(())
}

/// Subscribe the router to every inbound tag.
pub fn wire(bus: &mut Bus) {
    for tag in AppEventTag::ALL.iter().copied().filter(|t| t.is_inbound()) {
        bus.subscribe(tag, |bus, engine, event| route(bus, engine, event));
    }
}

/// Startup integrity check: every inbound tag must have at least one
/// subscriber.
pub fn verify_wiring(bus: &Bus) -> Result<(), EngineError> {
    for tag in AppEventTag::ALL.iter().copied().filter(|t| t.is_inbound()) {
        if bus.subscriber_count(tag) == 0 {
            return Err(EngineError::Configuration(format!(
                "no subscriber for inbound event {tag:?}"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::NumericKey;
    use crate::state::{Column, Tab};
    use crate::testkit::OutboundLog;
    use shadequote_core::BusEvent;

    fn wired() -> (Bus, Engine, OutboundLog) {
        let mut bus = Bus::new();
        wire(&mut bus);
        let log = OutboundLog::attach(&mut bus);
        (bus, Engine::default(), log)
    }

    #[test]
    fn wiring_covers_every_inbound_tag() {
        // A bare wired bus, so no test recorder inflates the counts.
        let mut bus = Bus::new();
        wire(&mut bus);
        assert!(verify_wiring(&bus).is_ok());
        for tag in AppEventTag::ALL.iter().copied().filter(|t| t.is_inbound()) {
            assert_eq!(bus.subscriber_count(tag), 1, "missing subscriber: {tag:?}");
        }
    }

    #[test]
    fn empty_bus_fails_the_wiring_check() {
        let bus = Bus::new();
        assert!(matches!(
            verify_wiring(&bus),
            Err(EngineError::Configuration(_))
        ));
    }

    #[test]
    fn events_flow_through_the_router() {
        let (bus, mut engine, _log) = wired();
        bus.publish(
            &mut engine,
            &AppEvent::TableCellClicked {
                row: 0,
                column: Column::Width,
            },
        );
        for key in [NumericKey::Digit(8), NumericKey::Digit(0), NumericKey::Digit(0)] {
            bus.publish(&mut engine, &AppEvent::NumericKeyPressed { key });
        }
        bus.publish(
            &mut engine,
            &AppEvent::NumericKeyPressed {
                key: NumericKey::Enter,
            },
        );

        assert_eq!(engine.items()[0].width, Some(800));
    }

    #[test]
    fn fee_cascade_settles_through_the_bus() {
        let (bus, mut engine, log) = wired();
        bus.publish(
            &mut engine,
            &AppEvent::RightPanelTabChanged {
                tab: Tab::FeeSummary,
            },
        );

        // Tab switch publishes one snapshot; the wired StateChanged handler
        // reruns the cascade, finds it converged, and stays quiet.
        assert_eq!(log.state_change_count(), 1);
        assert_eq!(engine.state().ui.fees.management_fee, 20.0);
    }

    #[test]
    fn routing_an_outbound_request_is_a_clean_no_op() {
        let (bus, mut engine, log) = wired();
        let event = AppEvent::FileLoadRequested;
        assert!(!event.tag().is_inbound());
        assert!(route(&bus, &mut engine, &event).is_ok());
        assert!(log.events().is_empty());
    }
}
