//! Session workflows: focus requests, tab changes, fee toggles, persistence
//!
//! These handlers glue the remaining inbound events to the store and to the
//! persistence collaborator. Persistence itself stays outside the engine:
//! save and export publish outbound requests carrying the document, and a
//! completed load comes back as `FileLoaded`.

use tracing::info;

use crate::action::{Action, ExcludableFee};
use crate::engine::{notify, publish_state_change, Bus, Engine};
use crate::event::{AppEvent, Direction, NotificationKind};
use crate::fees;
use crate::state::{ActiveCell, Column, QuoteData, Tab};

pub fn handle_app_ready(_bus: &Bus, engine: &mut Engine) {
    info!(rows = engine.items().len(), "engine ready");
}

/// Focus request (user navigation or the deferred startup focus). A request
/// for the already-active cell is a no-op, so replays cannot wipe a buffer
/// the user has started typing into.
pub fn handle_focus_cell(bus: &Bus, engine: &mut Engine, row: usize, column: Column) {
    if engine.state().ui.active_cell == Some(ActiveCell { row, column }) {
        return;
    }
    if engine.items().get(row).is_none() {
        return;
    }
    engine.dispatch(Action::UiSetActiveCell { row, column });
    engine.dispatch(Action::UiClearInputValue);
    publish_state_change(bus, engine);
}

/// Re-derive the fee figures after any state change while the fee-summary
/// tab is showing. Publishes a follow-up snapshot only when a figure moved,
/// which bounds the reentrant cascade to a single extra pass.
pub fn handle_state_changed(bus: &Bus, engine: &mut Engine) {
    if engine.state().ui.active_tab != Tab::FeeSummary {
        return;
    }
    if fees::recalculate(engine) {
        publish_state_change(bus, engine);
    }
}

pub fn handle_tab_changed(bus: &Bus, engine: &mut Engine, tab: Tab) {
    let changed = engine.dispatch(Action::UiSetActiveTab(tab));
    if tab == Tab::FeeSummary {
        fees::recalculate(engine);
    } else if !changed {
        return;
    }
    publish_state_change(bus, engine);
}

pub fn handle_move_active_cell(bus: &Bus, engine: &mut Engine, direction: Direction) {
    let Engine { focus, store, .. } = engine;
    focus.move_active_cell(store, direction);
    publish_state_change(bus, engine);
}

pub fn handle_fee_toggle(bus: &Bus, engine: &mut Engine, fee: ExcludableFee) {
    let toggles = &engine.state().ui.fees;
    let excluded = match fee {
        ExcludableFee::Management => toggles.management_fee_excluded,
        ExcludableFee::Design => toggles.design_fee_excluded,
        ExcludableFee::Tax => toggles.tax_excluded,
    };
    engine.dispatch(Action::UiSetFeeExcluded {
        fee,
        excluded: !excluded,
    });
    fees::recalculate(engine);
    publish_state_change(bus, engine);
}

pub fn handle_save_to_file(bus: &Bus, engine: &mut Engine) {
    let quote = engine.state().quote.clone();
    bus.publish(engine, &AppEvent::FileSaveRequested(quote));
}

pub fn handle_export_csv(bus: &Bus, engine: &mut Engine) {
    let quote = engine.state().quote.clone();
    bus.publish(engine, &AppEvent::CsvExportRequested(quote));
}

/// Save the current document, then ask the collaborator to start a load.
pub fn handle_save_then_load(bus: &Bus, engine: &mut Engine) {
    handle_save_to_file(bus, engine);
    bus.publish(engine, &AppEvent::FileLoadRequested);
}

/// A completed load replaces the document wholesale. Selections from the old
/// document are meaningless and the totals have not been recalculated yet.
pub fn handle_file_loaded(bus: &Bus, engine: &mut Engine, data: &QuoteData) {
    engine.dispatch(Action::QuoteReplaceData(data.clone()));
    engine.dispatch(Action::UiClearMultiSelect);
    engine.dispatch(Action::UiSetSumOutdated(true));
    notify(bus, engine, "Quote loaded.", NotificationKind::Info);
    publish_state_change(bus, engine);
}
