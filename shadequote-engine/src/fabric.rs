//! Fabric type assignment
//!
//! Three entry points share one dialog: a long press on a type cell (one
//! row), a long press on the type button (every eligible row), and the
//! multi-set command (the current multi-selection). The picked code is
//! applied according to the scope recorded in the pending dialog.

use tracing::error;

use crate::action::Action;
use crate::dialog::{
    ChoiceId, DialogChoice, DialogPosition, DialogRequest, FabricScope, PendingDialog,
};
use crate::engine::{notify, publish_state_change, Bus, Engine};
use crate::event::{AppEvent, NotificationKind};
use crate::state::FabricCode;

/// Long press on one row's type cell.
pub fn handle_type_cell_long_press(bus: &Bus, engine: &mut Engine, row: usize) {
    let Some(item) = engine.items().get(row) else {
        return;
    };
    if !item.has_any_dimension() {
        notify(
            bus,
            engine,
            "Cannot set type for an empty row.",
            NotificationKind::Error,
        );
        return;
    }
    open_fabric_dialog(
        bus,
        engine,
        FabricScope::Row(row),
        format!("Set fabric type for Row #{}:", row + 1),
    );
}

/// Long press on the type button: target every row with both dimensions.
pub fn handle_type_button_long_press(bus: &Bus, engine: &mut Engine) {
    open_fabric_dialog(
        bus,
        engine,
        FabricScope::AllEligible,
        "Set fabric type for ALL rows:".into(),
    );
}

/// Multi-set command: target the current multi-selection.
pub fn handle_multi_type_set(bus: &Bus, engine: &mut Engine) {
    let selection = engine.state().ui.multi_select.clone();
    if selection.len() < 2 {
        notify(
            bus,
            engine,
            "Please select multiple items first.",
            NotificationKind::Error,
        );
        return;
    }
    let count = selection.len();
    open_fabric_dialog(
        bus,
        engine,
        FabricScope::Selection(selection),
        format!("Set fabric type for {count} selected rows:"),
    );
}

fn open_fabric_dialog(bus: &Bus, engine: &mut Engine, scope: FabricScope, message: String) {
    let sequence = engine.config.fabric_type_sequence();
    if sequence.is_empty() {
        error!("fabric type sequence is empty");
        notify(
            bus,
            engine,
            "No fabric types configured.",
            NotificationKind::Error,
        );
        return;
    }

    let mut choices: Vec<DialogChoice> = sequence
        .iter()
        .map(|code| {
            let name = engine
                .config
                .price_matrix(code)
                .map_or("Unknown", |matrix| matrix.name.as_str());
            DialogChoice::new(ChoiceId::Fabric(code.clone()), code.clone()).with_detail(name)
        })
        .collect();
    choices.push(DialogChoice::cancel());

    engine.pending_dialog = Some(PendingDialog::FabricType { scope });
    let request = DialogRequest {
        message,
        choices,
        position: DialogPosition::BottomThird,
    };
    bus.publish(engine, &AppEvent::ShowConfirmationDialog(request));
}

/// Apply a picked fabric code to the recorded scope.
pub fn apply_fabric_type(bus: &Bus, engine: &mut Engine, scope: &FabricScope, code: FabricCode) {
    match scope {
        FabricScope::Row(row) => {
            engine.dispatch(Action::QuoteSetItemType { row: *row, code });
        }
        FabricScope::AllEligible => {
            engine.dispatch(Action::QuoteSetAllTypes { code });
        }
        FabricScope::Selection(rows) => {
            engine.dispatch(Action::QuoteSetTypesForRows {
                rows: rows.clone(),
                code,
            });
            engine.dispatch(Action::UiClearMultiSelect);
        }
    }
    engine.dispatch(Action::UiSetSumOutdated(true));
    publish_state_change(bus, engine);
}
