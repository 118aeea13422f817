//! Row commands: insert, delete, clear, cycle type, reset
//!
//! Row commands operate on the multi-selection and demand exactly one
//! selected row. Precondition failures become notifications; destructive
//! steps (clear fields, delete via maintenance dialog, reset) go through the
//! request/response dialog protocol in [`crate::dialog`].

use tracing::warn;

use crate::action::Action;
use crate::dialog::{ChoiceId, DialogChoice, DialogRequest, DialogPosition, PendingDialog};
use crate::engine::{notify, publish_state_change, Bus, Engine};
use crate::error::EngineError;
use crate::event::{AppEvent, NotificationKind};
use crate::fabric;
use crate::state::Column;

fn single_selection(
    engine: &Engine,
    none_message: &str,
    multi_message: &str,
) -> Result<usize, EngineError> {
    match engine.state().ui.multi_select.as_slice() {
        [row] => Ok(*row),
        [] => Err(EngineError::SelectionPrecondition(none_message.into())),
        _ => Err(EngineError::SelectionPrecondition(multi_message.into())),
    }
}

/// Insert a blank row below the single selected row.
pub fn handle_insert_row(bus: &Bus, engine: &mut Engine) {
    let row = match single_selection(
        engine,
        "Please select a position to insert the new item.",
        "A new item can only be inserted below a single selection.",
    ) {
        Ok(row) => row,
        Err(err) => {
            notify(bus, engine, err.to_string(), NotificationKind::Error);
            return;
        }
    };

    let items = engine.items();
    if row == items.len() - 1 {
        notify(
            bus,
            engine,
            "Cannot insert after the last row.",
            NotificationKind::Error,
        );
        return;
    }
    if items[row + 1].is_empty() {
        notify(
            bus,
            engine,
            "Cannot insert before an empty row.",
            NotificationKind::Error,
        );
        return;
    }

    engine.dispatch(Action::QuoteInsertRow { after: row });
    engine.dispatch(Action::UiClearMultiSelect);
    engine.dispatch(Action::UiSetActiveCell {
        row: row + 1,
        column: Column::Width,
    });
    engine.dispatch(Action::UiClearInputValue);
    publish_state_change(bus, engine);
}

/// Delete the single selected row.
pub fn handle_delete_row(bus: &Bus, engine: &mut Engine) {
    let row = match single_selection(
        engine,
        "Please select an item to delete.",
        "Only one item can be deleted at a time.",
    ) {
        Ok(row) => row,
        Err(err) => {
            notify(bus, engine, err.to_string(), NotificationKind::Error);
            return;
        }
    };
    delete_row(bus, engine, row);
}

fn delete_row(bus: &Bus, engine: &mut Engine, row: usize) {
    engine.dispatch(Action::QuoteDeleteRow { row });
    engine.dispatch(Action::UiClearMultiSelect);
    engine.dispatch(Action::UiSetSumOutdated(true));
    let Engine { focus, store, .. } = engine;
    focus.focus_after_delete(store);
    publish_state_change(bus, engine);
}

/// Open the row maintenance dialog for the single selected row.
pub fn handle_clear_row(bus: &Bus, engine: &mut Engine) {
    let row = match single_selection(
        engine,
        "Please select a single item to use this function.",
        "Please select a single item to use this function.",
    ) {
        Ok(row) => row,
        Err(err) => {
            notify(bus, engine, err.to_string(), NotificationKind::Error);
            return;
        }
    };

    engine.pending_dialog = Some(PendingDialog::RowMaintenance { row });
    let request = DialogRequest {
        message: format!("Row #{}: What would you like to do?", row + 1),
        choices: vec![
            DialogChoice::new(ChoiceId::ClearFields, "Clear Fields (W,H,Type)"),
            DialogChoice::new(ChoiceId::DeleteRow, "Delete Row"),
            DialogChoice::cancel(),
        ],
        position: DialogPosition::Center,
    };
    bus.publish(engine, &AppEvent::ShowConfirmationDialog(request));
}

/// Type-button tap: rotate every row with both dimensions set to its next
/// fabric type.
pub fn handle_cycle_type(bus: &Bus, engine: &mut Engine) {
    let updates: Vec<(usize, String)> = engine
        .items()
        .iter()
        .enumerate()
        .filter(|(_, item)| item.has_dimensions())
        .filter_map(|(row, item)| {
            engine
                .config
                .next_fabric_type(item.fabric_type.as_deref())
                .map(|code| (row, code.clone()))
        })
        .collect();
    if updates.is_empty() {
        return;
    }

    for (row, code) in updates {
        engine.dispatch(Action::QuoteSetItemType { row, code });
    }
    engine.dispatch(Action::UiSetSumOutdated(true));
    publish_state_change(bus, engine);
}

/// Ask for confirmation before wiping the whole quote.
pub fn handle_reset(bus: &Bus, engine: &mut Engine) {
    engine.pending_dialog = Some(PendingDialog::ResetConfirm);
    let request = DialogRequest {
        message: "This will clear all data. Are you sure?".into(),
        choices: vec![
            DialogChoice::new(ChoiceId::Confirm, "Confirm"),
            DialogChoice::cancel(),
        ],
        position: DialogPosition::Center,
    };
    bus.publish(engine, &AppEvent::ShowConfirmationDialog(request));
}

/// Interpret a dialog choice against the pending dialog record.
///
/// Cancel always closes the dialog without acting. A choice with no matching
/// pending record is a collaborator protocol slip; it is logged and dropped.
pub fn handle_dialog_choice(bus: &Bus, engine: &mut Engine, choice: &ChoiceId) {
    let pending = engine.pending_dialog.take();
    match (pending, choice) {
        (_, ChoiceId::Cancel) => {}
        (Some(PendingDialog::RowMaintenance { row }), ChoiceId::ClearFields) => {
            engine.dispatch(Action::QuoteClearRow { row });
            engine.dispatch(Action::UiClearMultiSelect);
            engine.dispatch(Action::UiSetSumOutdated(true));
            let Engine { focus, store, .. } = engine;
            focus.focus_after_clear(store);
            publish_state_change(bus, engine);
        }
        (Some(PendingDialog::RowMaintenance { row }), ChoiceId::DeleteRow) => {
            delete_row(bus, engine, row);
        }
        (Some(PendingDialog::FabricType { scope }), ChoiceId::Fabric(code)) => {
            fabric::apply_fabric_type(bus, engine, &scope, code.clone());
        }
        (Some(PendingDialog::ResetConfirm), ChoiceId::Confirm) => {
            engine.dispatch(Action::QuoteReset);
            engine.dispatch(Action::UiReset);
            publish_state_change(bus, engine);
            notify(bus, engine, "Quote has been reset.", NotificationKind::Info);
        }
        (pending, choice) => {
            warn!(?pending, ?choice, "dialog choice without a matching pending dialog");
        }
    }
}
