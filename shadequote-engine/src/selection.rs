//! Selection and numeric-input handling
//!
//! Active-cell focus and multi-row selection are independent axes in the
//! state, but row commands treat them as mutually exclusive inputs: a direct
//! cell click always clears the multi-selection, while sequence-indicator
//! clicks never touch the active cell.

use tracing::error;

use crate::action::Action;
use crate::engine::{notify, publish_state_change, Bus, Engine};
use crate::event::{NotificationKind, NumericKey};
use crate::state::Column;

/// Sequence-indicator click: toggle the row's multi-select membership.
///
/// The trailing placeholder row cannot be selected while it is still empty;
/// it is not a real item yet.
pub fn handle_sequence_cell_click(bus: &Bus, engine: &mut Engine, row: usize) {
    let items = engine.items();
    let Some(item) = items.get(row) else {
        return;
    };
    let last_row_empty = row == items.len() - 1 && !item.has_any_dimension();
    if last_row_empty {
        notify(
            bus,
            engine,
            "Cannot select the final empty row.",
            NotificationKind::Error,
        );
        return;
    }

    engine.dispatch(Action::UiToggleMultiSelect { row });
    publish_state_change(bus, engine);
}

/// Direct cell click: focus for editing (width/height) or cycle the fabric
/// type in place (type column).
pub fn handle_table_cell_click(bus: &Bus, engine: &mut Engine, row: usize, column: Column) {
    let Some(item) = engine.items().get(row) else {
        return;
    };
    let current_value = item.value(column);
    let current_type = item.fabric_type.clone();

    engine.dispatch(Action::UiClearMultiSelect);
    engine.dispatch(Action::UiSetActiveCell { row, column });

    match column {
        Column::Width | Column::Height => {
            let seed = current_value.map_or(String::new(), |v| v.to_string());
            engine.dispatch(Action::UiSetInputValue(seed));
        }
        Column::Type => match engine.config.next_fabric_type(current_type.as_deref()) {
            Some(code) => {
                let code = code.clone();
                engine.dispatch(Action::QuoteSetItemType { row, code });
                engine.dispatch(Action::UiSetSumOutdated(true));
            }
            None => {
                error!("fabric type sequence is empty");
                notify(
                    bus,
                    engine,
                    "No fabric types configured.",
                    NotificationKind::Error,
                );
            }
        },
    }
    publish_state_change(bus, engine);
}

/// Numeric pad input while a cell is active.
pub fn handle_numeric_key(bus: &Bus, engine: &mut Engine, key: NumericKey) {
    match key {
        NumericKey::Digit(digit) => {
            engine.dispatch(Action::UiAppendInputDigit(digit));
        }
        NumericKey::Del => {
            engine.dispatch(Action::UiDeleteLastInputChar);
        }
        NumericKey::W => {
            let Engine { focus, store, .. } = engine;
            focus.focus_first_empty_cell(store, Column::Width);
        }
        NumericKey::H => {
            let Engine { focus, store, .. } = engine;
            focus.focus_first_empty_cell(store, Column::Height);
        }
        NumericKey::Enter => {
            commit_value(bus, engine);
            return;
        }
    }
    publish_state_change(bus, engine);
}

/// Validate the buffered value against the product rule and write it.
///
/// Rejected input clears the buffer but keeps the active cell, so the user
/// can retype immediately. An empty buffer commits as "clear the cell".
fn commit_value(bus: &Bus, engine: &mut Engine) {
    let ui = &engine.state().ui;
    let Some(cell) = ui.active_cell else {
        return;
    };
    let column = ui.input_mode.unwrap_or(cell.column);
    if column == Column::Type {
        return;
    }
    let raw = ui.input_value.clone();

    let product = engine.state().quote.current_product;
    let rule = match engine.products.strategy(product) {
        Ok(strategy) => strategy.validation_rule(column).cloned(),
        Err(err) => {
            error!(%err, "cannot commit without a product strategy");
            notify(bus, engine, err.to_string(), NotificationKind::Error);
            return;
        }
    };

    let value = if raw.is_empty() {
        None
    } else {
        match raw.parse::<u32>() {
            Ok(v) if rule.as_ref().map_or(true, |r| r.contains(v)) => Some(v),
            _ => {
                let message = rule.map_or_else(
                    || format!("'{raw}' is not a valid value."),
                    |r| r.message(),
                );
                notify(bus, engine, message, NotificationKind::Error);
                engine.dispatch(Action::UiClearInputValue);
                publish_state_change(bus, engine);
                return;
            }
        }
    };

    engine.dispatch(Action::QuoteUpdateItemValue {
        row: cell.row,
        column,
        value,
    });
    engine.dispatch(Action::UiSetSumOutdated(true));

    let Engine { focus, store, .. } = engine;
    focus.focus_after_commit(store);
    publish_state_change(bus, engine);
}
