//! Reducer - pure function: (state, action) -> new state
//!
//! Every transition produces a brand-new `AppState`; nothing is mutated in
//! place from the caller's perspective. The match is exhaustive over the
//! action enum, so there is no runtime "unknown action" path.

use crate::action::{Action, ExcludableFee, FeeField};
use crate::state::{AppState, Column, QuoteItem, UiState};

/// The reducer handles all state transitions.
pub fn reducer(state: &AppState, action: Action) -> AppState {
    let mut next = state.clone();
    match action {
        // ===== Quote document =====
        Action::QuoteInsertRow { after } => {
            let items = &mut next.quote.current_mut().items;
            if after < items.len() {
                items.insert(after + 1, QuoteItem::default());
            }
        }

        Action::QuoteDeleteRow { row } => {
            let items = &mut next.quote.current_mut().items;
            if row < items.len() {
                items.remove(row);
                if items.is_empty() {
                    items.push(QuoteItem::default());
                }
            }
            prune_selection(&mut next);
        }

        Action::QuoteClearRow { row } => {
            let items = &mut next.quote.current_mut().items;
            if let Some(item) = items.get_mut(row) {
                *item = QuoteItem::default();
            }
        }

        Action::QuoteUpdateItemValue { row, column, value } => {
            let items = &mut next.quote.current_mut().items;
            if let Some(item) = items.get_mut(row) {
                match column {
                    Column::Width => item.width = value,
                    Column::Height => item.height = value,
                    // Fabric types go through the dedicated type actions.
                    Column::Type => {}
                }
                // Keep a blank trailing row as the entry point for the
                // next item.
                let last = items.len() - 1;
                if row == last && !items[last].is_empty() {
                    items.push(QuoteItem::default());
                }
            }
        }

        Action::QuoteSetItemType { row, code } => {
            let items = &mut next.quote.current_mut().items;
            if let Some(item) = items.get_mut(row) {
                item.fabric_type = Some(code);
            }
        }

        Action::QuoteSetAllTypes { code } => {
            for item in &mut next.quote.current_mut().items {
                if item.has_dimensions() {
                    item.fabric_type = Some(code.clone());
                }
            }
        }

        Action::QuoteSetTypesForRows { rows, code } => {
            let items = &mut next.quote.current_mut().items;
            for row in rows {
                if let Some(item) = items.get_mut(row) {
                    item.fabric_type = Some(code.clone());
                }
            }
        }

        Action::QuoteReplaceData(quote) => {
            next.quote = quote;
            prune_selection(&mut next);
        }

        Action::QuoteReset => {
            next.quote = Default::default();
            prune_selection(&mut next);
        }

        // ===== Interaction state =====
        Action::UiSetActiveCell { row, column } => {
            next.ui.active_cell = Some(crate::state::ActiveCell { row, column });
            next.ui.input_mode = match column {
                Column::Width | Column::Height => Some(column),
                Column::Type => None,
            };
        }

        Action::UiSetInputValue(value) => {
            next.ui.input_value = value;
        }

        Action::UiAppendInputDigit(digit) => {
            if digit <= 9 {
                next.ui
                    .input_value
                    .push(char::from(b'0' + digit));
            }
        }

        Action::UiDeleteLastInputChar => {
            next.ui.input_value.pop();
        }

        Action::UiClearInputValue => {
            next.ui.input_value.clear();
        }

        Action::UiToggleMultiSelect { row } => {
            if row < next.items().len() {
                match next.ui.multi_select.iter().position(|&r| r == row) {
                    Some(pos) => {
                        next.ui.multi_select.remove(pos);
                    }
                    None => next.ui.multi_select.push(row),
                }
            }
        }

        Action::UiClearMultiSelect => {
            next.ui.multi_select.clear();
        }

        Action::UiSetSumOutdated(outdated) => {
            next.ui.sum_outdated = outdated;
        }

        Action::UiSetFeeValue { field, value } => {
            let fees = &mut next.ui.fees;
            match field {
                FeeField::TotalPrice => fees.total_price = value,
                FeeField::AccessoryFee => fees.accessory_fee = value,
                FeeField::Subtotal => fees.subtotal = value,
                FeeField::ManagementFee => fees.management_fee = value,
                FeeField::DesignFee => fees.design_fee = value,
                FeeField::SubtotalAfterFees => fees.subtotal_after_fees = value,
                FeeField::Tax => fees.tax = value,
                FeeField::Total => fees.total = value,
            }
        }

        Action::UiSetFeeTotalCount(count) => {
            next.ui.fees.total_count = count;
        }

        Action::UiSetFeeExcluded { fee, excluded } => {
            let fees = &mut next.ui.fees;
            match fee {
                ExcludableFee::Management => fees.management_fee_excluded = excluded,
                ExcludableFee::Design => fees.design_fee_excluded = excluded,
                ExcludableFee::Tax => fees.tax_excluded = excluded,
            }
        }

        Action::UiSetActiveTab(tab) => {
            next.ui.active_tab = tab;
        }

        Action::UiReset => {
            next.ui = UiState::default();
        }
    }
    next
}

/// Drop selection entries that no longer reference a valid row.
fn prune_selection(state: &mut AppState) {
    let len = state.items().len();
    state.ui.multi_select.retain(|&row| row < len);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ActiveCell, DEFAULT_ROWS};

    fn dims(state: &AppState, row: usize) -> (Option<u32>, Option<u32>) {
        let item = &state.items()[row];
        (item.width, item.height)
    }

    #[test]
    fn insert_row_adds_blank_after_position() {
        let mut state = AppState::default();
        state = reducer(
            &state,
            Action::QuoteUpdateItemValue {
                row: 1,
                column: Column::Width,
                value: Some(1000),
            },
        );

        let next = reducer(&state, Action::QuoteInsertRow { after: 1 });
        assert_eq!(next.items().len(), state.items().len() + 1);
        assert!(next.items()[2].is_empty());
        assert_eq!(dims(&next, 1), (Some(1000), None));
    }

    #[test]
    fn delete_row_removes_and_prunes_selection() {
        let mut state = AppState::default();
        state.ui.multi_select = vec![0, DEFAULT_ROWS - 1];

        let next = reducer(&state, Action::QuoteDeleteRow { row: 0 });
        assert_eq!(next.items().len(), DEFAULT_ROWS - 1);
        // The old last index is now out of bounds and must be dropped.
        assert_eq!(next.ui.multi_select, vec![0]);
    }

    #[test]
    fn update_on_last_row_appends_trailing_blank() {
        let state = AppState::default();
        let last = state.items().len() - 1;

        let next = reducer(
            &state,
            Action::QuoteUpdateItemValue {
                row: last,
                column: Column::Height,
                value: Some(1800),
            },
        );

        assert_eq!(next.items().len(), state.items().len() + 1);
        assert!(next.items().last().unwrap().is_empty());
    }

    #[test]
    fn update_with_none_clears_cell_without_append() {
        let mut state = AppState::default();
        state = reducer(
            &state,
            Action::QuoteUpdateItemValue {
                row: 0,
                column: Column::Width,
                value: Some(900),
            },
        );
        let len = state.items().len();

        let next = reducer(
            &state,
            Action::QuoteUpdateItemValue {
                row: 0,
                column: Column::Width,
                value: None,
            },
        );
        assert_eq!(dims(&next, 0), (None, None));
        assert_eq!(next.items().len(), len);
    }

    #[test]
    fn toggle_multi_select_twice_is_identity() {
        let state = AppState::default();
        let once = reducer(&state, Action::UiToggleMultiSelect { row: 2 });
        assert_eq!(once.ui.multi_select, vec![2]);

        let twice = reducer(&once, Action::UiToggleMultiSelect { row: 2 });
        assert_eq!(twice.ui.multi_select, state.ui.multi_select);
    }

    #[test]
    fn toggle_out_of_bounds_is_ignored() {
        let state = AppState::default();
        let next = reducer(&state, Action::UiToggleMultiSelect { row: 99 });
        assert!(next.ui.multi_select.is_empty());
    }

    #[test]
    fn set_all_types_only_touches_dimensioned_rows() {
        let mut state = AppState::default();
        for action in [
            Action::QuoteUpdateItemValue {
                row: 0,
                column: Column::Width,
                value: Some(1000),
            },
            Action::QuoteUpdateItemValue {
                row: 0,
                column: Column::Height,
                value: Some(1200),
            },
            Action::QuoteUpdateItemValue {
                row: 1,
                column: Column::Width,
                value: Some(800),
            },
        ] {
            state = reducer(&state, action);
        }

        let next = reducer(
            &state,
            Action::QuoteSetAllTypes { code: "B1".into() },
        );
        assert_eq!(next.items()[0].fabric_type.as_deref(), Some("B1"));
        assert_eq!(next.items()[1].fabric_type, None);
    }

    #[test]
    fn set_types_for_rows_touches_exactly_those_rows() {
        let state = AppState::default();
        let next = reducer(
            &state,
            Action::QuoteSetTypesForRows {
                rows: vec![0, 2, 4],
                code: "SH".into(),
            },
        );
        for (i, item) in next.items().iter().enumerate() {
            let expected = matches!(i, 0 | 2 | 4).then(|| "SH".to_string());
            assert_eq!(item.fabric_type, expected, "row {i}");
        }
    }

    #[test]
    fn set_active_cell_tracks_input_mode() {
        let state = AppState::default();
        let next = reducer(
            &state,
            Action::UiSetActiveCell {
                row: 1,
                column: Column::Height,
            },
        );
        assert_eq!(
            next.ui.active_cell,
            Some(ActiveCell {
                row: 1,
                column: Column::Height
            })
        );
        assert_eq!(next.ui.input_mode, Some(Column::Height));

        let typed = reducer(
            &next,
            Action::UiSetActiveCell {
                row: 1,
                column: Column::Type,
            },
        );
        assert_eq!(typed.ui.input_mode, None);
    }

    #[test]
    fn input_buffer_edits() {
        let mut state = AppState::default();
        for digit in [1u8, 2, 3] {
            state = reducer(&state, Action::UiAppendInputDigit(digit));
        }
        assert_eq!(state.ui.input_value, "123");

        state = reducer(&state, Action::UiDeleteLastInputChar);
        assert_eq!(state.ui.input_value, "12");

        state = reducer(&state, Action::UiClearInputValue);
        assert_eq!(state.ui.input_value, "");
    }

    #[test]
    fn reset_restores_blank_quote_and_ui() {
        let mut state = AppState::default();
        state = reducer(
            &state,
            Action::QuoteUpdateItemValue {
                row: 0,
                column: Column::Width,
                value: Some(2000),
            },
        );
        state = reducer(&state, Action::UiToggleMultiSelect { row: 0 });
        state = reducer(&state, Action::UiSetSumOutdated(true));

        state = reducer(&state, Action::QuoteReset);
        state = reducer(&state, Action::UiReset);

        assert_eq!(state, AppState::default());
    }

    #[test]
    fn fee_field_writes_are_independent() {
        let mut state = AppState::default();
        state = reducer(
            &state,
            Action::UiSetFeeValue {
                field: FeeField::Subtotal,
                value: 1050.0,
            },
        );
        state = reducer(&state, Action::UiSetFeeTotalCount(3));
        state = reducer(
            &state,
            Action::UiSetFeeExcluded {
                fee: ExcludableFee::Tax,
                excluded: true,
            },
        );

        assert_eq!(state.ui.fees.subtotal, 1050.0);
        assert_eq!(state.ui.fees.total_count, 3);
        assert!(state.ui.fees.tax_excluded);
        assert_eq!(state.ui.fees.management_fee, 0.0);
    }
}
