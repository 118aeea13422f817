//! Focus policy collaborator
//!
//! The engine decides *when* focus moves (after commit, after delete, on a
//! W/H jump); the focus service decides *where*. Implementations talk to the
//! store the same way everything else does: by dispatching actions.

use crate::action::Action;
use crate::engine::QuoteStore;
use crate::event::Direction;
use crate::state::Column;

pub trait FocusService {
    /// Advance after a committed value.
    fn focus_after_commit(&mut self, store: &mut QuoteStore);
    /// Reposition after a row was deleted.
    fn focus_after_delete(&mut self, store: &mut QuoteStore);
    /// Reposition after a row's fields were cleared.
    fn focus_after_clear(&mut self, store: &mut QuoteStore);
    /// Jump to the first cell of `column` with no value yet.
    fn focus_first_empty_cell(&mut self, store: &mut QuoteStore, column: Column);
    /// Move the active cell one step in `direction`.
    fn move_active_cell(&mut self, store: &mut QuoteStore, direction: Direction);
}

/// Default policy: width advances to height on the same row, height drops to
/// the next row's width; delete and clear clamp to the remaining rows.
pub struct StandardFocusService;

impl StandardFocusService {
    fn set(store: &mut QuoteStore, row: usize, column: Column) {
        store.dispatch(Action::UiSetActiveCell { row, column });
        store.dispatch(Action::UiClearInputValue);
    }

    fn clamp_row(store: &QuoteStore, row: usize) -> usize {
        let len = store.state().items().len();
        row.min(len.saturating_sub(1))
    }
}

impl FocusService for StandardFocusService {
    fn focus_after_commit(&mut self, store: &mut QuoteStore) {
        let Some(cell) = store.state().ui.active_cell else {
            return;
        };
        match cell.column {
            Column::Width => Self::set(store, cell.row, Column::Height),
            Column::Height => {
                // The trailing placeholder row guarantees a next row exists
                // after a committed value.
                let row = Self::clamp_row(store, cell.row + 1);
                Self::set(store, row, Column::Width);
            }
            Column::Type => {}
        }
    }

    fn focus_after_delete(&mut self, store: &mut QuoteStore) {
        let row = store.state().ui.active_cell.map_or(0, |c| c.row);
        let row = Self::clamp_row(store, row);
        Self::set(store, row, Column::Width);
    }

    fn focus_after_clear(&mut self, store: &mut QuoteStore) {
        let row = store.state().ui.active_cell.map_or(0, |c| c.row);
        let row = Self::clamp_row(store, row);
        Self::set(store, row, Column::Width);
    }

    fn focus_first_empty_cell(&mut self, store: &mut QuoteStore, column: Column) {
        let target = store
            .state()
            .items()
            .iter()
            .position(|item| item.value(column).is_none());
        if let Some(row) = target {
            Self::set(store, row, column);
        }
    }

    fn move_active_cell(&mut self, store: &mut QuoteStore, direction: Direction) {
        const ORDER: [Column; 3] = [Column::Width, Column::Height, Column::Type];

        let Some(cell) = store.state().ui.active_cell else {
            return;
        };
        let col_index = ORDER
            .iter()
            .position(|&c| c == cell.column)
            .unwrap_or(0);

        let (row, col_index) = match direction {
            Direction::Up => (cell.row.saturating_sub(1), col_index),
            Direction::Down => (Self::clamp_row(store, cell.row + 1), col_index),
            Direction::Left => (cell.row, col_index.saturating_sub(1)),
            Direction::Right => (cell.row, (col_index + 1).min(ORDER.len() - 1)),
        };
        Self::set(store, row, ORDER[col_index]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Engine;
    use crate::state::ActiveCell;

    fn engine_with_active(row: usize, column: Column) -> Engine {
        let mut engine = Engine::default();
        engine.dispatch(Action::UiSetActiveCell { row, column });
        engine
    }

    #[test]
    fn commit_on_width_advances_to_height() {
        let mut engine = engine_with_active(1, Column::Width);
        let mut svc = StandardFocusService;
        svc.focus_after_commit(&mut engine.store);
        assert_eq!(
            engine.state().ui.active_cell,
            Some(ActiveCell {
                row: 1,
                column: Column::Height
            })
        );
    }

    #[test]
    fn commit_on_height_drops_to_next_row_width() {
        let mut engine = engine_with_active(1, Column::Height);
        let mut svc = StandardFocusService;
        svc.focus_after_commit(&mut engine.store);
        assert_eq!(
            engine.state().ui.active_cell,
            Some(ActiveCell {
                row: 2,
                column: Column::Width
            })
        );
    }

    #[test]
    fn first_empty_cell_skips_filled_rows() {
        let mut engine = Engine::default();
        engine.dispatch(Action::QuoteUpdateItemValue {
            row: 0,
            column: Column::Width,
            value: Some(1000),
        });
        let mut svc = StandardFocusService;
        svc.focus_first_empty_cell(&mut engine.store, Column::Width);
        assert_eq!(
            engine.state().ui.active_cell,
            Some(ActiveCell {
                row: 1,
                column: Column::Width
            })
        );
    }

    #[test]
    fn move_clamps_at_grid_edges() {
        let mut engine = engine_with_active(0, Column::Width);
        let mut svc = StandardFocusService;

        svc.move_active_cell(&mut engine.store, Direction::Up);
        assert_eq!(engine.state().ui.active_cell.unwrap().row, 0);

        svc.move_active_cell(&mut engine.store, Direction::Left);
        assert_eq!(engine.state().ui.active_cell.unwrap().column, Column::Width);

        svc.move_active_cell(&mut engine.store, Direction::Right);
        assert_eq!(engine.state().ui.active_cell.unwrap().column, Column::Height);
    }
}
