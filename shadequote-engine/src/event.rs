//! Event vocabulary for the session bus
//!
//! Inbound events carry user intent from the (out-of-scope) input layer into
//! the engine; outbound events carry requests to collaborators (renderer,
//! notification surface, dialog surface, persistence). Every event maps to a
//! tag in [`AppEventTag`], the subscription key.

use shadequote_core::BusEvent;

use crate::action::ExcludableFee;
use crate::dialog::{ChoiceId, DialogRequest};
use crate::state::{AppState, Column, QuoteData, Tab};

/// Keys of the numeric entry pad.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NumericKey {
    Digit(u8),
    /// Delete the last buffered character.
    Del,
    /// Jump to the first empty width cell.
    W,
    /// Jump to the first empty height cell.
    H,
    /// Commit the buffered value.
    Enter,
}

/// Active-cell movement requests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Severity of a user-facing notification.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NotificationKind {
    #[default]
    Info,
    Error,
}

/// Everything that travels on the bus.
#[derive(Clone, Debug)]
pub enum AppEvent {
    /// Startup is complete; collaborators may initialize.
    AppReady,
    /// Request to focus a cell (also raised by the deferred startup focus).
    FocusCell { row: usize, column: Column },
    /// The authoritative state changed; payload is the full snapshot.
    StateChanged(Box<AppState>),

    NumericKeyPressed { key: NumericKey },
    TableCellClicked { row: usize, column: Column },
    SequenceCellClicked { row: usize },
    InsertRowClicked,
    DeleteRowClicked,
    ClearRowClicked,
    /// Type-button tap: rotate every row with both dimensions set to its
    /// next fabric type.
    CycleTypeClicked,
    TypeCellLongPress { row: usize },
    TypeButtonLongPress,
    MultiTypeSetRequested,
    /// The dialog collaborator reports which choice the user picked.
    DialogChoiceSelected { choice: ChoiceId },
    CalculateSumClicked,
    MoveActiveCell { direction: Direction },
    RightPanelTabChanged { tab: Tab },
    /// Flip one fee-exclusion toggle on the fee-summary panel.
    FeeExclusionToggled { fee: ExcludableFee },
    ResetClicked,

    SaveToFileClicked,
    ExportCsvClicked,
    SaveThenLoadClicked,
    /// Completed load handed back by the persistence collaborator.
    FileLoaded(QuoteData),

    // ===== Outbound requests =====
    ShowNotification {
        message: String,
        kind: NotificationKind,
    },
    ShowConfirmationDialog(DialogRequest),
    FileSaveRequested(QuoteData),
    CsvExportRequested(QuoteData),
    FileLoadRequested,
}

/// Field-less mirror of [`AppEvent`]; the bus subscription key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AppEventTag {
    AppReady,
    FocusCell,
    StateChanged,
    NumericKeyPressed,
    TableCellClicked,
    SequenceCellClicked,
    InsertRowClicked,
    DeleteRowClicked,
    ClearRowClicked,
    CycleTypeClicked,
    TypeCellLongPress,
    TypeButtonLongPress,
    MultiTypeSetRequested,
    DialogChoiceSelected,
    CalculateSumClicked,
    MoveActiveCell,
    RightPanelTabChanged,
    FeeExclusionToggled,
    ResetClicked,
    SaveToFileClicked,
    ExportCsvClicked,
    SaveThenLoadClicked,
    FileLoaded,
    ShowNotification,
    ShowConfirmationDialog,
    FileSaveRequested,
    CsvExportRequested,
    FileLoadRequested,
}

impl AppEventTag {
    /// Every known tag, for wiring-time coverage checks.
    pub const ALL: &'static [AppEventTag] = &[
        AppEventTag::AppReady,
        AppEventTag::FocusCell,
        AppEventTag::StateChanged,
        AppEventTag::NumericKeyPressed,
        AppEventTag::TableCellClicked,
        AppEventTag::SequenceCellClicked,
        AppEventTag::InsertRowClicked,
        AppEventTag::DeleteRowClicked,
        AppEventTag::ClearRowClicked,
        AppEventTag::CycleTypeClicked,
        AppEventTag::TypeCellLongPress,
        AppEventTag::TypeButtonLongPress,
        AppEventTag::MultiTypeSetRequested,
        AppEventTag::DialogChoiceSelected,
        AppEventTag::CalculateSumClicked,
        AppEventTag::MoveActiveCell,
        AppEventTag::RightPanelTabChanged,
        AppEventTag::FeeExclusionToggled,
        AppEventTag::ResetClicked,
        AppEventTag::SaveToFileClicked,
        AppEventTag::ExportCsvClicked,
        AppEventTag::SaveThenLoadClicked,
        AppEventTag::FileLoaded,
        AppEventTag::ShowNotification,
        AppEventTag::ShowConfirmationDialog,
        AppEventTag::FileSaveRequested,
        AppEventTag::CsvExportRequested,
        AppEventTag::FileLoadRequested,
    ];

    /// Whether the engine's dispatch table handles this tag. Outbound
    /// requests are consumed by collaborators, not by the engine.
    pub fn is_inbound(self) -> bool {
        !matches!(
            self,
            AppEventTag::ShowNotification
                | AppEventTag::ShowConfirmationDialog
                | AppEventTag::FileSaveRequested
                | AppEventTag::CsvExportRequested
                | AppEventTag::FileLoadRequested
        )
    }
}

impl BusEvent for AppEvent {
    type Tag = AppEventTag;

    fn tag(&self) -> AppEventTag {
        match self {
            AppEvent::AppReady => AppEventTag::AppReady,
            AppEvent::FocusCell { .. } => AppEventTag::FocusCell,
            AppEvent::StateChanged(_) => AppEventTag::StateChanged,
            AppEvent::NumericKeyPressed { .. } => AppEventTag::NumericKeyPressed,
            AppEvent::TableCellClicked { .. } => AppEventTag::TableCellClicked,
            AppEvent::SequenceCellClicked { .. } => AppEventTag::SequenceCellClicked,
            AppEvent::InsertRowClicked => AppEventTag::InsertRowClicked,
            AppEvent::DeleteRowClicked => AppEventTag::DeleteRowClicked,
            AppEvent::ClearRowClicked => AppEventTag::ClearRowClicked,
            AppEvent::CycleTypeClicked => AppEventTag::CycleTypeClicked,
            AppEvent::TypeCellLongPress { .. } => AppEventTag::TypeCellLongPress,
            AppEvent::TypeButtonLongPress => AppEventTag::TypeButtonLongPress,
            AppEvent::MultiTypeSetRequested => AppEventTag::MultiTypeSetRequested,
            AppEvent::DialogChoiceSelected { .. } => AppEventTag::DialogChoiceSelected,
            AppEvent::CalculateSumClicked => AppEventTag::CalculateSumClicked,
            AppEvent::MoveActiveCell { .. } => AppEventTag::MoveActiveCell,
            AppEvent::RightPanelTabChanged { .. } => AppEventTag::RightPanelTabChanged,
            AppEvent::FeeExclusionToggled { .. } => AppEventTag::FeeExclusionToggled,
            AppEvent::ResetClicked => AppEventTag::ResetClicked,
            AppEvent::SaveToFileClicked => AppEventTag::SaveToFileClicked,
            AppEvent::ExportCsvClicked => AppEventTag::ExportCsvClicked,
            AppEvent::SaveThenLoadClicked => AppEventTag::SaveThenLoadClicked,
            AppEvent::FileLoaded(_) => AppEventTag::FileLoaded,
            AppEvent::ShowNotification { .. } => AppEventTag::ShowNotification,
            AppEvent::ShowConfirmationDialog(_) => AppEventTag::ShowConfirmationDialog,
            AppEvent::FileSaveRequested(_) => AppEventTag::FileSaveRequested,
            AppEvent::CsvExportRequested(_) => AppEventTag::CsvExportRequested,
            AppEvent::FileLoadRequested => AppEventTag::FileLoadRequested,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_lists_every_tag_once() {
        let mut seen = std::collections::HashSet::new();
        for tag in AppEventTag::ALL {
            assert!(seen.insert(tag), "duplicate tag {tag:?}");
        }
        assert_eq!(seen.len(), AppEventTag::ALL.len());
    }

    #[test]
    fn outbound_tags_are_not_inbound() {
        assert!(!AppEventTag::ShowNotification.is_inbound());
        assert!(!AppEventTag::ShowConfirmationDialog.is_inbound());
        assert!(AppEventTag::FileLoaded.is_inbound());
        assert!(AppEventTag::CalculateSumClicked.is_inbound());
    }
}
