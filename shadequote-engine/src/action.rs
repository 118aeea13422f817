//! Action vocabulary
//!
//! One enum, two naming families: `Quote*` actions touch the quote document,
//! `Ui*` actions touch transient interaction state. The reducer matches this
//! enum exhaustively, so an action without a transition is a compile error
//! rather than a runtime lookup failure.

use crate::state::{Column, FabricCode, QuoteData, Tab};
use shadequote_core::Action as CoreAction;

/// Derived fee fields writable by the fee cascade (and only by it).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeeField {
    TotalPrice,
    AccessoryFee,
    Subtotal,
    ManagementFee,
    DesignFee,
    SubtotalAfterFees,
    Tax,
    Total,
}

/// Fees the user can exclude from the cascade.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExcludableFee {
    Management,
    Design,
    Tax,
}

/// Every state transition in the engine.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    // ===== Quote document =====
    /// Insert a blank item immediately after `after`.
    QuoteInsertRow { after: usize },
    QuoteDeleteRow { row: usize },
    /// Reset width/height/fabric type on one row, keeping the row itself.
    QuoteClearRow { row: usize },
    /// Commit a validated width/height value (`None` clears the cell).
    QuoteUpdateItemValue {
        row: usize,
        column: Column,
        value: Option<u32>,
    },
    QuoteSetItemType { row: usize, code: FabricCode },
    /// Assign a fabric type to every row with both dimensions set.
    QuoteSetAllTypes { code: FabricCode },
    QuoteSetTypesForRows { rows: Vec<usize>, code: FabricCode },
    /// Replace the whole document (calculation results, file load).
    QuoteReplaceData(QuoteData),
    QuoteReset,

    // ===== Interaction state =====
    UiSetActiveCell { row: usize, column: Column },
    UiSetInputValue(String),
    UiAppendInputDigit(u8),
    UiDeleteLastInputChar,
    UiClearInputValue,
    UiToggleMultiSelect { row: usize },
    UiClearMultiSelect,
    UiSetSumOutdated(bool),
    UiSetFeeValue { field: FeeField, value: f64 },
    UiSetFeeTotalCount(usize),
    UiSetFeeExcluded { fee: ExcludableFee, excluded: bool },
    UiSetActiveTab(Tab),
    UiReset,
}

impl CoreAction for Action {
    fn name(&self) -> &'static str {
        match self {
            Action::QuoteInsertRow { .. } => "QuoteInsertRow",
            Action::QuoteDeleteRow { .. } => "QuoteDeleteRow",
            Action::QuoteClearRow { .. } => "QuoteClearRow",
            Action::QuoteUpdateItemValue { .. } => "QuoteUpdateItemValue",
            Action::QuoteSetItemType { .. } => "QuoteSetItemType",
            Action::QuoteSetAllTypes { .. } => "QuoteSetAllTypes",
            Action::QuoteSetTypesForRows { .. } => "QuoteSetTypesForRows",
            Action::QuoteReplaceData(_) => "QuoteReplaceData",
            Action::QuoteReset => "QuoteReset",
            Action::UiSetActiveCell { .. } => "UiSetActiveCell",
            Action::UiSetInputValue(_) => "UiSetInputValue",
            Action::UiAppendInputDigit(_) => "UiAppendInputDigit",
            Action::UiDeleteLastInputChar => "UiDeleteLastInputChar",
            Action::UiClearInputValue => "UiClearInputValue",
            Action::UiToggleMultiSelect { .. } => "UiToggleMultiSelect",
            Action::UiClearMultiSelect => "UiClearMultiSelect",
            Action::UiSetSumOutdated(_) => "UiSetSumOutdated",
            Action::UiSetFeeValue { .. } => "UiSetFeeValue",
            Action::UiSetFeeTotalCount(_) => "UiSetFeeTotalCount",
            Action::UiSetFeeExcluded { .. } => "UiSetFeeExcluded",
            Action::UiSetActiveTab(_) => "UiSetActiveTab",
            Action::UiReset => "UiReset",
        }
    }
}
