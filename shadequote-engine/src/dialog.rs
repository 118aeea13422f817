//! Choice dialogs as request/response messages
//!
//! The engine can never block for a user decision, and it does not hand out
//! callbacks either. Instead it publishes a [`DialogRequest`] naming each
//! choice by ID, records what the open dialog was about in a
//! [`PendingDialog`], and later interprets the collaborator's
//! `DialogChoiceSelected` event against that record. A cancel choice is a
//! strict no-op; a choice arriving with no (or a mismatched) pending record
//! is logged and ignored.

use crate::state::FabricCode;

/// Identifies one selectable choice in a dialog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChoiceId {
    /// Row maintenance: reset width/height/type on the row.
    ClearFields,
    /// Row maintenance: remove the row.
    DeleteRow,
    /// Generic affirmative (reset confirmation).
    Confirm,
    /// Dismiss without acting. Never an error.
    Cancel,
    /// A fabric type picked from the configured sequence.
    Fabric(FabricCode),
}

/// Visual weight hint for the dialog collaborator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ChoiceRole {
    #[default]
    Primary,
    Secondary,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DialogChoice {
    pub id: ChoiceId,
    pub label: String,
    /// Supplementary text shown next to the label (fabric display name).
    pub detail: Option<String>,
    pub role: ChoiceRole,
}

impl DialogChoice {
    pub fn new(id: ChoiceId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            detail: None,
            role: ChoiceRole::Primary,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn secondary(mut self) -> Self {
        self.role = ChoiceRole::Secondary;
        self
    }

    /// The standard cancel entry.
    pub fn cancel() -> Self {
        Self::new(ChoiceId::Cancel, "Cancel").secondary()
    }
}

/// Placement hint for the dialog collaborator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DialogPosition {
    #[default]
    Center,
    BottomThird,
}

/// A request for the dialog collaborator: show these choices, then publish
/// `DialogChoiceSelected` with the picked ID.
#[derive(Clone, Debug, PartialEq)]
pub struct DialogRequest {
    pub message: String,
    pub choices: Vec<DialogChoice>,
    pub position: DialogPosition,
}

/// Which rows a fabric-type pick applies to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FabricScope {
    Row(usize),
    /// Every row with both dimensions set.
    AllEligible,
    Selection(Vec<usize>),
}

/// What the currently open dialog, if any, is about.
#[derive(Clone, Debug, PartialEq)]
pub enum PendingDialog {
    RowMaintenance { row: usize },
    FabricType { scope: FabricScope },
    ResetConfirm,
}
