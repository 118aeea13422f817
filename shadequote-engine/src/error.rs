//! Error taxonomy
//!
//! User-facing failures (validation, selection preconditions, structural
//! rejections) are converted to notifications at the point of detection and
//! never travel through the bus as handler failures. `Configuration` is the
//! exception: it marks a programming-integrity fault and is surfaced loudly.

use crate::state::Column;

/// A per-item input or pricing failure, pinned to the offending cell.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    pub row: usize,
    pub column: Column,
    pub message: String,
    pub min: Option<u32>,
    pub max: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum EngineError {
    /// Input outside product rule bounds, or an item that fails pricing
    /// validation. Non-fatal; notification plus refocus.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Wrong number of selected rows for a row command. Notification only;
    /// state untouched.
    #[error("{0}")]
    SelectionPrecondition(String),

    /// Illegal row position for insert. Notification only; state untouched.
    #[error("{0}")]
    Structural(String),

    /// The user dismissed a choice dialog. Strictly a no-op.
    #[error("dialog cancelled")]
    DialogCancelled,

    /// Programming-integrity fault: unknown product key, empty fabric
    /// sequence, wiring gap. Loud, never silently swallowed.
    #[error("configuration error: {0}")]
    Configuration(String),
}
