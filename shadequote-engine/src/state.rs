//! Application state - single source of truth
//!
//! All state lives in one tree owned by the store. Components never hold
//! copies; they read the current snapshot and dispatch actions. The reducer
//! produces a brand-new `AppState` for every transition, so a snapshot taken
//! at publish time is stable for the rest of that delivery.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Fabric type code as configured in the price matrix (e.g. "B1", "SH").
pub type FabricCode = String;

/// Number of blank rows a fresh quote starts with. The grid always keeps a
/// trailing empty row as the entry point for the next item.
pub const DEFAULT_ROWS: usize = 5;

/// Editable columns of the quote grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Column {
    Width,
    Height,
    Type,
}

impl Column {
    pub fn label(&self) -> &'static str {
        match self {
            Column::Width => "Width",
            Column::Height => "Height",
            Column::Type => "Type",
        }
    }
}

/// One line of the quote. Identity is the index within the owning product's
/// item list; there is no independent identifier.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct QuoteItem {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub fabric_type: Option<FabricCode>,
    /// Price computed by the last full calculation pass, if the item priced
    /// cleanly. Derived; never entered by the user.
    pub line_price: Option<f64>,
}

impl QuoteItem {
    /// No width, no height, no fabric type.
    pub fn is_empty(&self) -> bool {
        self.width.is_none() && self.height.is_none() && self.fabric_type.is_none()
    }

    /// Both dimensions entered; the row is eligible for pricing and batch
    /// type assignment.
    pub fn has_dimensions(&self) -> bool {
        self.width.is_some() && self.height.is_some()
    }

    /// At least one dimension entered.
    pub fn has_any_dimension(&self) -> bool {
        self.width.is_some() || self.height.is_some()
    }

    pub fn value(&self, column: Column) -> Option<u32> {
        match column {
            Column::Width => self.width,
            Column::Height => self.height,
            Column::Type => None,
        }
    }
}

/// Accessory charges carried on the product summary. Amounts are maintained
/// by the detail-configuration surface; the fee cascade only sums them.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Accessories {
    pub winder: f64,
    pub motor: f64,
    pub remote: f64,
    pub charger: f64,
    pub cord: f64,
}

impl Accessories {
    pub fn total(&self) -> f64 {
        self.winder + self.motor + self.remote + self.charger + self.cord
    }
}

/// Product-level totals from the last calculation pass.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total_price: f64,
    pub total_count: usize,
    pub accessories: Accessories,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub items: Vec<QuoteItem>,
    pub summary: Summary,
}

impl Product {
    /// A product with `rows` blank items.
    pub fn blank(rows: usize) -> Self {
        Self {
            items: vec![QuoteItem::default(); rows],
            summary: Summary::default(),
        }
    }
}

/// Known product lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProductKey {
    #[serde(rename = "rollerBlind")]
    RollerBlind,
}

/// The quote document: one current product plus per-product item lists.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuoteData {
    pub current_product: ProductKey,
    pub products: BTreeMap<ProductKey, Product>,
}

impl QuoteData {
    pub fn new_blank(rows: usize) -> Self {
        let mut products = BTreeMap::new();
        products.insert(ProductKey::RollerBlind, Product::blank(rows));
        Self {
            current_product: ProductKey::RollerBlind,
            products,
        }
    }

    pub fn current(&self) -> &Product {
        &self.products[&self.current_product]
    }

    pub fn current_mut(&mut self) -> &mut Product {
        self.products
            .get_mut(&self.current_product)
            .expect("current product must exist")
    }

    pub fn items(&self) -> &[QuoteItem] {
        &self.current().items
    }
}

impl Default for QuoteData {
    fn default() -> Self {
        Self::new_blank(DEFAULT_ROWS)
    }
}

/// The single `(row, column)` location currently accepting numeric input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActiveCell {
    pub row: usize,
    pub column: Column,
}

/// Right-panel tabs the engine cares about. The fee cascade only runs while
/// the fee-summary tab is active.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    QuickQuote,
    FeeSummary,
}

/// Derived fee fields plus the user-writable exclusion toggles.
///
/// Every numeric field here is derived by the fee cascade; the toggles are
/// the only parts a user may flip directly.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FeeSummary {
    pub total_price: f64,
    pub total_count: usize,
    pub accessory_fee: f64,
    pub subtotal: f64,
    pub management_fee: f64,
    pub design_fee: f64,
    pub subtotal_after_fees: f64,
    pub tax: f64,
    pub total: f64,
    pub management_fee_excluded: bool,
    pub design_fee_excluded: bool,
    pub tax_excluded: bool,
}

/// Transient interaction state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UiState {
    pub active_cell: Option<ActiveCell>,
    /// Digits buffered from the numeric pad, committed on Enter.
    pub input_value: String,
    /// Which column the buffered input targets.
    pub input_mode: Option<Column>,
    /// Rows selected via the sequence indicator. Unique; order is the order
    /// of selection and carries no meaning.
    pub multi_select: Vec<usize>,
    /// True whenever any item field changed since the last successful full
    /// calculation. Displayed totals must not be trusted while set.
    pub sum_outdated: bool,
    pub fees: FeeSummary,
    pub active_tab: Tab,
}

/// The whole state tree.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AppState {
    pub quote: QuoteData,
    pub ui: UiState,
}

impl AppState {
    pub fn items(&self) -> &[QuoteItem] {
        self.quote.items()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_quote_has_default_rows() {
        let state = AppState::default();
        assert_eq!(state.items().len(), DEFAULT_ROWS);
        assert!(state.items().iter().all(QuoteItem::is_empty));
    }

    #[test]
    fn item_predicates() {
        let mut item = QuoteItem::default();
        assert!(item.is_empty());
        assert!(!item.has_any_dimension());

        item.width = Some(1200);
        assert!(!item.is_empty());
        assert!(item.has_any_dimension());
        assert!(!item.has_dimensions());

        item.height = Some(900);
        assert!(item.has_dimensions());
    }

    #[test]
    fn accessories_total_sums_all_slots() {
        let acc = Accessories {
            winder: 10.0,
            motor: 20.0,
            remote: 5.0,
            charger: 10.0,
            cord: 5.0,
        };
        assert_eq!(acc.total(), 50.0);
    }

    #[test]
    fn quote_data_round_trips_through_json() {
        let quote = QuoteData::default();
        let json = serde_json::to_string(&quote).expect("serialize");
        let back: QuoteData = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, quote);
    }
}
