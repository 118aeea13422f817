//! Product strategies: per-product validation rules and pricing
//!
//! Each product line plugs in a [`ProductStrategy`]. The engine never
//! hard-codes bounds or price formulas; it asks the current product's
//! strategy.

use std::collections::BTreeMap;

use crate::config::ConfigManager;
use crate::error::EngineError;
use crate::state::{Column, ProductKey, QuoteItem};

/// Bounds for one editable column, in millimeters.
#[derive(Clone, Debug, PartialEq)]
pub struct ValidationRule {
    pub name: &'static str,
    pub min: u32,
    pub max: u32,
}

impl ValidationRule {
    pub fn contains(&self, value: u32) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// The standard out-of-bounds message.
    pub fn message(&self) -> String {
        format!("{} must be between {} and {}.", self.name, self.min, self.max)
    }
}

/// A pricing failure for a single item; the caller supplies the row.
#[derive(Clone, Debug, PartialEq)]
pub struct ItemPricingError {
    pub column: Column,
    pub message: String,
}

pub trait ProductStrategy {
    /// The bound for a column, if the column is validated at all.
    fn validation_rule(&self, column: Column) -> Option<&ValidationRule>;

    /// Price one item.
    ///
    /// - `Ok(None)`: the row is blank and carries no price.
    /// - `Ok(Some(price))`: the row priced cleanly.
    /// - `Err(_)`: the row is partially filled or out of bounds; pricing for
    ///   the rest of the pass continues, this row just carries no price.
    fn price_item(
        &self,
        item: &QuoteItem,
        config: &ConfigManager,
    ) -> Result<Option<f64>, ItemPricingError>;
}

/// Roller blinds: area-based pricing with a minimum billable area.
pub struct RollerBlindStrategy {
    rules: BTreeMap<Column, ValidationRule>,
}

impl Default for RollerBlindStrategy {
    fn default() -> Self {
        let mut rules = BTreeMap::new();
        rules.insert(
            Column::Width,
            ValidationRule {
                name: "Width",
                min: 300,
                max: 3000,
            },
        );
        rules.insert(
            Column::Height,
            ValidationRule {
                name: "Height",
                min: 300,
                max: 3300,
            },
        );
        Self { rules }
    }
}

impl RollerBlindStrategy {
    fn check_bound(
        &self,
        column: Column,
        value: u32,
    ) -> Result<(), ItemPricingError> {
        if let Some(rule) = self.rules.get(&column) {
            if !rule.contains(value) {
                return Err(ItemPricingError {
                    column,
                    message: rule.message(),
                });
            }
        }
        Ok(())
    }
}

impl ProductStrategy for RollerBlindStrategy {
    fn validation_rule(&self, column: Column) -> Option<&ValidationRule> {
        self.rules.get(&column)
    }

    fn price_item(
        &self,
        item: &QuoteItem,
        config: &ConfigManager,
    ) -> Result<Option<f64>, ItemPricingError> {
        if item.is_empty() {
            return Ok(None);
        }

        let width = item.width.ok_or(ItemPricingError {
            column: Column::Width,
            message: "Width is required.".into(),
        })?;
        let height = item.height.ok_or(ItemPricingError {
            column: Column::Height,
            message: "Height is required.".into(),
        })?;
        self.check_bound(Column::Width, width)?;
        self.check_bound(Column::Height, height)?;

        let code = item.fabric_type.as_deref().ok_or(ItemPricingError {
            column: Column::Type,
            message: "Fabric type is required.".into(),
        })?;
        let matrix = config.price_matrix(code).ok_or_else(|| ItemPricingError {
            column: Column::Type,
            message: format!("Unknown fabric type '{code}'."),
        })?;

        let area_m2 = (f64::from(width) / 1000.0) * (f64::from(height) / 1000.0);
        let billable = area_m2.max(matrix.min_area_m2);
        let price = (billable * matrix.unit_price * 100.0).round() / 100.0;
        Ok(Some(price))
    }
}

/// Strategy lookup by product key.
pub struct ProductFactory {
    strategies: BTreeMap<ProductKey, Box<dyn ProductStrategy>>,
}

impl ProductFactory {
    /// The standard product line-up.
    pub fn standard() -> Self {
        let mut strategies: BTreeMap<ProductKey, Box<dyn ProductStrategy>> = BTreeMap::new();
        strategies.insert(ProductKey::RollerBlind, Box::new(RollerBlindStrategy::default()));
        Self { strategies }
    }

    pub fn strategy(&self, key: ProductKey) -> Result<&dyn ProductStrategy, EngineError> {
        self.strategies
            .get(&key)
            .map(Box::as_ref)
            .ok_or_else(|| EngineError::Configuration(format!("no strategy for {key:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(width: Option<u32>, height: Option<u32>, fabric: Option<&str>) -> QuoteItem {
        QuoteItem {
            width,
            height,
            fabric_type: fabric.map(String::from),
            line_price: None,
        }
    }

    #[test]
    fn blank_item_prices_to_none() {
        let strategy = RollerBlindStrategy::default();
        let config = ConfigManager::default();
        assert_eq!(strategy.price_item(&item(None, None, None), &config), Ok(None));
    }

    #[test]
    fn complete_item_prices_by_area() {
        let strategy = RollerBlindStrategy::default();
        let config = ConfigManager::default();
        // 2m x 1m Blockout at 95/m2
        let price = strategy
            .price_item(&item(Some(2000), Some(1000), Some("B1")), &config)
            .unwrap();
        assert_eq!(price, Some(190.0));
    }

    #[test]
    fn small_item_billed_at_minimum_area() {
        let strategy = RollerBlindStrategy::default();
        let config = ConfigManager::default();
        // 0.3m x 0.3m = 0.09 m2, floored to 0.5 m2
        let price = strategy
            .price_item(&item(Some(300), Some(300), Some("SH")), &config)
            .unwrap();
        assert_eq!(price, Some(35.0));
    }

    #[test]
    fn missing_height_fails_on_height_column() {
        let strategy = RollerBlindStrategy::default();
        let config = ConfigManager::default();
        let err = strategy
            .price_item(&item(Some(1000), None, None), &config)
            .unwrap_err();
        assert_eq!(err.column, Column::Height);
    }

    #[test]
    fn missing_fabric_fails_on_type_column() {
        let strategy = RollerBlindStrategy::default();
        let config = ConfigManager::default();
        let err = strategy
            .price_item(&item(Some(1000), Some(1000), None), &config)
            .unwrap_err();
        assert_eq!(err.column, Column::Type);
        assert_eq!(err.message, "Fabric type is required.");
    }

    #[test]
    fn out_of_bounds_width_uses_rule_message() {
        let strategy = RollerBlindStrategy::default();
        let config = ConfigManager::default();
        let err = strategy
            .price_item(&item(Some(5000), Some(1000), Some("B1")), &config)
            .unwrap_err();
        assert_eq!(err.column, Column::Width);
        assert_eq!(err.message, "Width must be between 300 and 3000.");
    }

    #[test]
    fn factory_resolves_known_products() {
        let factory = ProductFactory::standard();
        assert!(factory.strategy(ProductKey::RollerBlind).is_ok());
    }
}
