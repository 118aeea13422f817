//! Rate, minimum, and price-matrix configuration
//!
//! Fetching configuration from storage is a collaborator concern; the engine
//! only consumes a fully built [`ConfigManager`]. `from_json` is the thin
//! bridge the storage collaborator feeds.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::EngineError;
use crate::state::FabricCode;

/// Rates and minimums for the fee cascade. Rates are percentages.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct FeeConfig {
    pub management_fee_rate: f64,
    pub management_fee_min: f64,
    pub design_fee_rate: f64,
    pub design_fee_min: f64,
    pub tax_rate: f64,
}

/// Pricing data for one fabric type.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct PriceMatrix {
    /// Display name shown in choice dialogs.
    pub name: String,
    /// Price per square meter.
    pub unit_price: f64,
    /// Small items are billed at least this area.
    pub min_area_m2: f64,
}

#[derive(Debug, Deserialize)]
struct FabricTypeEntry {
    code: FabricCode,
    #[serde(flatten)]
    matrix: PriceMatrix,
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    fees: FeeConfig,
    fabric_types: Vec<FabricTypeEntry>,
}

/// Read-only configuration handed to the engine at construction.
#[derive(Clone, Debug, PartialEq)]
pub struct ConfigManager {
    fees: FeeConfig,
    fabric_sequence: Vec<FabricCode>,
    matrices: BTreeMap<FabricCode, PriceMatrix>,
}

impl ConfigManager {
    pub fn new(
        fees: FeeConfig,
        fabric_sequence: Vec<FabricCode>,
        matrices: BTreeMap<FabricCode, PriceMatrix>,
    ) -> Self {
        Self {
            fees,
            fabric_sequence,
            matrices,
        }
    }

    /// Build from the JSON document produced by the configuration store.
    /// The fabric-type order in the document is the cycling order.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let file: ConfigFile = serde_json::from_str(json)
            .map_err(|e| EngineError::Configuration(format!("invalid config document: {e}")))?;

        let fabric_sequence: Vec<FabricCode> =
            file.fabric_types.iter().map(|t| t.code.clone()).collect();
        let matrices = file
            .fabric_types
            .into_iter()
            .map(|t| (t.code, t.matrix))
            .collect();

        Ok(Self::new(file.fees, fabric_sequence, matrices))
    }

    pub fn fee_config(&self) -> &FeeConfig {
        &self.fees
    }

    /// The configured fabric types, in cycling/display order.
    pub fn fabric_type_sequence(&self) -> &[FabricCode] {
        &self.fabric_sequence
    }

    pub fn price_matrix(&self, code: &str) -> Option<&PriceMatrix> {
        self.matrices.get(code)
    }

    /// The fabric type following `current` in the configured sequence,
    /// wrapping at the end. `None` (or an unknown code) starts from the
    /// beginning. Returns `None` only when the sequence is empty.
    pub fn next_fabric_type(&self, current: Option<&str>) -> Option<&FabricCode> {
        if self.fabric_sequence.is_empty() {
            return None;
        }
        let next_index = match current.and_then(|code| {
            self.fabric_sequence.iter().position(|c| c == code)
        }) {
            Some(pos) => (pos + 1) % self.fabric_sequence.len(),
            None => 0,
        };
        self.fabric_sequence.get(next_index)
    }
}

impl Default for ConfigManager {
    /// Standard roller-blind catalogue used when no configuration store is
    /// attached (and throughout the test suite).
    fn default() -> Self {
        let fees = FeeConfig {
            management_fee_rate: 5.0,
            management_fee_min: 20.0,
            design_fee_rate: 3.0,
            design_fee_min: 15.0,
            tax_rate: 10.0,
        };
        let catalogue = [
            ("B1", "Blockout", 95.0),
            ("LF", "Light Filter", 80.0),
            ("SN", "Sunscreen", 85.0),
            ("SH", "Sheer", 70.0),
        ];
        let fabric_sequence = catalogue.iter().map(|(c, _, _)| c.to_string()).collect();
        let matrices = catalogue
            .iter()
            .map(|(code, name, unit_price)| {
                (
                    code.to_string(),
                    PriceMatrix {
                        name: name.to_string(),
                        unit_price: *unit_price,
                        min_area_m2: 0.5,
                    },
                )
            })
            .collect();
        Self::new(fees, fabric_sequence, matrices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_fabric_type_cycles_and_wraps() {
        let config = ConfigManager::default();
        assert_eq!(config.next_fabric_type(None).map(String::as_str), Some("B1"));
        assert_eq!(
            config.next_fabric_type(Some("B1")).map(String::as_str),
            Some("LF")
        );
        assert_eq!(
            config.next_fabric_type(Some("SH")).map(String::as_str),
            Some("B1")
        );
        // Unknown codes restart the cycle.
        assert_eq!(
            config.next_fabric_type(Some("??")).map(String::as_str),
            Some("B1")
        );
    }

    #[test]
    fn empty_sequence_has_no_next_type() {
        let config = ConfigManager::new(
            ConfigManager::default().fee_config().clone(),
            vec![],
            BTreeMap::new(),
        );
        assert_eq!(config.next_fabric_type(None), None);
    }

    #[test]
    fn from_json_preserves_sequence_order() {
        let json = r#"{
            "fees": {
                "management_fee_rate": 5.0,
                "management_fee_min": 20.0,
                "design_fee_rate": 3.0,
                "design_fee_min": 15.0,
                "tax_rate": 10.0
            },
            "fabric_types": [
                { "code": "SH", "name": "Sheer", "unit_price": 70.0, "min_area_m2": 0.5 },
                { "code": "B1", "name": "Blockout", "unit_price": 95.0, "min_area_m2": 0.5 }
            ]
        }"#;
        let config = ConfigManager::from_json(json).expect("valid config");
        assert_eq!(config.fabric_type_sequence(), ["SH", "B1"]);
        assert_eq!(config.price_matrix("B1").unwrap().name, "Blockout");
        assert_eq!(config.price_matrix("??"), None);
    }

    #[test]
    fn from_json_rejects_malformed_documents() {
        assert!(ConfigManager::from_json("{").is_err());
    }
}
