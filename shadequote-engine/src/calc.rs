//! Full calculation pass
//!
//! Reprices every item of the current product and refreshes the product
//! summary. Blank rows are skipped; a row that fails pricing keeps no price
//! and the pass records the first failure only, which becomes a notification
//! plus a refocus onto the offending cell.

use tracing::error;

use crate::action::Action;
use crate::config::ConfigManager;
use crate::engine::{notify, publish_state_change, Bus, Engine};
use crate::error::{EngineError, ValidationError};
use crate::event::NotificationKind;
use crate::product::ProductFactory;
use crate::state::QuoteData;

/// Result of one calculation pass over a quote document.
#[derive(Clone, Debug, PartialEq)]
pub struct CalculationOutcome {
    /// The repriced document, summary included.
    pub quote: QuoteData,
    /// The first row that failed pricing, if any.
    pub first_error: Option<ValidationError>,
}

/// Price every item of the current product. Pure; the caller decides what to
/// do with the outcome.
pub fn calculate(
    quote: &QuoteData,
    config: &ConfigManager,
    products: &ProductFactory,
) -> Result<CalculationOutcome, EngineError> {
    let strategy = products.strategy(quote.current_product)?;

    let mut next = quote.clone();
    let mut first_error: Option<ValidationError> = None;
    let mut total_price = 0.0;
    let mut total_count = 0;

    let product = next.current_mut();
    for (row, item) in product.items.iter_mut().enumerate() {
        match strategy.price_item(item, config) {
            Ok(Some(price)) => {
                item.line_price = Some(price);
                total_price += price;
                total_count += 1;
            }
            Ok(None) => {
                item.line_price = None;
            }
            Err(err) => {
                item.line_price = None;
                if first_error.is_none() {
                    let rule = strategy.validation_rule(err.column);
                    first_error = Some(ValidationError {
                        row,
                        column: err.column,
                        message: err.message,
                        min: rule.map(|r| r.min),
                        max: rule.map(|r| r.max),
                    });
                }
            }
        }
    }
    product.summary.total_price = total_price;
    product.summary.total_count = total_count;

    Ok(CalculationOutcome { quote: next, first_error })
}

/// The calculate-sum command.
///
/// On success the outdated flag clears; on a pricing failure it stays set,
/// the first offending cell takes focus, and the user sees the rule message.
pub fn handle_calculate_sum(bus: &Bus, engine: &mut Engine) {
    let outcome = match calculate(&engine.state().quote, &engine.config, &engine.products) {
        Ok(outcome) => outcome,
        Err(err) => {
            error!(%err, "calculation pass refused to run");
            notify(bus, engine, err.to_string(), NotificationKind::Error);
            return;
        }
    };

    engine.dispatch(Action::QuoteReplaceData(outcome.quote));
    match outcome.first_error {
        Some(err) => {
            engine.dispatch(Action::UiSetSumOutdated(true));
            engine.dispatch(Action::UiSetActiveCell {
                row: err.row,
                column: err.column,
            });
            engine.dispatch(Action::UiClearInputValue);
            let message = format!("Row #{}: {}", err.row + 1, err.message);
            notify(bus, engine, message, NotificationKind::Error);
        }
        None => {
            engine.dispatch(Action::UiSetSumOutdated(false));
        }
    }
    publish_state_change(bus, engine);
}
