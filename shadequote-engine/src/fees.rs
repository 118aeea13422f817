//! The fee cascade
//!
//! Derives the fee-summary figures from the product summary of the last full
//! calculation. Percentage fees sit on top of a minimum charge; excluded
//! fees contribute zero but stay visible. The cascade is re-run on every
//! state change while the fee-summary tab is active, so `recalculate`
//! reports whether it actually moved anything.

use crate::action::{Action, FeeField};
use crate::config::FeeConfig;
use crate::engine::Engine;
use crate::state::AppState;

/// One full pass of derived figures.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FeeFigures {
    pub total_price: f64,
    pub total_count: usize,
    pub accessory_fee: f64,
    pub subtotal: f64,
    pub management_fee: f64,
    pub design_fee: f64,
    pub subtotal_after_fees: f64,
    pub tax: f64,
    pub total: f64,
}

fn percentage_fee(base: f64, rate: f64, min: f64, excluded: bool) -> f64 {
    if excluded {
        return 0.0;
    }
    ((base * rate) / 100.0).max(min)
}

/// Compute the cascade from the current state. Pure.
pub fn compute(state: &AppState, config: &FeeConfig) -> FeeFigures {
    let summary = &state.quote.current().summary;
    let toggles = &state.ui.fees;

    let total_price = summary.total_price;
    let accessory_fee = summary.accessories.total();
    let subtotal = total_price + accessory_fee;

    let management_fee = percentage_fee(
        subtotal,
        config.management_fee_rate,
        config.management_fee_min,
        toggles.management_fee_excluded,
    );
    let design_fee = percentage_fee(
        subtotal,
        config.design_fee_rate,
        config.design_fee_min,
        toggles.design_fee_excluded,
    );
    let subtotal_after_fees = subtotal + management_fee + design_fee;

    let tax = if toggles.tax_excluded {
        0.0
    } else {
        (subtotal_after_fees * config.tax_rate) / 100.0
    };

    FeeFigures {
        total_price,
        total_count: summary.total_count,
        accessory_fee,
        subtotal,
        management_fee,
        design_fee,
        subtotal_after_fees,
        tax,
        total: subtotal_after_fees + tax,
    }
}

/// Run the cascade and write the figures into the state. Returns whether any
/// figure actually changed, so the caller can decide whether a follow-up
/// `StateChanged` is warranted.
pub fn recalculate(engine: &mut Engine) -> bool {
    let figures = compute(engine.state(), engine.config.fee_config());

    let writes = [
        (FeeField::TotalPrice, figures.total_price),
        (FeeField::AccessoryFee, figures.accessory_fee),
        (FeeField::Subtotal, figures.subtotal),
        (FeeField::ManagementFee, figures.management_fee),
        (FeeField::DesignFee, figures.design_fee),
        (FeeField::SubtotalAfterFees, figures.subtotal_after_fees),
        (FeeField::Tax, figures.tax),
        (FeeField::Total, figures.total),
    ];

    let mut changed = false;
    for (field, value) in writes {
        changed |= engine.dispatch(Action::UiSetFeeValue { field, value });
    }
    changed |= engine.dispatch(Action::UiSetFeeTotalCount(figures.total_count));
    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::ExcludableFee;
    use crate::config::ConfigManager;
    use crate::state::{Accessories, QuoteData};

    const EPS: f64 = 1e-9;

    fn state_with_totals(total_price: f64, accessories_total: f64) -> AppState {
        let mut quote = QuoteData::default();
        {
            let product = quote.current_mut();
            product.summary.total_price = total_price;
            product.summary.total_count = 3;
            product.summary.accessories = Accessories {
                winder: accessories_total,
                ..Accessories::default()
            };
        }
        AppState {
            quote,
            ..AppState::default()
        }
    }

    #[test]
    fn cascade_derives_every_figure() {
        let state = state_with_totals(1000.0, 50.0);
        let figures = compute(&state, ConfigManager::default().fee_config());

        assert!((figures.subtotal - 1050.0).abs() < EPS);
        assert!((figures.management_fee - 52.5).abs() < EPS);
        assert!((figures.design_fee - 31.5).abs() < EPS);
        assert!((figures.subtotal_after_fees - 1134.0).abs() < EPS);
        assert!((figures.tax - 113.4).abs() < EPS);
        assert!((figures.total - 1247.4).abs() < EPS);
        assert_eq!(figures.total_count, 3);
    }

    #[test]
    fn minimum_charge_overrides_small_percentages() {
        let state = state_with_totals(100.0, 0.0);
        let figures = compute(&state, ConfigManager::default().fee_config());

        // 5% of 100 is below the 20.0 minimum; 3% is below 15.0.
        assert!((figures.management_fee - 20.0).abs() < EPS);
        assert!((figures.design_fee - 15.0).abs() < EPS);
    }

    #[test]
    fn excluded_fees_contribute_zero() {
        let mut state = state_with_totals(1000.0, 50.0);
        state.ui.fees.management_fee_excluded = true;
        state.ui.fees.tax_excluded = true;
        let figures = compute(&state, ConfigManager::default().fee_config());

        assert!((figures.management_fee).abs() < EPS);
        assert!((figures.tax).abs() < EPS);
        assert!((figures.subtotal_after_fees - 1081.5).abs() < EPS);
        assert!((figures.total - 1081.5).abs() < EPS);
    }

    #[test]
    fn recalculate_reports_convergence() {
        let mut engine = Engine::with_state(
            state_with_totals(1000.0, 50.0),
            ConfigManager::default(),
        );

        assert!(recalculate(&mut engine));
        // A second pass over unchanged inputs writes identical figures.
        assert!(!recalculate(&mut engine));
        assert!((engine.state().ui.fees.total - 1247.4).abs() < EPS);
    }

    #[test]
    fn toggle_then_recalculate_moves_the_totals() {
        let mut engine = Engine::with_state(
            state_with_totals(1000.0, 50.0),
            ConfigManager::default(),
        );
        recalculate(&mut engine);

        engine.dispatch(Action::UiSetFeeExcluded {
            fee: ExcludableFee::Design,
            excluded: true,
        });
        assert!(recalculate(&mut engine));
        assert!((engine.state().ui.fees.design_fee).abs() < EPS);
    }
}
