//! Core position-sizing calculation.
//!
//! Converts trade parameters into a share/contract quantity whose worst-case
//! loss stays inside the risk budget. Quantities truncate toward zero (cash:
//! whole shares, futures: whole lots); rounding up would overshoot the
//! budget.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::{PositionResult, TradeMode, TradeParameters};

/// Failures and reportable outcomes of a sizing calculation.
///
/// All variants are recoverable at the call site; the sizer never panics on
/// bad input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SizingError {
    #[error("invalid {field}: {reason}")]
    InvalidParameter {
        field: &'static str,
        reason: &'static str,
    },

    #[error("stop-loss distance is zero, cannot size a position")]
    ZeroStopDistance,

    /// The risk budget cannot cover even one share (or one lot). Not a
    /// fault: callers render this as "trade not affordable at this risk",
    /// never as a silent zero-quantity position.
    #[error("risk budget {risk_amount} cannot cover one unit at {stop_loss_per_unit} stop distance")]
    InsufficientBudget {
        risk_amount: Decimal,
        stop_loss_per_unit: Decimal,
    },
}

/// Size a position so that the loss at the stop level stays within the risk
/// budget.
///
/// Validates its own preconditions even when callers clamp inputs upstream,
/// since it is also callable headlessly. Pure and deterministic; safe to
/// call concurrently.
pub fn size_position(params: &TradeParameters) -> Result<PositionResult, SizingError> {
    validate(params)?;

    let hundred = dec!(100);
    let risk_amount = params.capital * params.risk_percent / hundred;
    let stop_loss_per_unit = params.entry_price * params.stop_loss_percent / hundred;

    // Preconditions already exclude a zero stop percent; this guards the
    // product underflowing to zero at Decimal's precision limits.
    if stop_loss_per_unit.is_zero() {
        return Err(SizingError::ZeroStopDistance);
    }

    let (quantity, lots) = match params.mode {
        TradeMode::Cash => {
            let qty = (risk_amount / stop_loss_per_unit).floor();
            (qty.to_u64().unwrap_or(0), None)
        }
        TradeMode::Futures => {
            // Partial lots are not tradable: truncate at the lot level, then
            // convert back to a contract count.
            let lot = Decimal::from(params.lot_size);
            let lots = (risk_amount / (stop_loss_per_unit * lot))
                .floor()
                .to_u64()
                .unwrap_or(0);
            (lots * u64::from(params.lot_size), Some(lots))
        }
    };

    if quantity == 0 {
        return Err(SizingError::InsufficientBudget {
            risk_amount,
            stop_loss_per_unit,
        });
    }

    let qty = Decimal::from(quantity);

    Ok(PositionResult {
        quantity,
        lots,
        total_trade_value: qty * params.entry_price,
        stop_loss_per_unit,
        // Long-side convention: the stop sits below the entry. Shorts are
        // out of scope.
        stop_loss_price_level: params.entry_price - stop_loss_per_unit,
        estimated_max_loss: qty * stop_loss_per_unit,
        risk_amount,
    })
}

fn validate(params: &TradeParameters) -> Result<(), SizingError> {
    let invalid = |field, reason| SizingError::InvalidParameter { field, reason };

    if params.entry_price <= Decimal::ZERO {
        return Err(invalid("entry_price", "must be positive"));
    }
    if params.capital <= Decimal::ZERO {
        return Err(invalid("capital", "must be positive"));
    }
    if params.risk_percent <= Decimal::ZERO || params.risk_percent > dec!(100) {
        return Err(invalid("risk_percent", "must be in (0, 100]"));
    }
    if params.stop_loss_percent <= Decimal::ZERO || params.stop_loss_percent > dec!(100) {
        return Err(invalid("stop_loss_percent", "must be in (0, 100]"));
    }
    if params.lot_size == 0 {
        return Err(invalid("lot_size", "must be at least 1"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cash_sizing_example() {
        // 0.5% of 7L capital = 3500 budget; 4.5% stop on 1704 = 76.68/share
        let params = TradeParameters::cash(dec!(1704), dec!(700000), dec!(0.5), dec!(4.5));
        let result = size_position(&params).unwrap();

        assert_eq!(result.risk_amount, dec!(3500));
        assert_eq!(result.stop_loss_per_unit, dec!(76.68));
        assert_eq!(result.quantity, 45);
        assert_eq!(result.lots, None);
        assert_eq!(result.stop_loss_price_level, dec!(1627.32));
        assert_eq!(result.total_trade_value, dec!(76680));
        assert_eq!(result.estimated_max_loss, dec!(3450.60));
    }

    #[test]
    fn test_futures_sizing_example() {
        let params = TradeParameters::futures(dec!(100), dec!(500000), dec!(1), dec!(2), 50);
        let result = size_position(&params).unwrap();

        assert_eq!(result.risk_amount, dec!(5000));
        assert_eq!(result.stop_loss_per_unit, dec!(2));
        assert_eq!(result.lots, Some(50));
        assert_eq!(result.quantity, 2500);
        assert_eq!(result.quantity % 50, 0);
    }

    #[test]
    fn test_budget_never_exceeded() {
        let cases = [
            (dec!(1704), dec!(700000), dec!(0.5), dec!(4.5)),
            (dec!(99.95), dec!(50000), dec!(2), dec!(1.5)),
            (dec!(3.17), dec!(10000), dec!(1), dec!(7)),
            (dec!(18250), dec!(1000000), dec!(0.25), dec!(0.8)),
        ];

        for (entry, capital, risk, sl) in cases {
            let params = TradeParameters::cash(entry, capital, risk, sl);
            let result = size_position(&params).unwrap();
            assert!(
                Decimal::from(result.quantity) * result.stop_loss_per_unit <= result.risk_amount,
                "budget exceeded for entry={entry} capital={capital}"
            );
        }
    }

    #[test]
    fn test_futures_quantity_is_whole_lots() {
        for lot_size in [15u32, 25, 50, 75, 550] {
            let params =
                TradeParameters::futures(dec!(215.40), dec!(800000), dec!(1), dec!(3), lot_size);
            match size_position(&params) {
                Ok(result) => {
                    assert_eq!(result.quantity % u64::from(lot_size), 0);
                    assert_eq!(result.quantity, result.lots.unwrap() * u64::from(lot_size));
                }
                Err(SizingError::InsufficientBudget { .. }) => {}
                Err(e) => panic!("unexpected error: {e}"),
            }
        }
    }

    #[test]
    fn test_stop_level_is_exact() {
        let params = TradeParameters::cash(dec!(1704), dec!(700000), dec!(0.5), dec!(4.5));
        let result = size_position(&params).unwrap();
        assert_eq!(
            result.stop_loss_price_level,
            params.entry_price - result.stop_loss_per_unit
        );
    }

    #[test]
    fn test_monotonic_in_capital() {
        let mut last_quantity = 0;
        for capital in [dec!(100000), dec!(250000), dec!(500000), dec!(1000000)] {
            let params = TradeParameters::cash(dec!(1704), capital, dec!(0.5), dec!(4.5));
            let result = size_position(&params).unwrap();
            assert!(result.quantity >= last_quantity);
            last_quantity = result.quantity;
        }
    }

    #[test]
    fn test_monotonic_in_stop_loss() {
        let mut last_quantity = u64::MAX;
        for sl in [dec!(0.5), dec!(1), dec!(2.5), dec!(5), dec!(10)] {
            let params = TradeParameters::cash(dec!(1704), dec!(700000), dec!(0.5), sl);
            let result = size_position(&params).unwrap();
            assert!(result.quantity <= last_quantity);
            last_quantity = result.quantity;
        }
    }

    #[test]
    fn test_insufficient_budget_is_reported() {
        // 0.1% of 100 = 0.10 budget vs 50/share stop distance
        let params = TradeParameters::cash(dec!(1000), dec!(100), dec!(0.1), dec!(5));
        match size_position(&params) {
            Err(SizingError::InsufficientBudget {
                risk_amount,
                stop_loss_per_unit,
            }) => {
                assert_eq!(risk_amount, dec!(0.1));
                assert_eq!(stop_loss_per_unit, dec!(50));
            }
            other => panic!("expected InsufficientBudget, got {other:?}"),
        }
    }

    #[test]
    fn test_negative_and_zero_inputs_rejected() {
        let valid = TradeParameters::cash(dec!(100), dec!(10000), dec!(1), dec!(2));

        let mut p = valid.clone();
        p.entry_price = dec!(-100);
        assert!(matches!(
            size_position(&p),
            Err(SizingError::InvalidParameter { field: "entry_price", .. })
        ));

        let mut p = valid.clone();
        p.capital = Decimal::ZERO;
        assert!(matches!(
            size_position(&p),
            Err(SizingError::InvalidParameter { field: "capital", .. })
        ));

        let mut p = valid.clone();
        p.risk_percent = dec!(101);
        assert!(matches!(
            size_position(&p),
            Err(SizingError::InvalidParameter { field: "risk_percent", .. })
        ));

        let mut p = valid.clone();
        p.stop_loss_percent = Decimal::ZERO;
        assert!(matches!(
            size_position(&p),
            Err(SizingError::InvalidParameter { field: "stop_loss_percent", .. })
        ));

        let mut p = valid;
        p.mode = TradeMode::Futures;
        p.lot_size = 0;
        assert!(matches!(
            size_position(&p),
            Err(SizingError::InvalidParameter { field: "lot_size", .. })
        ));
    }
}
