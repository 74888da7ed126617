//! Sized position produced by the position sizer.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Result of a position-sizing calculation.
///
/// Derived once from [`TradeParameters`](super::TradeParameters) and never
/// mutated. `quantity` is always a multiple of the lot size for futures
/// trades, and `quantity * stop_loss_per_unit` never exceeds `risk_amount`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionResult {
    /// Number of shares/contracts to trade
    pub quantity: u64,

    /// Number of whole lots (futures mode only)
    pub lots: Option<u64>,

    /// Capital deployed at the entry price
    pub total_trade_value: Decimal,

    /// Loss per share/contract if the stop is hit
    pub stop_loss_per_unit: Decimal,

    /// Price level at which the stop sits (entry minus stop distance,
    /// long-side convention)
    pub stop_loss_price_level: Decimal,

    /// Worst-case loss for the sized position
    pub estimated_max_loss: Decimal,

    /// Risk budget the position was sized against
    pub risk_amount: Decimal,
}

impl PositionResult {
    /// Fraction of the risk budget the sized position actually consumes.
    ///
    /// Always in (0, 1]; truncating to whole shares/lots leaves part of the
    /// budget unused.
    pub fn risk_utilization(&self) -> Decimal {
        if self.risk_amount.is_zero() {
            return Decimal::ZERO;
        }
        self.estimated_max_loss / self.risk_amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_risk_utilization() {
        let result = PositionResult {
            quantity: 45,
            lots: None,
            total_trade_value: dec!(76680),
            stop_loss_per_unit: dec!(76.68),
            stop_loss_price_level: dec!(1627.32),
            estimated_max_loss: dec!(3450.60),
            risk_amount: dec!(3500),
        };

        let used = result.risk_utilization();
        assert!(used > dec!(0.98));
        assert!(used <= Decimal::ONE);
    }
}
