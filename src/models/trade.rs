//! Trade parameters supplied to the position sizer.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Whether the trade is sized in individual shares or in futures lots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeMode {
    Cash,
    Futures,
}

impl TradeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeMode::Cash => "cash",
            TradeMode::Futures => "futures",
        }
    }
}

/// Inputs for a single position-sizing calculation.
///
/// Immutable per call; the sizer never mutates these. `lot_size` is only
/// meaningful in futures mode and defaults to 1.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeParameters {
    /// Planned entry price per share/contract (currency units)
    pub entry_price: Decimal,

    /// Total trading capital available
    pub capital: Decimal,

    /// Risk per trade as a percentage of capital, in (0, 100]
    pub risk_percent: Decimal,

    /// Stop-loss distance as a percentage of entry price, in (0, 100]
    pub stop_loss_percent: Decimal,

    /// Cash (shares) or futures (whole lots)
    pub mode: TradeMode,

    /// Minimum tradable multiple for a futures contract
    #[serde(default = "default_lot_size")]
    pub lot_size: u32,
}

fn default_lot_size() -> u32 {
    1
}

impl TradeParameters {
    /// Parameters for a cash-market trade sized in individual shares.
    pub fn cash(
        entry_price: Decimal,
        capital: Decimal,
        risk_percent: Decimal,
        stop_loss_percent: Decimal,
    ) -> Self {
        Self {
            entry_price,
            capital,
            risk_percent,
            stop_loss_percent,
            mode: TradeMode::Cash,
            lot_size: 1,
        }
    }

    /// Parameters for a futures trade sized in whole lots.
    pub fn futures(
        entry_price: Decimal,
        capital: Decimal,
        risk_percent: Decimal,
        stop_loss_percent: Decimal,
        lot_size: u32,
    ) -> Self {
        Self {
            entry_price,
            capital,
            risk_percent,
            stop_loss_percent,
            mode: TradeMode::Futures,
            lot_size,
        }
    }
}
