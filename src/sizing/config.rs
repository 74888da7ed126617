//! Sizing defaults.
//!
//! An explicit configuration object replacing what older versions of the
//! calculator kept as process-wide UI session state. The CLI owns its
//! lifecycle (load, override with flags, save) and passes values into the
//! sizer; the sizer itself never reads it.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Default sizing inputs used when a CLI flag is omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SizingDefaults {
    /// Total trading capital
    pub capital: Decimal,

    /// Risk per trade as a percentage of capital
    pub risk_percent: Decimal,

    /// Stop-loss distance as a percentage of entry price
    pub stop_loss_percent: Decimal,

    /// Futures lot size when no live lookup is available
    pub lot_size: u32,
}

impl Default for SizingDefaults {
    fn default() -> Self {
        Self {
            capital: dec!(100000),      // 1L capital
            risk_percent: dec!(1),      // Risk 1% per trade
            stop_loss_percent: dec!(2), // 2% stop
            lot_size: 1,
        }
    }
}

impl SizingDefaults {
    /// Load defaults from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read sizing defaults from {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse sizing defaults in {}", path.display()))
    }

    /// Save defaults to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let raw = serde_json::to_string_pretty(self)?;
        fs::write(path, raw)
            .with_context(|| format!("Failed to write sizing defaults to {}", path.display()))
    }
}
