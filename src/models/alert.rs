//! Alert rules and evaluation decisions.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Which side of the target price fires the alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertCondition {
    Above,
    Below,
}

impl AlertCondition {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertCondition::Above => "above",
            AlertCondition::Below => "below",
        }
    }
}

/// A configured price-threshold alert, loaded from the rules file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertRule {
    /// Instrument symbol, e.g. "RELIANCE" or "NIFTY"
    pub symbol: String,

    /// Price level the rule watches
    pub target_price: Decimal,

    /// Fire when the observed price touches this side of the target
    pub condition: AlertCondition,
}

/// Outcome of evaluating one rule against one observed price.
///
/// Computed once per rule per evaluation pass and handed to the notifier;
/// never persisted. Whether a rule fires again on the next pass is the
/// caller's concern.
#[derive(Debug, Clone)]
pub struct AlertDecision {
    pub triggered: bool,
    pub message: String,
    pub symbol: String,
    pub observed_price: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_rule_file_format_parses() {
        let raw = r#"[
            {"symbol": "RELIANCE", "target_price": 2500, "condition": "above"},
            {"symbol": "TCS", "target_price": 3100.50, "condition": "below"}
        ]"#;

        let rules: Vec<AlertRule> = serde_json::from_str(raw).unwrap();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].symbol, "RELIANCE");
        assert_eq!(rules[0].condition, AlertCondition::Above);
        assert_eq!(rules[1].target_price, dec!(3100.50));
        assert_eq!(rules[1].condition, AlertCondition::Below);
    }

    #[test]
    fn test_unknown_condition_rejected() {
        let raw = r#"[{"symbol": "X", "target_price": 10, "condition": "crosses"}]"#;
        assert!(serde_json::from_str::<Vec<AlertRule>>(raw).is_err());
    }
}
