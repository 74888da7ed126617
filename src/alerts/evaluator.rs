//! Alert rule evaluation.

use rust_decimal::Decimal;

use crate::models::{AlertCondition, AlertDecision, AlertRule};

/// Decide whether a rule fires against an observed price.
///
/// Comparison is inclusive on both sides ("touch" semantics): an `above`
/// rule fires at exactly the target price, not only past it. Stateless;
/// whether the same rule fired on a previous pass is not tracked here.
pub fn evaluate(rule: &AlertRule, observed_price: Decimal) -> AlertDecision {
    let triggered = match rule.condition {
        AlertCondition::Above => observed_price >= rule.target_price,
        AlertCondition::Below => observed_price <= rule.target_price,
    };

    let message = if triggered {
        let emoji = match rule.condition {
            AlertCondition::Above => "📈",
            AlertCondition::Below => "📉",
        };
        format!(
            "{} ALERT: {} is now ₹{:.2} ({} ₹{})",
            emoji,
            rule.symbol,
            observed_price.round_dp(2),
            rule.condition.as_str(),
            rule.target_price
        )
    } else {
        String::new()
    };

    AlertDecision {
        triggered,
        message,
        symbol: rule.symbol.clone(),
        observed_price,
    }
}
