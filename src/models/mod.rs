//! Data models for trade parameters, sized positions, and alert rules.

mod alert;
mod position;
mod trade;

pub use alert::{AlertCondition, AlertDecision, AlertRule};
pub use position::PositionResult;
pub use trade::{TradeMode, TradeParameters};
