//! Price alerts: rule evaluation, Telegram dispatch, and the watch loop.

mod evaluator;
mod notifier;
mod watcher;

pub use evaluator::evaluate;
pub use notifier::TelegramNotifier;
pub use watcher::{parse_rules, AlertWatcher, PassOutcome};
