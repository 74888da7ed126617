//! Alert watch loop: load rules, poll quotes, evaluate, dispatch.

use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::time::interval;
use tracing::{info, warn};

use crate::api::QuoteClient;
use crate::models::{AlertDecision, AlertRule};

use super::{evaluate, TelegramNotifier};

/// Summary of one evaluation pass over the rule set.
#[derive(Debug, Default)]
pub struct PassOutcome {
    /// Rules whose quote fetch and evaluation completed
    pub evaluated: usize,

    /// Rules skipped because their quote fetch or dispatch failed
    pub failed: usize,

    /// Triggered alerts actually handed to the notifier
    pub notified: usize,

    /// Decisions that fired this pass
    pub triggered: Vec<AlertDecision>,
}

impl fmt::Display for PassOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} evaluated, {} triggered, {} notified, {} failed",
            self.evaluated,
            self.triggered.len(),
            self.notified,
            self.failed
        )
    }
}

/// Parse alert rules from the JSON rule file format.
pub fn parse_rules(raw: &str) -> Result<Vec<AlertRule>> {
    serde_json::from_str(raw).context("Failed to parse alert rules")
}

/// Polls quotes for configured rules and dispatches triggered alerts.
///
/// Rules carry no memory of prior firings: a rule that stays past its
/// target fires on every pass. Suppression belongs to whoever consumes the
/// Telegram channel.
pub struct AlertWatcher {
    rules: Vec<AlertRule>,
    quotes: QuoteClient,
    notifier: Option<TelegramNotifier>,
}

impl AlertWatcher {
    /// Create a watcher over an in-memory rule set.
    pub fn new(rules: Vec<AlertRule>, quotes: QuoteClient, notifier: Option<TelegramNotifier>) -> Self {
        Self {
            rules,
            quotes,
            notifier,
        }
    }

    /// Create a watcher from a JSON rule file.
    pub fn from_rule_file(
        path: &Path,
        quotes: QuoteClient,
        notifier: Option<TelegramNotifier>,
    ) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read alert rules from {}", path.display()))?;
        let rules = parse_rules(&raw)?;

        info!(count = rules.len(), file = %path.display(), "Loaded alert rules");

        Ok(Self::new(rules, quotes, notifier))
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Run a single evaluation pass over every rule.
    ///
    /// Rules are independent, so quotes are fetched concurrently and one
    /// rule's failure never aborts the rest of the batch.
    pub async fn run_once(&self) -> PassOutcome {
        let checks = self.rules.iter().map(|rule| self.check_rule(rule));
        let results = futures::future::join_all(checks).await;

        let mut outcome = PassOutcome::default();

        for (rule, result) in self.rules.iter().zip(results) {
            match result {
                Ok((decision, notified)) => {
                    outcome.evaluated += 1;
                    if notified {
                        outcome.notified += 1;
                    }
                    if decision.triggered {
                        info!(
                            symbol = %decision.symbol,
                            price = %decision.observed_price,
                            "Alert triggered"
                        );
                        outcome.triggered.push(decision);
                    }
                }
                Err(e) => {
                    warn!(symbol = %rule.symbol, error = %e, "Skipping rule");
                    outcome.failed += 1;
                }
            }
        }

        outcome
    }

    /// Run evaluation passes on an interval until Ctrl+C.
    pub async fn run(&self, interval_secs: u64) -> Result<()> {
        info!(
            rules = self.rules.len(),
            interval = interval_secs,
            "Starting alert watch loop"
        );

        let mut ticker = interval(Duration::from_secs(interval_secs));

        loop {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    info!("Shutting down alert watcher");
                    break;
                }
                _ = ticker.tick() => {
                    let outcome = self.run_once().await;
                    println!(
                        "[{}] {}",
                        chrono::Local::now().format("%H:%M:%S"),
                        outcome
                    );
                    for decision in &outcome.triggered {
                        println!("  {}", decision.message);
                    }
                }
            }
        }

        Ok(())
    }

    /// Fetch, evaluate, and (when configured) dispatch one rule. Returns
    /// the decision and whether it was handed to the notifier.
    async fn check_rule(&self, rule: &AlertRule) -> Result<(AlertDecision, bool)> {
        let quote = self.quotes.get_quote(&rule.symbol).await?;
        let decision = evaluate(rule, quote.last_price);

        let mut notified = false;
        if decision.triggered {
            if let Some(notifier) = &self.notifier {
                notifier.send(&decision).await?;
                notified = true;
            }
        }

        Ok((decision, notified))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AlertCondition;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_rules() {
        let raw = r#"[
            {"symbol": "INFY", "target_price": 1450, "condition": "below"},
            {"symbol": "NIFTY", "target_price": 25000, "condition": "above"}
        ]"#;

        let rules = parse_rules(raw).unwrap();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[1].symbol, "NIFTY");
        assert_eq!(rules[1].target_price, dec!(25000));
        assert_eq!(rules[0].condition, AlertCondition::Below);
    }

    #[test]
    fn test_parse_rules_rejects_malformed_file() {
        assert!(parse_rules("{not json").is_err());
        assert!(parse_rules(r#"[{"symbol": "X"}]"#).is_err());
    }

    #[test]
    fn test_empty_rule_set_pass_is_a_noop() {
        let quotes = QuoteClient::with_base_url("http://127.0.0.1:1".to_string()).unwrap();
        let watcher = AlertWatcher::new(Vec::new(), quotes, None);

        let outcome = tokio_test::block_on(watcher.run_once());
        assert_eq!(outcome.evaluated, 0);
        assert_eq!(outcome.failed, 0);
        assert!(outcome.triggered.is_empty());
    }

    #[test]
    fn test_pass_outcome_display() {
        let outcome = PassOutcome {
            evaluated: 3,
            failed: 1,
            notified: 2,
            triggered: Vec::new(),
        };
        assert_eq!(outcome.to_string(), "3 evaluated, 0 triggered, 2 notified, 1 failed");
    }
}
