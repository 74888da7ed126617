//! Telegram alert dispatch.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use tracing::debug;

use crate::models::AlertDecision;

const TELEGRAM_API_BASE: &str = "https://api.telegram.org";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Sends triggered alert messages to a Telegram chat via the Bot API.
pub struct TelegramNotifier {
    client: Client,
    base_url: String,
    token: String,
    chat_id: String,
}

impl TelegramNotifier {
    /// Create a notifier from `TELEGRAM_BOT_TOKEN` and `TELEGRAM_CHAT_ID`.
    pub fn from_env() -> Result<Self> {
        let token = std::env::var("TELEGRAM_BOT_TOKEN")
            .context("TELEGRAM_BOT_TOKEN not set (required for --notify)")?;
        let chat_id = std::env::var("TELEGRAM_CHAT_ID")
            .context("TELEGRAM_CHAT_ID not set (required for --notify)")?;

        Self::with_base_url(TELEGRAM_API_BASE.to_string(), token, chat_id)
    }

    /// Create with a custom API base URL (for testing).
    pub fn with_base_url(base_url: String, token: String, chat_id: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url,
            token,
            chat_id,
        })
    }

    /// Dispatch a decision. Untriggered decisions are a no-op, so a batch
    /// runner can hand every decision through without filtering first.
    pub async fn send(&self, decision: &AlertDecision) -> Result<()> {
        if !decision.triggered {
            return Ok(());
        }

        let url = format!("{}/bot{}/sendMessage", self.base_url, self.token);

        debug!(symbol = %decision.symbol, "Sending Telegram alert");

        let response = self
            .client
            .post(&url)
            .form(&[
                ("chat_id", self.chat_id.as_str()),
                ("text", decision.message.as_str()),
            ])
            .send()
            .await
            .context("Failed to reach Telegram API")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Telegram sendMessage failed: {} - {}", status, body);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_untriggered_decision_is_not_sent() {
        // Unroutable base URL: a send attempt would fail, proving the
        // untriggered short-circuit never touches the network.
        let notifier = TelegramNotifier::with_base_url(
            "http://127.0.0.1:1".to_string(),
            "token".to_string(),
            "chat".to_string(),
        )
        .unwrap();

        let decision = AlertDecision {
            triggered: false,
            message: String::new(),
            symbol: "X".to_string(),
            observed_price: dec!(99),
        };

        tokio_test::block_on(notifier.send(&decision)).unwrap();
    }
}
