//! API response types for the quote endpoint.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Quote returned by the market data provider.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub symbol: String,

    /// Last traded price
    pub last_price: Decimal,

    /// Contract lot size; only present for derivative symbols
    #[serde(default)]
    pub lot_size: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_equity_quote_parses_without_lot_size() {
        let raw = r#"{"symbol": "RELIANCE", "lastPrice": 2501.25}"#;
        let quote: Quote = serde_json::from_str(raw).unwrap();

        assert_eq!(quote.symbol, "RELIANCE");
        assert_eq!(quote.last_price, dec!(2501.25));
        assert_eq!(quote.lot_size, None);
    }

    #[test]
    fn test_derivative_quote_carries_lot_size() {
        let raw = r#"{"symbol": "NIFTY24AUGFUT", "lastPrice": 24850.4, "lotSize": 25}"#;
        let quote: Quote = serde_json::from_str(raw).unwrap();

        assert_eq!(quote.lot_size, Some(25));
    }
}
