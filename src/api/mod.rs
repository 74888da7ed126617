//! Market data API client.

mod quote_client;
mod types;

pub use quote_client::QuoteClient;
pub use types::Quote;
