//! # quotes — live price lookup
//!
//! One HTTP GET per symbol against the Binance ticker endpoint:
//!
//! ```text
//! GET <base>/api/v3/ticker/price?symbol=BTCUSDT
//! → {"symbol": "BTCUSDT", "price": "67012.34000000"}
//! ```
//!
//! The `price` field is a decimal *string* and has to be parsed.
//!
//! ## Fallback contract
//!
//! Every failure — unreachable endpoint, non-2xx status, missing field,
//! non-numeric price — maps to a live price of `0.0`.  Callers never see a
//! quote error; they see a worthless holding and a warning in the log.

use std::time::Duration;

use anyhow::{bail, Context};
use serde::Deserialize;
use tracing::warn;

/// Quote currency appended to every ticker, e.g. `BTC` → `BTCUSDT`.
const QUOTE_SUFFIX: &str = "USDT";

// ─── QuoteClient ──────────────────────────────────────────────────────────────

/// Shared quote API client.  Cheap to clone — wraps one `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct QuoteClient {
    client:   reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct TickerResponse {
    price: String,
}

impl QuoteClient {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build quote HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Live price for `symbol`, or `0.0` when the lookup fails for any
    /// reason.  Infallible by design.
    pub async fn live_price(&self, symbol: &str) -> f64 {
        match self.fetch(symbol).await {
            Ok(price) => price,
            Err(err) => {
                warn!(symbol, error = %err, "Quote lookup failed — defaulting to 0.0");
                0.0
            }
        }
    }

    async fn fetch(&self, symbol: &str) -> anyhow::Result<f64> {
        let url = format!(
            "{}/api/v3/ticker/price?symbol={}",
            self.base_url,
            ticker_pair(symbol),
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("Quote endpoint unreachable")?;

        if !response.status().is_success() {
            bail!("Quote endpoint returned HTTP {}", response.status());
        }

        let body = response
            .text()
            .await
            .context("Failed to read quote response body")?;

        parse_ticker(&body)
    }
}

/// `BTC` → `BTCUSDT`
fn ticker_pair(symbol: &str) -> String {
    format!("{symbol}{QUOTE_SUFFIX}")
}

fn parse_ticker(body: &str) -> anyhow::Result<f64> {
    let ticker: TickerResponse =
        serde_json::from_str(body).context("Quote response missing price field")?;

    ticker
        .price
        .parse::<f64>()
        .context("Quote price field is not numeric")
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_appends_quote_currency() {
        assert_eq!(ticker_pair("BTC"), "BTCUSDT");
        assert_eq!(ticker_pair("ETH"), "ETHUSDT");
    }

    #[test]
    fn parses_binance_ticker_body() {
        let body = r#"{"symbol":"BTCUSDT","price":"67012.34000000"}"#;
        assert_eq!(parse_ticker(body).unwrap(), 67012.34);
    }

    #[test]
    fn missing_price_field_is_an_error() {
        let body = r#"{"symbol":"BTCUSDT"}"#;
        assert!(parse_ticker(body).is_err());
    }

    #[test]
    fn non_numeric_price_is_an_error() {
        let body = r#"{"symbol":"BTCUSDT","price":"n/a"}"#;
        assert!(parse_ticker(body).is_err());
    }

    #[tokio::test]
    async fn unreachable_endpoint_falls_back_to_zero() {
        // Port 9 (discard) is refused on any sane host — the lookup must
        // swallow the error and hand back 0.0.
        let client = QuoteClient::new(
            "http://127.0.0.1:9",
            Duration::from_millis(250),
        )
        .unwrap();

        assert_eq!(client.live_price("BTC").await, 0.0);
    }
}
