use super::types::UsdQuote;
use reqwest::Url;
use serde::Serialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};

/// Substituted for the spot price whenever the quote service can't be used.
pub const FALLBACK_PRICE_USD: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceQuote {
    pub usd: f64,
    pub used_fallback: bool,
}

impl PriceQuote {
    pub fn fallback() -> Self {
        Self { usd: FALLBACK_PRICE_USD, used_fallback: true }
    }
}

/// Spot price client (coingecko `simple/price` shape).
#[derive(Clone)]
pub struct PriceClient {
    url: Url,
    coin_id: String,
    http: reqwest::Client,
}

impl PriceClient {
    pub fn new(url: &str, coin_id: impl Into<String>, timeout: Option<Duration>) -> anyhow::Result<Self> {
        let url = Url::parse(url)?;
        let http = super::http_client(timeout)?;
        Ok(Self { url, coin_id: coin_id.into(), http })
    }

    /// Never fails: any problem yields [`FALLBACK_PRICE_USD`].
    pub async fn spot_price_usd(&self) -> f64 {
        self.quote().await.usd
    }

    pub async fn quote(&self) -> PriceQuote {
        match self.fetch().await {
            Ok(usd) => {
                debug!(coin = %self.coin_id, usd, "fetched spot price");
                PriceQuote { usd, used_fallback: false }
            }
            Err(e) => {
                warn!(coin = %self.coin_id, error = %e, fallback = FALLBACK_PRICE_USD, "price unavailable, using fallback");
                PriceQuote::fallback()
            }
        }
    }

    async fn fetch(&self) -> anyhow::Result<f64> {
        let resp = self.http.get(self.url.clone()).send().await?.error_for_status()?;
        let mut quotes: HashMap<String, UsdQuote> = resp.json().await?;
        let quote = quotes
            .remove(&self.coin_id)
            .ok_or_else(|| anyhow::anyhow!("no quote for {}", self.coin_id))?;
        if !quote.usd.is_finite() || quote.usd < 0.0 {
            anyhow::bail!("nonsensical quote {}", quote.usd);
        }
        Ok(quote.usd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::serve_once;

    #[tokio::test]
    async fn parses_quote_for_coin() {
        let (url, server) = serve_once(200, r#"{"xelis":{"usd":2.37}}"#).await;
        let client = PriceClient::new(&url, "xelis", None).unwrap();

        let q = client.quote().await;
        assert_eq!(q, PriceQuote { usd: 2.37, used_fallback: false });

        let request = server.await.unwrap();
        assert!(request.starts_with("GET "));
    }

    #[tokio::test]
    async fn malformed_body_falls_back() {
        let (url, _server) = serve_once(200, "<html>rate limited</html>").await;
        let client = PriceClient::new(&url, "xelis", None).unwrap();

        assert_eq!(client.spot_price_usd().await, 1.0);
    }

    #[tokio::test]
    async fn missing_coin_falls_back() {
        let (url, _server) = serve_once(200, r#"{"bitcoin":{"usd":60000.0}}"#).await;
        let client = PriceClient::new(&url, "xelis", None).unwrap();

        assert_eq!(client.quote().await, PriceQuote::fallback());
    }

    #[tokio::test]
    async fn http_error_falls_back() {
        let (url, _server) = serve_once(429, r#"{"status":{"error_code":429}}"#).await;
        let client = PriceClient::new(&url, "xelis", None).unwrap();

        assert!(client.quote().await.used_fallback);
    }

    #[tokio::test]
    async fn unreachable_service_falls_back() {
        let client = PriceClient::new("http://127.0.0.1:1/price", "xelis", None).unwrap();
        assert_eq!(client.spot_price_usd().await, FALLBACK_PRICE_USD);
    }
}
