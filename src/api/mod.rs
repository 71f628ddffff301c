pub mod client;
pub mod price;
pub mod types;

pub use client::{LedgerSource, NodeClient};
pub use price::{PriceClient, PriceQuote};

use std::time::Duration;

/// Shared reqwest builder so both endpoints carry the same agent and timeout.
pub(crate) fn http_client(timeout: Option<Duration>) -> reqwest::Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder()
        .user_agent(concat!("xelis-profit/", env!("CARGO_PKG_VERSION")))
        .default_headers({
            let mut h = reqwest::header::HeaderMap::new();
            h.insert(
                reqwest::header::ACCEPT,
                reqwest::header::HeaderValue::from_static("application/json"),
            );
            h
        });
    if let Some(t) = timeout {
        builder = builder.timeout(t);
    }
    builder.build()
}
