//! Market Data Proxy
//!
//! Forwards price lookups for a small allow-list of assets to CoinGecko.
//! Requested ids are normalized before anything leaves the process, so the
//! upstream only ever sees allow-listed identifiers.

pub mod coingecko;
pub mod error;

pub use coingecko::{CoinGeckoClient, UpstreamResponse};
pub use error::ProxyError;

pub const PROVIDER: &str = "coingecko";

/// The only identifiers ever forwarded upstream.
pub const ALLOWED_IDS: [&str; 4] = ["bitcoin", "ethereum", "solana", "binancecoin"];

pub const DEFAULT_IDS: &str = "bitcoin,ethereum";

pub const MAX_IDS: usize = 4;

/// Upstream body characters echoed back in error envelopes.
pub const BODY_PREVIEW_CHARS: usize = 200;

/// `Cache-Control` on successful proxy responses.
pub const MARKET_DATA_CACHE_CONTROL: &str = "public, max-age=30, s-maxage=60";

/// Resolve the `ids` query parameter to a non-empty, allow-listed set.
///
/// Tokens are trimmed and lowercased; unknown and repeated ids are dropped,
/// first-seen order is kept, and the result is capped at [`MAX_IDS`]. When
/// nothing survives, the [`DEFAULT_IDS`] pair is used.
pub fn normalize_ids(raw: Option<&str>) -> Vec<&'static str> {
    let mut ids: Vec<&'static str> = Vec::with_capacity(MAX_IDS);

    for token in raw.unwrap_or(DEFAULT_IDS).split(',') {
        let token = token.trim().to_lowercase();
        if token.is_empty() {
            continue;
        }
        if let Some(&id) = ALLOWED_IDS.iter().find(|allowed| **allowed == token) {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        if ids.len() == MAX_IDS {
            break;
        }
    }

    if ids.is_empty() {
        return default_ids();
    }
    ids
}

pub fn join_ids(ids: &[&str]) -> String {
    ids.join(",")
}

fn default_ids() -> Vec<&'static str> {
    DEFAULT_IDS.split(',').collect()
}

/// Leading slice of an upstream body, cut on a character boundary.
pub fn body_preview(body: &str) -> String {
    body.chars().take(BODY_PREVIEW_CHARS).collect()
}
