pub mod routes;

use anyhow::Result;
use std::sync::Arc;

use crate::config::Config;
use crate::market_data::CoinGeckoClient;

pub use routes::create_router;

/// Shared application state
///
/// Read-only after startup; every request works on its own clone.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub coingecko: Arc<CoinGeckoClient>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let coingecko = CoinGeckoClient::new(
            &config.coingecko_base_url,
            config.coingecko_api_key.clone(),
            config.upstream_timeout(),
        )?;

        Ok(Self {
            config: Arc::new(config),
            coingecko: Arc::new(coingecko),
        })
    }
}
