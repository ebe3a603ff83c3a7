//! Service configuration
//!
//! Every option is a CLI flag backed by an environment variable, so the
//! binary can be driven from `.env`, the hosting platform, or the shell.

use anyhow::{bail, Result};
use clap::Parser;
use std::time::Duration;

use crate::market_data::coingecko::COINGECKO_API_BASE;

const DEFAULT_GEO_HEADERS: [&str; 2] = ["x-vercel-ip-country", "cf-ipcountry"];

const DEFAULT_STATIC_PREFIXES: [&str; 6] = [
    "/_next/",
    "/static/",
    "/assets/",
    "/favicon.ico",
    "/robots.txt",
    "/sitemap.xml",
];

#[derive(Debug, Clone, Parser)]
#[command(name = "wolvcapital")]
#[command(about = "WolvCapital web edge: locale resolution and market data proxy")]
pub struct Config {
    /// Interface to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// CoinGecko REST base URL
    #[arg(long, env = "COINGECKO_BASE_URL", default_value = COINGECKO_API_BASE)]
    pub coingecko_base_url: String,

    /// Optional CoinGecko demo API key
    #[arg(long, env = "COINGECKO_API_KEY")]
    pub coingecko_api_key: Option<String>,

    /// Upper bound on a single upstream call
    #[arg(long, env = "UPSTREAM_TIMEOUT_SECS", default_value_t = 10)]
    pub upstream_timeout_secs: u64,

    /// Request headers carrying the visitor's country code, checked in order
    #[arg(
        long = "geo-headers",
        env = "GEO_COUNTRY_HEADERS",
        value_delimiter = ',',
        default_values = DEFAULT_GEO_HEADERS
    )]
    pub geo_headers: Vec<String>,

    /// Path prefixes that never receive a locale cookie
    #[arg(
        long,
        env = "STATIC_PATH_PREFIXES",
        value_delimiter = ',',
        default_values = DEFAULT_STATIC_PREFIXES
    )]
    pub static_prefixes: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            coingecko_base_url: COINGECKO_API_BASE.to_string(),
            coingecko_api_key: None,
            upstream_timeout_secs: 10,
            geo_headers: DEFAULT_GEO_HEADERS.iter().map(|h| h.to_string()).collect(),
            static_prefixes: DEFAULT_STATIC_PREFIXES.iter().map(|p| p.to_string()).collect(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.upstream_timeout_secs == 0 {
            bail!("UPSTREAM_TIMEOUT_SECS must be greater than zero");
        }
        if !(self.coingecko_base_url.starts_with("http://")
            || self.coingecko_base_url.starts_with("https://"))
        {
            bail!(
                "COINGECKO_BASE_URL must be an http(s) URL, got {}",
                self.coingecko_base_url
            );
        }
        Ok(())
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }

    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
