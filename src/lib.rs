//! WolvCapital Web Edge
//!
//! Request handling for the WolvCapital marketing site:
//! - Locale cookie resolution on every request
//! - `GET /market-data`, an allow-listed CoinGecko price proxy
//!
//! Exposed as a library so the binary and the integration tests share the
//! same router.

pub mod api;
pub mod config;
pub mod locale;
pub mod market_data;
pub mod middleware;

pub use api::{create_router, AppState};
pub use config::Config;
