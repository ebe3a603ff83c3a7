//! Middleware applied to every route.
//!
//! - Locale cookie resolution
//! - Request logging with latency tracking

pub mod locale;
pub mod logging;

pub use locale::locale_cookie;
pub use logging::request_logging;
