//! Locale Resolution
//!
//! Picks the UI locale for a visitor that has no locale cookie yet.
//! Two strategies, first match wins:
//! 1. Geographic mapping of the hosting platform's country hint
//! 2. `Accept-Language` negotiation, falling back to English
//!
//! Everything here is a pure function of request metadata. The cookie write
//! itself lives in `middleware::locale`.

pub mod countries;

use std::fmt;

pub use countries::locale_for_country;

/// Cookie holding the visitor's locale choice.
pub const LOCALE_COOKIE: &str = "wolvcapital_locale";

/// One year, in seconds.
pub const LOCALE_COOKIE_MAX_AGE_SECS: i64 = 31_536_000;

/// UI locales with translated content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    En,
    Es,
    Fr,
}

impl Locale {
    pub const SUPPORTED: [Locale; 3] = [Locale::En, Locale::Es, Locale::Fr];

    pub fn as_str(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Es => "es",
            Locale::Fr => "fr",
        }
    }

    /// Match a base language tag (`"fr"`, `"ES"`) against the supported set.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::SUPPORTED
            .into_iter()
            .find(|locale| locale.as_str().eq_ignore_ascii_case(tag.trim()))
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request metadata the resolver looks at.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocaleRequest<'a> {
    pub path: &'a str,
    /// Current value of the locale cookie, if the request carries one.
    pub cookie: Option<&'a str>,
    /// ISO 3166-1 alpha-2 country code supplied by the hosting platform.
    pub country: Option<&'a str>,
    pub accept_language: Option<&'a str>,
}

/// What the middleware should do with the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocaleDecision {
    PassThrough,
    SetCookie(Locale),
}

pub fn is_static_asset<S: AsRef<str>>(path: &str, prefixes: &[S]) -> bool {
    prefixes
        .iter()
        .any(|prefix| path.starts_with(prefix.as_ref()))
}

/// Base language tags from an `Accept-Language` header, in header order.
///
/// `"fr-CA,en;q=0.8"` becomes `["fr", "en"]`. Quality values are dropped,
/// not used for sorting.
pub fn parse_accept_language(header: &str) -> Vec<String> {
    header
        .split(',')
        .filter_map(|entry| {
            let tag = entry.split(';').next()?.trim();
            let base = tag.split(['-', '_']).next()?.trim();
            if base.is_empty() || base == "*" {
                None
            } else {
                Some(base.to_ascii_lowercase())
            }
        })
        .collect()
}

pub fn negotiate(accept_language: Option<&str>) -> Locale {
    accept_language
        .map(parse_accept_language)
        .unwrap_or_default()
        .iter()
        .find_map(|tag| Locale::from_tag(tag))
        .unwrap_or_default()
}

pub fn resolve(request: &LocaleRequest<'_>) -> Locale {
    request
        .country
        .and_then(locale_for_country)
        .unwrap_or_else(|| negotiate(request.accept_language))
}

/// Static assets and visitors that already chose a locale are left alone.
pub fn decide<S: AsRef<str>>(request: &LocaleRequest<'_>, static_prefixes: &[S]) -> LocaleDecision {
    if is_static_asset(request.path, static_prefixes) || request.cookie.is_some() {
        return LocaleDecision::PassThrough;
    }

    LocaleDecision::SetCookie(resolve(request))
}
