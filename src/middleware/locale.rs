//! Locale cookie middleware.
//!
//! Runs on every route. Requests without a `wolvcapital_locale` cookie get
//! one on the way out; the request itself is forwarded untouched.

use axum::{
    extract::{Request, State},
    http::{header::ACCEPT_LANGUAGE, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use tracing::debug;

use crate::api::AppState;
use crate::locale::{
    decide, LocaleDecision, LocaleRequest, LOCALE_COOKIE, LOCALE_COOKIE_MAX_AGE_SECS,
};

pub async fn locale_cookie(
    State(state): State<AppState>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Response {
    let decision = {
        let headers = request.headers();
        let locale_request = LocaleRequest {
            path: request.uri().path(),
            cookie: jar.get(LOCALE_COOKIE).map(Cookie::value),
            country: country_hint(headers, &state.config.geo_headers),
            accept_language: headers
                .get(ACCEPT_LANGUAGE)
                .and_then(|value| value.to_str().ok()),
        };

        let decision = decide(&locale_request, &state.config.static_prefixes);
        if let LocaleDecision::SetCookie(locale) = decision {
            debug!(path = %locale_request.path, locale = %locale, "Setting locale cookie");
        }
        decision
    };

    let response = next.run(request).await;

    match decision {
        LocaleDecision::PassThrough => response,
        LocaleDecision::SetCookie(locale) => {
            let cookie = Cookie::build((LOCALE_COOKIE, locale.as_str()))
                .path("/")
                .max_age(time::Duration::seconds(LOCALE_COOKIE_MAX_AGE_SECS));

            (jar.add(cookie), response).into_response()
        }
    }
}

/// First configured geo header present on the request. Absent on platforms
/// that do not supply one.
fn country_hint<'a>(headers: &'a HeaderMap, names: &[String]) -> Option<&'a str> {
    names
        .iter()
        .filter_map(|name| headers.get(name.as_str()))
        .filter_map(|value| value.to_str().ok())
        .map(str::trim)
        .find(|value| !value.is_empty())
}
