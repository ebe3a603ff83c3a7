use axum::{
    extract::{Query, State},
    http::{
        header::{CACHE_CONTROL, CONTENT_TYPE},
        Method, StatusCode,
    },
    middleware,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};

use super::AppState;
use crate::market_data::{join_ids, normalize_ids, ProxyError, MARKET_DATA_CACHE_CONTROL};
use crate::middleware::{locale_cookie, request_logging};

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/health", get(health_check))
        .route("/market-data", get(get_market_data))
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(state.clone(), locale_cookie))
        .layer(middleware::from_fn(request_logging))
        .layer(cors)
        .with_state(state)
}

// ===== Route Handlers =====

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// Pages are served elsewhere; unknown paths still pass through the
/// locale middleware so the cookie is set on first contact.
async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "error": "Not found" })),
    )
        .into_response()
}

/// Proxy a market listing lookup for the allow-listed subset of `ids`.
///
/// The upstream JSON is relayed verbatim; it is only checked to be JSON.
async fn get_market_data(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Response, ProxyError> {
    let requested = requested_ids(&params);
    let ids = normalize_ids(requested.as_deref());
    let joined = join_ids(&ids);

    let upstream = state
        .coingecko
        .fetch_markets(&ids)
        .await
        .map_err(|e| ProxyError::transport(&joined, e))?;

    if !upstream.is_success() {
        return Err(ProxyError::UpstreamStatus {
            status: upstream.status,
            ids: joined,
            body: upstream.body,
        });
    }

    serde_json::from_str::<serde::de::IgnoredAny>(&upstream.body)
        .map_err(|e| ProxyError::transport(&joined, format!("invalid upstream JSON: {e}")))?;

    Ok((
        [
            (CONTENT_TYPE, "application/json"),
            (CACHE_CONTROL, MARKET_DATA_CACHE_CONTROL),
        ],
        upstream.body,
    )
        .into_response())
}

/// Raw `ids` value. Repeated parameters (`?ids=a&ids=b`) are joined so
/// they are normalized like a single comma-separated list.
fn requested_ids(params: &[(String, String)]) -> Option<String> {
    let values: Vec<&str> = params
        .iter()
        .filter(|(key, _)| key == "ids")
        .map(|(_, value)| value.as_str())
        .collect();

    if values.is_empty() {
        None
    } else {
        Some(values.join(","))
    }
}

// ===== Response Types =====

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
    timestamp: String,
}
