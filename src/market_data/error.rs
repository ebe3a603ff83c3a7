//! Error envelope for the market data proxy.
//!
//! Every upstream failure is terminal for the request and answered with
//! `502 Bad Gateway` plus enough context to diagnose it from the client.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use tracing::warn;

use super::{body_preview, PROVIDER};

#[derive(Debug)]
pub enum ProxyError {
    /// Upstream answered with a non-success status.
    UpstreamStatus {
        status: u16,
        ids: String,
        body: String,
    },
    /// The upstream call itself failed (network, timeout, unreadable or
    /// non-JSON body).
    Transport { ids: String, message: Option<String> },
}

impl ProxyError {
    pub fn transport(ids: &str, err: impl std::fmt::Display) -> Self {
        ProxyError::Transport {
            ids: ids.to_string(),
            message: Some(err.to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorEnvelope<'a> {
    error: &'static str,
    provider: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<u16>,
    ids: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    body_preview: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'a str>,
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let envelope = match &self {
            ProxyError::UpstreamStatus { status, ids, body } => {
                warn!(provider = PROVIDER, status, ids = %ids, "Upstream returned non-success status");
                ErrorEnvelope {
                    error: "Failed to fetch market data",
                    provider: PROVIDER,
                    status: Some(*status),
                    ids,
                    body_preview: Some(body_preview(body)),
                    message: None,
                }
            }
            ProxyError::Transport { ids, message } => {
                warn!(
                    provider = PROVIDER,
                    ids = %ids,
                    error = message.as_deref().unwrap_or("unknown"),
                    "Upstream request failed"
                );
                ErrorEnvelope {
                    error: "Market data request failed",
                    provider: PROVIDER,
                    status: None,
                    ids,
                    body_preview: None,
                    message: message.as_deref(),
                }
            }
        };

        (StatusCode::BAD_GATEWAY, Json(envelope)).into_response()
    }
}
