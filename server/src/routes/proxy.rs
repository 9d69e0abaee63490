//! `/api/*` forwarding to the remote admin API.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser only ever talks to this origin. Requests are replayed upstream
//! with method, path, query, body and end-to-end headers (including the bearer
//! `Authorization`) intact; the upstream response is returned as-is. Failures
//! to reach upstream answer with the same `{ success, error }` envelope the
//! API uses so the client surfaces them like any other failure.

#[cfg(test)]
#[path = "proxy_test.rs"]
mod proxy_test;

use std::time::Instant;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderName, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Json, Response};

use crate::state::AppState;

#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("upstream timed out")]
    Timeout,

    #[error("upstream unreachable: {0}")]
    Unreachable(String),

    #[error("upstream body unreadable: {0}")]
    Body(String),
}

impl ProxyError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Timeout => StatusCode::GATEWAY_TIMEOUT,
            Self::Unreachable(_) | Self::Body(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl From<reqwest::Error> for ProxyError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() { Self::Timeout } else { Self::Unreachable(e.to_string()) }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "success": false, "error": "Admin API unavailable. Please try again." });
        (self.status(), Json(body)).into_response()
    }
}

/// Join the upstream base with the incoming path and query.
pub fn upstream_url(base: &str, uri: &Uri) -> String {
    let path_and_query = uri.path_and_query().map_or_else(|| uri.path(), |pq| pq.as_str());
    format!("{}{path_and_query}", base.trim_end_matches('/'))
}

/// Copy `headers` without hop-by-hop entries and without `Content-Length`,
/// which the HTTP client recomputes.
pub fn forwardable_headers(headers: &HeaderMap) -> HeaderMap {
    let mut out = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        if is_hop_by_hop(name) || *name == header::CONTENT_LENGTH {
            continue;
        }
        out.append(name.clone(), value.clone());
    }
    out
}

/// Headers that describe a single connection and must not be forwarded.
fn is_hop_by_hop(name: &HeaderName) -> bool {
    matches!(
        name.as_str(),
        "connection"
            | "keep-alive"
            | "proxy-authenticate"
            | "proxy-authorization"
            | "te"
            | "trailer"
            | "transfer-encoding"
            | "upgrade"
            | "host"
    )
}

/// Any-method handler mounted at `/api/{*path}`.
pub async fn forward(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ProxyError> {
    let started = Instant::now();
    let url = upstream_url(&state.config.api_base_url, &uri);

    let result = send(&state, method.clone(), &url, &headers, body).await;
    let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    match &result {
        Ok(resp) => tracing::info!(%method, path = uri.path(), status = resp.status().as_u16(), elapsed_ms, "proxied"),
        Err(e) => tracing::warn!(%method, path = uri.path(), error = %e, elapsed_ms, "proxy failed"),
    }
    result
}

async fn send(state: &AppState, method: Method, url: &str, headers: &HeaderMap, body: Bytes) -> Result<Response, ProxyError> {
    let upstream = state
        .http
        .request(method, url)
        .headers(forwardable_headers(headers))
        .body(body)
        .send()
        .await?;

    let status = upstream.status();
    let response_headers = forwardable_headers(upstream.headers());
    let bytes = upstream.bytes().await.map_err(|e| ProxyError::Body(e.to_string()))?;
    Ok((status, response_headers, bytes).into_response())
}
