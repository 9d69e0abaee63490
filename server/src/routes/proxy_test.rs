use axum::Router;
use axum::http::HeaderValue;
use axum::routing::{any, get};

use super::*;
use crate::config::{ServerConfig, UpstreamTimeouts};

fn state_for(base: &str) -> AppState {
    AppState::new(ServerConfig {
        port: 0,
        api_base_url: base.to_owned(),
        timeouts: UpstreamTimeouts { request_secs: 5, connect_secs: 1 },
    })
    .unwrap()
}

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

#[test]
fn upstream_url_keeps_path_and_query() {
    let uri: Uri = "/api/admin/users/7/messages?limit=100&offset=0".parse().unwrap();
    assert_eq!(
        upstream_url("https://api.test/", &uri),
        "https://api.test/api/admin/users/7/messages?limit=100&offset=0"
    );
}

#[test]
fn forwardable_headers_drops_hop_by_hop_and_length() {
    let mut headers = HeaderMap::new();
    headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));
    headers.insert(header::HOST, HeaderValue::from_static("localhost:3000"));
    headers.insert(header::CONTENT_LENGTH, HeaderValue::from_static("12"));
    headers.insert("keep-alive", HeaderValue::from_static("timeout=5"));

    let out = forwardable_headers(&headers);

    assert_eq!(out.len(), 2);
    assert_eq!(out.get(header::AUTHORIZATION).unwrap(), "Bearer abc");
    assert!(out.get(header::HOST).is_none());
}

#[test]
fn proxy_errors_map_to_gateway_statuses() {
    assert_eq!(ProxyError::Timeout.status(), StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(ProxyError::Unreachable("refused".to_owned()).status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn forward_replays_method_path_auth_and_body() {
    let upstream = Router::new().route(
        "/api/admin/users/{id}/admin",
        any(|method: Method, uri: Uri, headers: HeaderMap, body: String| async move {
            let auth = headers
                .get(header::AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default()
                .to_owned();
            Json(serde_json::json!({
                "success": true,
                "method": method.as_str(),
                "path": uri.path(),
                "auth": auth,
                "body": body,
            }))
        }),
    );
    let base = serve(upstream).await;
    let proxy = serve(Router::new().route("/api/{*path}", any(forward)).with_state(state_for(&base))).await;

    let resp = reqwest::Client::new()
        .put(format!("{proxy}/api/admin/users/7/admin"))
        .bearer_auth("tok")
        .body(r#"{"is_admin":true}"#)
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["method"], "PUT");
    assert_eq!(body["path"], "/api/admin/users/7/admin");
    assert_eq!(body["auth"], "Bearer tok");
    assert_eq!(body["body"], r#"{"is_admin":true}"#);
}

#[tokio::test]
async fn forward_passes_upstream_failure_status_through() {
    let upstream = Router::new().route(
        "/api/admin/users",
        get(|| async { (StatusCode::FORBIDDEN, Json(serde_json::json!({ "success": false, "error": "Admin only" }))) }),
    );
    let base = serve(upstream).await;
    let proxy = serve(Router::new().route("/api/{*path}", any(forward)).with_state(state_for(&base))).await;

    let resp = reqwest::get(format!("{proxy}/api/admin/users")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Admin only");
}

#[tokio::test]
async fn unreachable_upstream_answers_with_envelope() {
    // Bind then drop to get a port nothing listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let dead = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);
    let proxy = serve(Router::new().route("/api/{*path}", any(forward)).with_state(state_for(&dead))).await;

    let resp = reqwest::get(format!("{proxy}/api/auth/me")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
}
