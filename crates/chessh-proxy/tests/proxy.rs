//! Integration tests for the dev proxy.
//!
//! Each test starts a real echo backend and a real proxy in front of it,
//! both on random ports, and talks to the proxy over HTTP.

use std::time::Duration;

use axum::Router;
use axum::extract::Request;
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use chessh_proxy::{BuildMode, CORS_ALLOW_METHODS, DevProxy};
use serde_json::{Value, json};

// =========================================================================
// Helpers
// =========================================================================

/// Echoes back what it received as JSON.
async fn echo(request: Request) -> impl IntoResponse {
    let (parts, body) = request.into_parts();
    let body = axum::body::to_bytes(body, usize::MAX).await.unwrap_or_default();
    let host = parts
        .headers
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .unwrap_or_default()
        .to_string();

    let reply = json!({
        "method": parts.method.as_str(),
        "path": parts.uri.path(),
        "query": parts.uri.query(),
        "host": host,
        "body": String::from_utf8_lossy(&body),
    });

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        reply.to_string(),
    )
}

/// Starts the echo backend and returns its address.
async fn start_backend() -> String {
    let app = Router::new().fallback(echo);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("should bind");
    let addr = listener.local_addr().expect("should have local addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr.to_string()
}

/// Starts a proxy in front of `target` and returns its base URL.
async fn start_proxy(target: &str, mode: BuildMode) -> String {
    let proxy = DevProxy::builder()
        .bind("127.0.0.1:0")
        .target(target)
        .mode(mode)
        .build()
        .await
        .expect("proxy should build");
    let addr = proxy.local_addr().expect("should have local addr");
    tokio::spawn(async move {
        let _ = proxy.run().await;
    });
    tokio::time::sleep(Duration::from_millis(10)).await;
    format!("http://{addr}")
}

// =========================================================================
// Tests
// =========================================================================

#[tokio::test]
async fn test_get_strips_prefix_and_keeps_query() {
    let backend = start_backend().await;
    let proxy = start_proxy(&format!("http://{backend}"), BuildMode::Development).await;

    let response = reqwest::get(format!("{proxy}/api/player/token/me?x=1"))
        .await
        .expect("request should succeed");

    assert_eq!(response.status(), StatusCode::OK);
    let echoed: Value = response.json().await.expect("json body");
    assert_eq!(echoed["method"], "GET");
    assert_eq!(echoed["path"], "/player/token/me");
    assert_eq!(echoed["query"], "x=1");
}

#[tokio::test]
async fn test_response_gets_cors_headers() {
    let backend = start_backend().await;
    let proxy = start_proxy(&format!("http://{backend}"), BuildMode::Development).await;

    let response = reqwest::get(format!("{proxy}/api/keys"))
        .await
        .expect("request should succeed");

    let headers = response.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(
        headers[header::ACCESS_CONTROL_ALLOW_METHODS],
        CORS_ALLOW_METHODS
    );
    // The backend's own headers survive.
    assert_eq!(headers[header::CONTENT_TYPE], "application/json");
}

#[tokio::test]
async fn test_bare_prefix_maps_to_root() {
    let backend = start_backend().await;
    let proxy = start_proxy(&format!("http://{backend}"), BuildMode::Development).await;

    let echoed: Value = reqwest::get(format!("{proxy}/api"))
        .await
        .expect("request should succeed")
        .json()
        .await
        .expect("json body");

    assert_eq!(echoed["path"], "/");
}

#[tokio::test]
async fn test_prefix_with_trailing_slash_maps_to_root() {
    let backend = start_backend().await;
    let proxy = start_proxy(&format!("http://{backend}"), BuildMode::Development).await;

    let response = reqwest::get(format!("{proxy}/api/?page=2"))
        .await
        .expect("request should succeed");

    assert_eq!(response.status(), StatusCode::OK);
    let echoed: Value = response.json().await.expect("json body");
    assert_eq!(echoed["path"], "/");
    assert_eq!(echoed["query"], "page=2");
}

#[tokio::test]
async fn test_post_body_and_host_are_forwarded() {
    let backend = start_backend().await;
    let proxy = start_proxy(&format!("http://{backend}"), BuildMode::Development).await;

    let echoed: Value = reqwest::Client::new()
        .post(format!("{proxy}/api/player/password"))
        .body("hunter2")
        .send()
        .await
        .expect("request should succeed")
        .json()
        .await
        .expect("json body");

    assert_eq!(echoed["method"], "POST");
    assert_eq!(echoed["body"], "hunter2");
    // change-origin: the backend sees its own host, not the proxy's.
    assert_eq!(echoed["host"], backend);
}

#[tokio::test]
async fn test_paths_outside_prefix_are_not_proxied() {
    let backend = start_backend().await;
    let proxy = start_proxy(&format!("http://{backend}"), BuildMode::Development).await;

    let response = reqwest::get(format!("{proxy}/home"))
        .await
        .expect("request should succeed");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_production_mode_does_not_proxy() {
    let backend = start_backend().await;
    let proxy = start_proxy(&format!("http://{backend}"), BuildMode::Production).await;

    let response = reqwest::get(format!("{proxy}/api/player/token/me"))
        .await
        .expect("request should succeed");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none()
    );
}

#[tokio::test]
async fn test_unreachable_backend_returns_bad_gateway() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("should bind");
    let dead = listener.local_addr().expect("should have local addr");
    drop(listener);
    let proxy = start_proxy(&format!("http://{dead}"), BuildMode::Development).await;

    let response = reqwest::get(format!("{proxy}/api/player/token/me"))
        .await
        .expect("request should succeed");

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}
