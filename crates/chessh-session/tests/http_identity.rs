//! Integration tests for `HttpIdentitySource` + `SessionResolver`.
//!
//! These spin up a real HTTP backend (axum on a random port) that plays
//! the identity endpoint, then run the resolver against it end to end.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::get;
use chessh_protocol::{Expiration, Player};
use chessh_session::{
    HttpIdentityConfig, HttpIdentitySource, ResolutionStatus, SessionResolver, SessionState,
    SessionStore, SharedSessionStore,
};
use serde_json::json;

// =========================================================================
// Mock backend
// =========================================================================

#[derive(Clone)]
struct Backend {
    status: StatusCode,
    body: &'static str,
    delay: Duration,
    hits: Arc<AtomicUsize>,
    last_cookie: Arc<Mutex<Option<String>>>,
}

impl Backend {
    fn new(status: StatusCode, body: &'static str) -> Self {
        Self {
            status,
            body,
            delay: Duration::ZERO,
            hits: Arc::new(AtomicUsize::new(0)),
            last_cookie: Arc::new(Mutex::new(None)),
        }
    }

    fn ok(body: &'static str) -> Self {
        Self::new(StatusCode::OK, body)
    }
}

async fn identity(State(backend): State<Backend>, headers: HeaderMap) -> impl IntoResponse {
    backend.hits.fetch_add(1, Ordering::SeqCst);
    let cookie = headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    *backend.last_cookie.lock().unwrap() = cookie;

    if !backend.delay.is_zero() {
        tokio::time::sleep(backend.delay).await;
    }

    (
        backend.status,
        [(header::CONTENT_TYPE, "application/json")],
        backend.body,
    )
}

/// Starts the mock backend on a random port and returns its origin.
async fn start_backend(backend: Backend) -> String {
    let app = Router::new()
        .route("/api/player/token/me", get(identity))
        .with_state(backend);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("should bind");
    let addr = listener.local_addr().expect("should have local addr");

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    format!("http://{addr}")
}

fn resolver_for(
    config: HttpIdentityConfig,
) -> (
    SessionResolver<HttpIdentitySource, SharedSessionStore>,
    Arc<SharedSessionStore>,
) {
    let store = Arc::new(SharedSessionStore::new());
    let source = HttpIdentitySource::new(config).expect("source should build");
    (SessionResolver::new(source, Arc::clone(&store)), store)
}

fn config_for(origin: String) -> HttpIdentityConfig {
    HttpIdentityConfig {
        origin,
        ..HttpIdentityConfig::default()
    }
}

// =========================================================================
// Scenarios
// =========================================================================

#[tokio::test]
async fn test_named_player_signs_in() {
    let backend = Backend::ok(r#"{"player": {"username": "alice"}, "expiration": 1234567890}"#);
    let hits = Arc::clone(&backend.hits);
    let origin = start_backend(backend).await;
    let (resolver, store) = resolver_for(config_for(origin));

    let status = resolver.activate().settled().await;

    assert_eq!(status, ResolutionStatus::Resolved { signed_in: true });
    assert_eq!(
        store.read(),
        SessionState {
            signed_in: true,
            player: Some(Player::from_value(json!({"username": "alice"}))),
            session_expiration: Some(Expiration::from(1_234_567_890)),
        }
    );
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_null_player_stays_signed_out() {
    let origin = start_backend(Backend::ok(r#"{"player": null, "expiration": null}"#)).await;
    let (resolver, store) = resolver_for(config_for(origin));

    let status = resolver.activate().settled().await;

    assert_eq!(status, ResolutionStatus::Resolved { signed_in: false });
    assert_eq!(store.read(), SessionState::default());
}

#[tokio::test]
async fn test_empty_player_record_signs_in_without_name() {
    let origin = start_backend(Backend::ok(r#"{"player": {}, "expiration": null}"#)).await;
    let (resolver, store) = resolver_for(config_for(origin));

    resolver.activate().settled().await;

    let state = store.read();
    assert!(state.signed_in);
    assert_eq!(state.display_name(), "");
    assert!(state.session_expiration.is_none());
}

#[tokio::test]
async fn test_error_status_leaves_store_untouched() {
    let origin = start_backend(Backend::new(
        StatusCode::INTERNAL_SERVER_ERROR,
        r#"{"player": null}"#,
    ))
    .await;
    let (resolver, store) = resolver_for(config_for(origin));

    let status = resolver.activate().settled().await;

    assert!(
        matches!(status, ResolutionStatus::Failed(ref msg) if msg.contains("500")),
        "got {status:?}"
    );
    assert_eq!(store.read(), SessionState::default());
}

#[tokio::test]
async fn test_non_json_body_leaves_store_untouched() {
    let origin = start_backend(Backend::ok("<html>oops</html>")).await;
    let (resolver, store) = resolver_for(config_for(origin));

    let status = resolver.activate().settled().await;

    assert!(matches!(status, ResolutionStatus::Failed(_)));
    assert_eq!(store.read(), SessionState::default());
}

#[tokio::test]
async fn test_connection_refused_leaves_store_untouched() {
    // Grab a free port, then close it so nothing is listening there.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("should bind");
    let addr = listener.local_addr().expect("should have local addr");
    drop(listener);

    let (resolver, store) = resolver_for(config_for(format!("http://{addr}")));
    let mut rx = store.subscribe();

    let status = resolver.activate().settled().await;

    assert!(matches!(status, ResolutionStatus::Failed(_)));
    assert!(!rx.has_changed().unwrap());
    assert!(!store.read().signed_in);
}

#[tokio::test]
async fn test_session_cookie_is_attached() {
    let backend = Backend::ok(r#"{"player": null}"#);
    let last_cookie = Arc::clone(&backend.last_cookie);
    let origin = start_backend(backend).await;
    let (resolver, _store) = resolver_for(HttpIdentityConfig {
        origin,
        session_cookie: Some("_chessh_key=abc123".into()),
        ..HttpIdentityConfig::default()
    });

    resolver.activate().settled().await;

    assert_eq!(
        last_cookie.lock().unwrap().as_deref(),
        Some("_chessh_key=abc123")
    );
}

#[tokio::test]
async fn test_request_timeout_fails_resolution() {
    let mut backend = Backend::ok(r#"{"player": {"username": "slow"}}"#);
    backend.delay = Duration::from_secs(5);
    let origin = start_backend(backend).await;
    let (resolver, store) = resolver_for(HttpIdentityConfig {
        origin,
        request_timeout: Some(Duration::from_millis(50)),
        ..HttpIdentityConfig::default()
    });

    let status = resolver.activate().settled().await;

    assert!(matches!(status, ResolutionStatus::Failed(_)));
    assert!(!store.read().signed_in);
}

#[tokio::test]
async fn test_cancelled_activation_ignores_late_response() {
    let mut backend = Backend::ok(r#"{"player": {"username": "late"}}"#);
    backend.delay = Duration::from_millis(100);
    let hits = Arc::clone(&backend.hits);
    let origin = start_backend(backend).await;
    let (resolver, store) = resolver_for(config_for(origin));

    let activation = resolver.activate();
    // Wait until the request has actually reached the backend.
    while hits.load(Ordering::SeqCst) == 0 {
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    activation.cancel();
    tokio::time::sleep(Duration::from_millis(250)).await;

    assert_eq!(store.read(), SessionState::default());
}
