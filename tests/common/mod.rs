//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::http::{HeaderMap, Uri};
use axum::routing::any;
use axum::{Json, Router};
use tokio::net::{TcpListener, TcpStream};

/// Build a client that talks straight to loopback ports.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

/// Wait until something is accepting connections on `addr`.
pub async fn wait_for_port(addr: SocketAddr) {
    for _ in 0..100 {
        if TcpStream::connect(addr).await.is_ok() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("nothing listening on {addr}");
}

/// Start a backend that reports how each request reached it, as JSON.
pub async fn start_capture_backend(addr: SocketAddr) {
    let app = Router::new()
        .route("/", any(capture))
        .route("/{*path}", any(capture));
    let listener = TcpListener::bind(addr).await.unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    wait_for_port(addr).await;
}

async fn capture(headers: HeaderMap, uri: Uri) -> Json<serde_json::Value> {
    let header = |name: &str| {
        headers
            .get(name)
            .map(|value| value.to_str().unwrap_or_default().to_string())
    };
    Json(serde_json::json!({
        "path": uri.path(),
        "query": uri.query(),
        "host": header("host"),
        "user_agent": header("user-agent"),
        "x_forwarded_host": header("x-forwarded-host"),
    }))
}

/// Start a backend that answers 200 and counts the requests it saw.
#[allow(dead_code)]
pub async fn start_counting_backend(addr: SocketAddr) -> Arc<AtomicUsize> {
    let count = Arc::new(AtomicUsize::new(0));
    let seen = count.clone();
    let handler = move || {
        let seen = seen.clone();
        async move {
            seen.fetch_add(1, Ordering::SeqCst);
            "ok"
        }
    };
    let app = Router::new()
        .route("/", any(handler.clone()))
        .route("/{*path}", any(handler));
    let listener = TcpListener::bind(addr).await.unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    wait_for_port(addr).await;
    count
}
