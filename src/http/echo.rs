//! Echo backend server.
//!
//! A trivial upstream used by the demo driver and the integration tests:
//! it answers every request with a line describing how the request reached
//! it, which makes the proxy's rewriting directly observable.

use std::net::SocketAddr;

use axum::{
    extract::ConnectInfo,
    http::{header, HeaderMap, Uri},
    routing::any,
    Router,
};

use crate::error::ProxyError;
use crate::http::server::Server;

/// HTTP server that echoes every request it receives.
pub struct EchoServer {
    server: Server,
}

impl EchoServer {
    pub fn new(port: u16) -> Self {
        let router = Router::new()
            .route("/", any(echo))
            .route("/{*path}", any(echo));
        Self {
            server: Server::new(port, router),
        }
    }

    /// Serve until `stop` is called. See [`Server::start`].
    pub async fn start(&self) -> Result<(), ProxyError> {
        tracing::info!(port = self.server.port(), "echo server is serving");
        self.server.start().await
    }

    pub fn stop(&self) {
        self.server.stop();
    }

    /// Registration URL for this backend.
    ///
    /// Carries a fixed demonstration path and query so callers can watch
    /// both get merged into forwarded requests.
    pub fn address(&self) -> String {
        format!("http://127.0.0.1:{}/abc?q=abc", self.server.port())
    }
}

async fn echo(ConnectInfo(peer): ConnectInfo<SocketAddr>, headers: HeaderMap, uri: Uri) -> String {
    tracing::info!(peer = %peer, uri = %uri, "request received");
    let host = headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    format!("request from {} received, handled as http://{}{}", peer, host, uri)
}
