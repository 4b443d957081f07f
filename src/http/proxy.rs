//! Reverse proxy server and dispatch handler.
//!
//! # Responsibilities
//! - Parse the backend list into an immutable target set (fail fast)
//! - Claim the next rotation slot once per inbound request
//! - Rewrite and forward the request, relaying the response verbatim
//!
//! # Design Decisions
//! - One shared hyper client; connection reuse is left to the transport
//! - Upstream failures answer that one request with 502 and leave the
//!   rotation untouched: no retry against another backend, no skipping
//! - Response bodies are streamed back, not buffered

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::error::ProxyError;
use crate::http::rewrite;
use crate::http::server::Server;
use crate::load_balancer::{RoundRobin, TargetSet};

/// Default ceiling on a single proxied request.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// State shared by every dispatch task.
#[derive(Clone)]
struct ProxyState {
    targets: Arc<TargetSet>,
    rotation: Arc<RoundRobin>,
    client: Client<HttpConnector, Body>,
}

/// Round-robin reverse proxy over a fixed set of backends.
pub struct ReverseProxy {
    server: Server,
    backend_count: usize,
}

impl ReverseProxy {
    /// Build a proxy listening on `port` that rotates over `hosts`.
    ///
    /// Every host string must parse as a base URL; the first malformed one
    /// fails construction with an error naming it.
    pub fn new<S: AsRef<str>>(hosts: &[S], port: u16) -> Result<Self, ProxyError> {
        Self::with_request_timeout(
            hosts,
            port,
            Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }

    /// Same as [`ReverseProxy::new`] with an explicit per-request timeout.
    pub fn with_request_timeout<S: AsRef<str>>(
        hosts: &[S],
        port: u16,
        request_timeout: Duration,
    ) -> Result<Self, ProxyError> {
        let targets = Arc::new(TargetSet::parse(hosts)?);
        let backend_count = targets.len();
        for target in targets.iter() {
            tracing::debug!(backend = %target, "registered backend");
        }

        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());
        let state = ProxyState {
            targets,
            rotation: Arc::new(RoundRobin::new()),
            client,
        };

        let router = Router::new()
            .route("/{*path}", any(dispatch))
            .route("/", any(dispatch))
            .with_state(state)
            .layer(TimeoutLayer::new(request_timeout))
            .layer(TraceLayer::new_for_http());

        Ok(Self {
            server: Server::new(port, router),
            backend_count,
        })
    }

    /// Serve until `stop` is called. See [`Server::start`].
    pub async fn start(&self) -> Result<(), ProxyError> {
        tracing::info!(
            port = self.server.port(),
            backends = self.backend_count,
            "reverse proxy is serving"
        );
        self.server.start().await
    }

    pub fn stop(&self) {
        self.server.stop();
    }
}

/// Forward one inbound request to the next backend in rotation.
async fn dispatch(State(state): State<ProxyState>, request: Request<Body>) -> Response {
    let target = state.rotation.next(&state.targets);

    tracing::debug!(
        method = %request.method(),
        path = %request.uri().path(),
        backend = %target,
        "request received"
    );

    let (mut parts, body) = request.into_parts();
    let uri = match rewrite::outbound_uri(target, &parts.uri) {
        Ok(uri) => uri,
        Err(error) => {
            tracing::error!(%error, backend = %target, "outbound uri rejected");
            return (StatusCode::BAD_GATEWAY, "upstream request failed").into_response();
        }
    };
    rewrite::rewrite_headers(&mut parts.headers, target);
    parts.uri = uri;

    match state.client.request(Request::from_parts(parts, body)).await {
        Ok(response) => {
            let (parts, body) = response.into_parts();
            Response::from_parts(parts, Body::new(body))
        }
        Err(error) => {
            tracing::error!(%error, backend = %target, "upstream request failed");
            (StatusCode::BAD_GATEWAY, "upstream request failed").into_response()
        }
    }
}
