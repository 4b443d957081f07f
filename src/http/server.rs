//! Server lifecycle wrapper.
//!
//! # Responsibilities
//! - Bind a TCP listener on the configured port
//! - Serve the supplied router until shutdown is requested
//! - Report bind and accept-loop failures to the caller
//!
//! # Design Decisions
//! - Bind failures are returned from `start`, never retried
//! - Every request runs on its own task; one failing handler never takes
//!   the accept loop down
//! - `stop` is idempotent and does not cancel requests already in flight

use std::net::{Ipv4Addr, SocketAddr};

use axum::Router;
use tokio::net::TcpListener;

use crate::error::ProxyError;
use crate::lifecycle::Shutdown;

/// A listening HTTP server bound to one port.
///
/// Instantiated twice in this crate: with the echo router for backends and
/// with the dispatch router for the proxy itself.
pub struct Server {
    port: u16,
    router: Router,
    shutdown: Shutdown,
}

impl Server {
    pub fn new(port: u16, router: Router) -> Self {
        Self {
            port,
            router,
            shutdown: Shutdown::new(),
        }
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Bind the port and serve until `stop` is called.
    ///
    /// Blocks the calling task. Exactly one outcome is reported per call:
    /// a bind or accept-loop error, or `Ok(())` once a requested shutdown
    /// has drained the listener.
    pub async fn start(&self) -> Result<(), ProxyError> {
        let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port));
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ProxyError::Bind {
                port: self.port,
                source,
            })?;

        tracing::info!(port = self.port, "listening");

        let mut signal = self.shutdown.subscribe();
        let app = self
            .router
            .clone()
            .into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = signal.recv().await;
            })
            .await
            .map_err(ProxyError::Serve)?;

        tracing::info!(port = self.port, "server stopped");
        Ok(())
    }

    /// Request shutdown, unblocking a pending `start`.
    ///
    /// Safe to call any number of times; calls after the first are no-ops.
    pub fn stop(&self) {
        tracing::info!(port = self.port, "shutdown requested");
        self.shutdown.trigger();
    }
}
