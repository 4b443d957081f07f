//! Crate-wide error type.
//!
//! # Design Decisions
//! - Construction errors (bad backend URL, empty target set, config file
//!   problems) are fatal and surface before any listener binds
//! - Bind failures belong to the `start` call that hit them, not retried
//! - Upstream failures never appear here: they are answered inline as
//!   502 responses scoped to the one request that hit them

use thiserror::Error;

/// Errors surfaced by proxy construction and the server lifecycle.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// A backend base URL failed to parse. Names the offending string.
    #[error("parse backend url {url:?}: {source}")]
    InvalidBackend {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The target set was empty at construction time.
    #[error("no backends configured")]
    NoBackends,

    /// Configuration file could not be read.
    #[error("read config: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file is not valid TOML.
    #[error("parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Listening port could not be bound.
    #[error("bind port {port}: {source}")]
    Bind {
        port: u16,
        #[source]
        source: std::io::Error,
    },

    /// The accept loop failed after a successful bind.
    #[error("serve: {0}")]
    Serve(std::io::Error),
}
