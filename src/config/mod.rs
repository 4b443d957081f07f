//! Configuration subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize, semantic checks)
//!     → ProxyConfig (validated, immutable)
//!
//! or: CLI flags → ProxyConfig directly (main.rs)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults so a minimal config stays minimal
//! - Semantic validation (non-empty backends, parseable URLs) runs before
//!   the config is accepted; syntactic validation is serde's job

pub mod loader;
pub mod schema;

pub use loader::load_config;
pub use schema::{BackendConfig, ListenerConfig, ProxyConfig, TimeoutConfig};
