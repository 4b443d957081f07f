//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::ProxyConfig;
use crate::error::ProxyError;
use crate::load_balancer::TargetSet;

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ProxyConfig, ProxyError> {
    let content = fs::read_to_string(path)?;
    let config: ProxyConfig = toml::from_str(&content)?;
    validate(&config)?;
    Ok(config)
}

/// Semantic checks on an already-parsed config.
///
/// Parsing the backend URLs here means a bad config dies at load time with
/// the offending string in the error, before any port is bound.
pub fn validate(config: &ProxyConfig) -> Result<(), ProxyError> {
    TargetSet::parse(&config.backend_urls()).map(|_| ())
}
