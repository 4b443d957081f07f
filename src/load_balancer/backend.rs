//! Backend target abstraction.
//!
//! # Responsibilities
//! - Represent a single upstream as a parsed base URL
//! - Hold the ordered, non-empty target set the rotation walks over

use url::Url;

use crate::error::ProxyError;

/// A single upstream target, parsed from its base URL at construction.
///
/// Read-only after construction; shared freely across request tasks.
#[derive(Debug, Clone)]
pub struct BackendTarget {
    base_url: Url,
}

impl BackendTarget {
    /// Parse a base URL string into a target.
    pub fn parse(url: &str) -> Result<Self, ProxyError> {
        let base_url = Url::parse(url).map_err(|source| ProxyError::InvalidBackend {
            url: url.to_string(),
            source,
        })?;
        Ok(Self { base_url })
    }

    pub fn scheme(&self) -> &str {
        self.base_url.scheme()
    }

    /// Host and port of the target, e.g. `127.0.0.1:18001`.
    /// The port is omitted when it is the scheme default.
    pub fn authority(&self) -> String {
        let host = self.base_url.host_str().unwrap_or_default();
        match self.base_url.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        }
    }

    /// Base path the target was registered with.
    pub fn path(&self) -> &str {
        self.base_url.path()
    }

    /// Fixed query string carried by the target's base URL, if any.
    pub fn query(&self) -> Option<&str> {
        self.base_url.query()
    }
}

impl std::fmt::Display for BackendTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.base_url)
    }
}

/// Ordered, immutable set of backend targets.
///
/// Registration order is selection order; the set never changes after
/// construction, so indexed reads are safe from any task.
#[derive(Debug)]
pub struct TargetSet {
    targets: Vec<BackendTarget>,
}

impl TargetSet {
    /// Parse every base URL into a target, in registration order.
    ///
    /// Fails on the first malformed URL, naming the offending string, and
    /// rejects an empty list. No partial sets are ever produced.
    pub fn parse<S: AsRef<str>>(urls: &[S]) -> Result<Self, ProxyError> {
        if urls.is_empty() {
            return Err(ProxyError::NoBackends);
        }
        let mut targets = Vec::with_capacity(urls.len());
        for url in urls {
            targets.push(BackendTarget::parse(url.as_ref())?);
        }
        Ok(Self { targets })
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Target at `index`. Callers reduce their slot modulo `len` first.
    pub fn get(&self, index: usize) -> &BackendTarget {
        &self.targets[index]
    }

    pub fn iter(&self) -> impl Iterator<Item = &BackendTarget> {
        self.targets.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_keeps_registration_order() {
        let set = TargetSet::parse(&[
            "http://127.0.0.1:18001/abc?q=abc",
            "http://127.0.0.1:18002",
        ])
        .unwrap();

        assert_eq!(set.len(), 2);
        assert_eq!(set.get(0).authority(), "127.0.0.1:18001");
        assert_eq!(set.get(0).path(), "/abc");
        assert_eq!(set.get(0).query(), Some("q=abc"));
        assert_eq!(set.get(1).authority(), "127.0.0.1:18002");
        assert_eq!(set.get(1).query(), None);
    }

    #[test]
    fn parse_rejects_empty_set() {
        let err = TargetSet::parse::<&str>(&[]).unwrap_err();
        assert!(matches!(err, ProxyError::NoBackends));
    }

    #[test]
    fn parse_names_the_offending_url() {
        let err =
            TargetSet::parse(&["http://127.0.0.1:18001", "://not-a-url"]).unwrap_err();
        match err {
            ProxyError::InvalidBackend { url, .. } => assert_eq!(url, "://not-a-url"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
