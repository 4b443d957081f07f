//! Outbound request rewriting.
//!
//! # Responsibilities
//! - Join the target's base path with the inbound path (single joining slash)
//! - Merge the target's fixed query with the inbound query, target first
//! - Force scheme, authority and Host onto the selected target
//! - Preserve the originally addressed host in X-Forwarded-Host
//!
//! # Design Decisions
//! - Query merge is positional, not key-aware: duplicate keys survive and
//!   the target's fixed parameters always come first
//! - An inbound request without a User-Agent gets an explicit empty one so
//!   the outbound transport does not inject its own

use axum::http::{header, HeaderMap, HeaderValue, Uri};

use crate::load_balancer::BackendTarget;

pub const X_FORWARDED_HOST: &str = "x-forwarded-host";

/// Join a base path and a request path with exactly one slash between them.
///
/// All four trailing/leading slash combinations collapse to a single
/// separator: a duplicate is dropped, a missing one is inserted.
pub fn single_joining_slash(a: &str, b: &str) -> String {
    let a_slash = a.ends_with('/');
    let b_slash = b.starts_with('/');
    match (a_slash, b_slash) {
        (true, true) => format!("{}{}", a, &b[1..]),
        (false, false) => format!("{}/{}", a, b),
        _ => format!("{}{}", a, b),
    }
}

/// Merge the target's fixed query with the inbound query.
///
/// When both sides are non-empty they are joined with `&`, target first.
/// Otherwise plain concatenation lets the single non-empty side (if any)
/// through. Keys are never deduplicated.
pub fn merge_query(target: Option<&str>, inbound: Option<&str>) -> Option<String> {
    let target = target.unwrap_or_default();
    let inbound = inbound.unwrap_or_default();
    let merged = if target.is_empty() || inbound.is_empty() {
        format!("{}{}", target, inbound)
    } else {
        format!("{}&{}", target, inbound)
    };
    (!merged.is_empty()).then_some(merged)
}

/// Build the URI the rewritten request is sent to: the target's scheme and
/// authority with the joined path and merged query.
pub fn outbound_uri(target: &BackendTarget, inbound: &Uri) -> Result<Uri, axum::http::Error> {
    let path = single_joining_slash(target.path(), inbound.path());
    let path_and_query = match merge_query(target.query(), inbound.query()) {
        Some(query) => format!("{}?{}", path, query),
        None => path,
    };
    Uri::builder()
        .scheme(target.scheme())
        .authority(target.authority())
        .path_and_query(path_and_query)
        .build()
}

/// Adjust headers for forwarding to `target`.
///
/// The inbound Host moves into X-Forwarded-Host before Host is overwritten
/// with the target's authority, so the backend can still recover the
/// virtual host the client addressed.
pub fn rewrite_headers(headers: &mut HeaderMap, target: &BackendTarget) {
    if !headers.contains_key(header::USER_AGENT) {
        headers.insert(header::USER_AGENT, HeaderValue::from_static(""));
    }

    let original_host = headers
        .get(header::HOST)
        .cloned()
        .unwrap_or_else(|| HeaderValue::from_static(""));
    headers.insert(X_FORWARDED_HOST, original_host);

    if let Ok(host) = HeaderValue::from_str(&target.authority()) {
        headers.insert(header::HOST, host);
    }
}
