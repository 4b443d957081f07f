//! Backend selection subsystem.
//!
//! # Data Flow
//! ```text
//! Inbound request arrives at the proxy handler
//!     → round_robin.rs (claim the next rotation slot)
//!     → backend.rs (the selected BackendTarget: scheme, host, path, query)
//!     → Handler rewrites and forwards to that target
//! ```
//!
//! # Design Decisions
//! - Targets are parsed once at construction and immutable afterwards
//! - Selection is an atomic ticket counter reduced modulo the target count,
//!   so concurrent dispatches never claim the same slot
//! - Rotation is unconditional: no health filtering, no skipping on failure

pub mod backend;
pub mod round_robin;

pub use backend::{BackendTarget, TargetSet};
pub use round_robin::RoundRobin;
