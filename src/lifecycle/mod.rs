//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Shutdown (shutdown.rs):
//!     stop requested → broadcast fires → pending serve loop unblocks
//!
//! Signals (signals.rs):
//!     SIGINT → trigger shutdown on the watched servers
//! ```
//!
//! # Design Decisions
//! - One coordinator per server instance; no global registry
//! - Triggering is idempotent: repeated stop requests are no-ops
//! - Shutdown does not cancel requests already in flight

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
