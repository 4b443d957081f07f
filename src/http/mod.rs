//! HTTP subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (bind, serve, lifecycle)
//!     → proxy.rs (claim rotation slot, dispatch)
//!     → rewrite.rs (path join, query merge, header rewrite)
//!     → upstream backend (echo.rs in demos and tests)
//!     → response relayed back through proxy.rs unchanged
//! ```

pub mod echo;
pub mod proxy;
pub mod rewrite;
pub mod server;

pub use echo::EchoServer;
pub use proxy::ReverseProxy;
pub use server::Server;
