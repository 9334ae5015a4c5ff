//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming TCP connection
//!     → listener.rs (plain bind) or tls.rs (rustls handshake)
//!     → one task per connection
//!     → Hand off to HTTP layer
//! ```
//!
//! # Design Decisions
//! - TLS mode always binds the fixed TLS port
//! - TLS material is loaded once at startup; failures are fatal
//! - A slow connection never holds the accept loop

pub mod listener;
pub mod tls;

pub use listener::{bind, socket_addr, ListenerError};
pub use tls::{load_tls_config, TlsError};
