//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Config → Validate → Load TLS / bind → Serve
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Stop accepting → In-flight requests finish → Exit
//!
//! Signals (signals.rs):
//!     SIGINT → Trigger shutdown
//! ```

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
pub use startup::{run, serve, ServeError, SERVE_HINT};
