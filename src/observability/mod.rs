//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce tracing events
//!     → logging.rs (EnvFilter + fmt layer on stderr)
//! HTTP requests additionally pass through tower-http's TraceLayer,
//! tagged with the x-request-id header.
//! ```

pub mod logging;

pub use logging::init_logging;
