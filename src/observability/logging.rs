//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber once per process
//! - Pick the log level from the verbosity flag unless `RUST_LOG` is set
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - Diagnostics go to stderr, the operator channel
//! - Payload echoes are `debug` events, visible only when verbose

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is not set.
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "cmd_relay=debug,tower_http=debug"
    } else {
        "cmd_relay=info"
    }
}

/// Install the global subscriber. Later calls are ignored.
pub fn init_logging(verbose: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(verbose).into());

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
