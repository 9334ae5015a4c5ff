//! Startup orchestration.
//!
//! # Responsibilities
//! - Validate configuration (required files on disk)
//! - Load TLS material and bind the listener
//! - Run until interrupted and report the exit status
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal and nothing is served
//! - The listener starts last, after every check passed

use std::process::ExitCode;

use thiserror::Error;
use tokio::sync::broadcast;

use crate::config::{check_config, ConfigError, ServerConfig, ServiceKind};
use crate::http::HttpServer;
use crate::lifecycle::{signals, Shutdown};
use crate::net::{bind, load_tls_config, socket_addr, ListenerError, TlsError};

/// Operator hint printed whenever serving fails.
pub const SERVE_HINT: &str =
    "Could not start serving. Check root access. Check occupied ports with netstat -an.";

/// Error type for bringing a service up.
#[derive(Debug, Error)]
pub enum ServeError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Listener(#[from] ListenerError),
    #[error(transparent)]
    Tls(#[from] TlsError),
    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

/// Bind the configured listener and serve until `shutdown` fires.
pub async fn serve(
    service: ServiceKind,
    config: ServerConfig,
    shutdown: broadcast::Receiver<()>,
) -> Result<(), ServeError> {
    let addr = socket_addr(&config)?;
    let tls = config.listener.tls.clone();
    let server = HttpServer::new(service, config);

    match tls {
        Some(tls) => {
            let rustls = load_tls_config(&tls)?;
            server.run_tls(addr, rustls, shutdown).await?;
        }
        None => {
            let listener = bind(addr).await?;
            server.run(listener, shutdown).await?;
        }
    }
    Ok(())
}

/// Validate, serve until Ctrl+C, and map the outcome to an exit code.
pub async fn run(service: ServiceKind, config: ServerConfig) -> ExitCode {
    if let Err(e) = check_config(&config, service) {
        match e {
            ConfigError::Validation(errors) => {
                for error in errors {
                    tracing::error!("{error}");
                }
            }
            other => tracing::error!("{other}"),
        }
        return ExitCode::FAILURE;
    }

    let scheme = if config.listener.tls.is_some() { "https" } else { "http" };
    tracing::info!(
        service = service.name(),
        scheme,
        port = config.effective_port(),
        forced_ack = config.ack.forced,
        "Starting"
    );

    let shutdown = Shutdown::new();
    let stop = shutdown.subscribe();
    tokio::spawn(signals::forward_interrupt(shutdown));

    match serve(service, config, stop).await {
        Ok(()) => {
            tracing::info!(service = service.name(), "Shutdown complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "{SERVE_HINT}");
            ExitCode::FAILURE
        }
    }
}
