//! TCP listener binding.
//!
//! # Responsibilities
//! - Resolve the configured interface and port into a socket address
//! - Bind the plain HTTP listener
//! - Report bind failures with the address that failed

use std::net::{IpAddr, SocketAddr};

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::ServerConfig;

/// Error type for listener operations.
#[derive(Debug, Error)]
pub enum ListenerError {
    /// Interface is not an IP address.
    #[error("Invalid interface {interface}: {source}")]
    Address {
        interface: String,
        #[source]
        source: std::net::AddrParseError,
    },
    /// Failed to bind to address.
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
}

/// Socket address the service listens on.
pub fn socket_addr(config: &ServerConfig) -> Result<SocketAddr, ListenerError> {
    let ip: IpAddr = config
        .listener
        .interface
        .parse()
        .map_err(|source| ListenerError::Address {
            interface: config.listener.interface.clone(),
            source,
        })?;
    Ok(SocketAddr::new(ip, config.effective_port()))
}

/// Bind a plain TCP listener.
pub async fn bind(addr: SocketAddr) -> Result<TcpListener, ListenerError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ListenerError::Bind { addr, source })?;

    if let Ok(local_addr) = listener.local_addr() {
        tracing::info!(address = %local_addr, "Listener bound");
    }
    Ok(listener)
}
