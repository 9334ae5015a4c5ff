//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for both services.
//! All types derive Serde traits so a TOML file can override any default.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Which member of the service family is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceKind {
    /// Relays GET API requests to JSON-emitting commands.
    Relay,
    /// Accepts POSTed events and simulates acknowledgments.
    Receiver,
}

impl ServiceKind {
    /// Name used in log lines.
    pub fn name(&self) -> &'static str {
        match self {
            ServiceKind::Relay => "command relay",
            ServiceKind::Receiver => "json receiver",
        }
    }
}

/// Root configuration shared by the relay and receiver services.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    /// Listener configuration (interface, ports, TLS).
    pub listener: ListenerConfig,

    /// Command lines the relay service runs for its API routes.
    pub relay: RelayConfig,

    /// Acknowledgment simulator settings.
    pub ack: AckConfig,

    /// Static page served for `.html` requests.
    pub page: PageConfig,

    /// Request limits.
    pub limits: LimitsConfig,

    /// Emit request paths and payloads to the log.
    pub verbose: bool,
}

impl ServerConfig {
    /// Port the listener binds: the fixed TLS port when TLS is on, the plain port otherwise.
    pub fn effective_port(&self) -> u16 {
        if self.listener.tls.is_some() {
            self.listener.tls_port
        } else {
            self.listener.port
        }
    }

    /// `interface:port` string used for binding and log lines.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.listener.interface, self.effective_port())
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ListenerConfig {
    /// IP of the local interface to bind (e.g., "0.0.0.0").
    pub interface: String,

    /// Port for plain HTTP.
    pub port: u16,

    /// Port used whenever TLS is enabled.
    pub tls_port: u16,

    /// TLS material. `None` means plain HTTP.
    pub tls: Option<TlsConfig>,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            interface: "0.0.0.0".to_string(),
            port: 8080,
            tls_port: 443,
            tls: Some(TlsConfig::default()),
        }
    }
}

/// TLS configuration for the listener.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct TlsConfig {
    /// Path to certificate chain file (PEM).
    pub cert_path: PathBuf,

    /// Path to private key file (PEM).
    pub key_path: PathBuf,

    /// Lowest protocol version accepted during the handshake.
    pub min_version: TlsVersion,
}

impl Default for TlsConfig {
    fn default() -> Self {
        Self {
            cert_path: PathBuf::from("./cert.pem"),
            key_path: PathBuf::from("./key.pem"),
            min_version: TlsVersion::Tls12,
        }
    }
}

/// Supported minimum TLS protocol versions.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
pub enum TlsVersion {
    #[default]
    #[serde(rename = "1.2")]
    Tls12,
    #[serde(rename = "1.3")]
    Tls13,
}

/// Relay command lines.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct RelayConfig {
    /// Command behind `GET /api/v1/getAllStatus`.
    pub status_command: String,

    /// Command behind `GET /api/v1/healthcheck`.
    pub health_command: String,

    /// Kill the command and answer `{}` after this many seconds. No limit when unset.
    pub command_timeout_secs: Option<u64>,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            status_command: "./getAllStatus.sh".to_string(),
            health_command: "./getHealthCheck.sh".to_string(),
            command_timeout_secs: None,
        }
    }
}

/// Acknowledgment simulator configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct AckConfig {
    /// Always reply ACK with no random wait.
    pub forced: bool,

    /// How long a delayed acknowledgment holds the body, in milliseconds.
    pub delay_ms: u64,
}

impl Default for AckConfig {
    fn default() -> Self {
        Self {
            forced: false,
            delay_ms: 16_000,
        }
    }
}

/// Static page configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct PageConfig {
    /// File whose contents answer every matching `.html` request.
    pub file: PathBuf,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("sample.html"),
        }
    }
}

/// Request limits.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum request body read for diagnostic logging, in bytes.
    pub max_body_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: 2 * 1024 * 1024, // 2MB
        }
    }
}
