//! Command-line flags for both services.
//!
//! Flags override values from the optional TOML file, which override defaults.

use std::path::PathBuf;

use clap::{Args, Parser};

use crate::config::{load_config, ConfigError, ServerConfig};

/// Flags shared by every service.
#[derive(Debug, Clone, Args)]
pub struct ListenArgs {
    /// Log request paths and payloads
    #[arg(short, long)]
    pub verbose: bool,

    /// Port for plain HTTP. Only used with --no-ssl; TLS always binds 443 [default: 8080]
    #[arg(short = 'p', long = "httpport")]
    pub httpport: Option<u16>,

    /// IP of the local interface to bind to [default: 0.0.0.0]
    #[arg(short, long)]
    pub interface: Option<String>,

    /// TOML file with further settings
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl ListenArgs {
    fn base_config(&self) -> Result<ServerConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => ServerConfig::default(),
        };
        config.verbose |= self.verbose;
        if let Some(port) = self.httpport {
            config.listener.port = port;
        }
        if let Some(interface) = &self.interface {
            config.listener.interface = interface.clone();
        }
        Ok(config)
    }
}

/// Command line relay in HTTP.
#[derive(Debug, Parser)]
#[command(name = "cmd-relay", version, about = "command line relay in http")]
pub struct RelayArgs {
    #[command(flatten)]
    pub listen: ListenArgs,

    /// Serve plain HTTP instead of HTTPS
    #[arg(short = 'n', long)]
    pub no_ssl: bool,
}

impl RelayArgs {
    pub fn into_config(self) -> Result<ServerConfig, ConfigError> {
        let mut config = self.listen.base_config()?;
        if self.no_ssl {
            config.listener.tls = None;
        }
        Ok(config)
    }
}

/// JSON receiver with simulated acknowledgments.
#[derive(Debug, Parser)]
#[command(name = "json-receiver", version, about = "json receiver")]
pub struct ReceiverArgs {
    #[command(flatten)]
    pub listen: ListenArgs,

    /// Serve plain HTTP instead of HTTPS
    #[arg(short = 's', long)]
    pub no_ssl: bool,

    /// Always reply ACK, with no random wait
    #[arg(short, long)]
    pub ack: bool,
}

impl ReceiverArgs {
    pub fn into_config(self) -> Result<ServerConfig, ConfigError> {
        let mut config = self.listen.base_config()?;
        if self.no_ssl {
            config.listener.tls = None;
        }
        config.ack.forced |= self.ack;
        Ok(config)
    }
}
