//! Configuration validation.
//!
//! # Responsibilities
//! - Check that files the service needs at runtime exist before serving
//! - Validate value ranges that serde cannot express
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is a pure function of the config and the filesystem
//! - Runs before the listener is bound

use std::net::IpAddr;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::{ServerConfig, ServiceKind};

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Certificate or key file is absent.
    #[error(
        "Could not find {0}. TLS material can be generated with \
         openssl req -x509 -nodes -days 365 -newkey rsa:2048 -keyout key.pem -out cert.pem"
    )]
    MissingTlsFile(PathBuf),

    /// A relay command points at a program that is not on disk.
    #[error("Could not find {0}, required by the command `{1}`")]
    MissingProgram(PathBuf, String),

    /// A relay command line is blank.
    #[error("Empty command line for {0}")]
    EmptyCommand(&'static str),

    /// Interface is not an IP address.
    #[error("Invalid interface address: {0}")]
    InvalidInterface(String),
}

/// Validate the configuration for the given service.
pub fn validate_config(config: &ServerConfig, service: ServiceKind) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.interface.parse::<IpAddr>().is_err() {
        errors.push(ValidationError::InvalidInterface(config.listener.interface.clone()));
    }

    if let Some(tls) = &config.listener.tls {
        for path in [&tls.cert_path, &tls.key_path] {
            if !path.exists() {
                errors.push(ValidationError::MissingTlsFile(path.clone()));
            }
        }
    }

    if service == ServiceKind::Relay {
        let commands = [
            ("status route", &config.relay.status_command),
            ("health route", &config.relay.health_command),
        ];
        for (route, command_line) in commands {
            match program_path(command_line) {
                None => errors.push(ValidationError::EmptyCommand(route)),
                Some(program) if is_path_like(program) && !Path::new(program).exists() => {
                    errors.push(ValidationError::MissingProgram(
                        PathBuf::from(program),
                        command_line.clone(),
                    ));
                }
                Some(_) => {}
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// First word of a shell command line.
fn program_path(command_line: &str) -> Option<&str> {
    command_line.split_whitespace().next()
}

/// Bare names resolve through `PATH` and are left to the shell.
fn is_path_like(program: &str) -> bool {
    program.contains('/')
}
