//! TLS configuration and certificate loading.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum_server::tls_rustls::RustlsConfig;
use rustls::pki_types::{CertificateDer, PrivateKeyDer};
use rustls::{ServerConfig, SupportedProtocolVersion};
use thiserror::Error;

use crate::config::{TlsConfig, TlsVersion};

static TLS13_ONLY: &[&SupportedProtocolVersion] = &[&rustls::version::TLS13];

/// Error type for TLS material loading.
#[derive(Debug, Error)]
pub enum TlsError {
    #[error("TLS file not found: {0}")]
    MissingFile(PathBuf),
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("No certificates found in {0}")]
    NoCertificates(PathBuf),
    #[error("No private key found in {0}")]
    NoPrivateKey(PathBuf),
    #[error("Invalid TLS configuration: {0}")]
    Rustls(#[from] rustls::Error),
}

/// Protocol versions accepted for a configured minimum.
pub fn protocol_versions(min: TlsVersion) -> &'static [&'static SupportedProtocolVersion] {
    match min {
        TlsVersion::Tls12 => rustls::ALL_VERSIONS,
        TlsVersion::Tls13 => TLS13_ONLY,
    }
}

/// Build the rustls server config from PEM certificate chain and key files.
pub fn build_server_config(tls: &TlsConfig) -> Result<ServerConfig, TlsError> {
    let certs = load_certs(&tls.cert_path)?;
    let key = load_private_key(&tls.key_path)?;

    let provider = Arc::new(rustls::crypto::aws_lc_rs::default_provider());
    let mut config = ServerConfig::builder_with_provider(provider)
        .with_protocol_versions(protocol_versions(tls.min_version))?
        .with_no_client_auth()
        .with_single_cert(certs, key)?;
    // HTTP/1.1 only; every response carries `Connection: close`.
    config.alpn_protocols = vec![b"http/1.1".to_vec()];

    tracing::debug!(
        cert = %tls.cert_path.display(),
        min_version = ?tls.min_version,
        "TLS configuration built"
    );
    Ok(config)
}

/// Load TLS configuration for the HTTPS listener.
pub fn load_tls_config(tls: &TlsConfig) -> Result<RustlsConfig, TlsError> {
    Ok(RustlsConfig::from_config(Arc::new(build_server_config(tls)?)))
}

fn open(path: &Path) -> Result<BufReader<File>, TlsError> {
    if !path.exists() {
        return Err(TlsError::MissingFile(path.to_path_buf()));
    }
    File::open(path).map(BufReader::new).map_err(|source| TlsError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn load_certs(path: &Path) -> Result<Vec<CertificateDer<'static>>, TlsError> {
    let mut reader = open(path)?;
    let certs = rustls_pemfile::certs(&mut reader)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| TlsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    if certs.is_empty() {
        return Err(TlsError::NoCertificates(path.to_path_buf()));
    }
    Ok(certs)
}

fn load_private_key(path: &Path) -> Result<PrivateKeyDer<'static>, TlsError> {
    let mut reader = open(path)?;
    rustls_pemfile::private_key(&mut reader)
        .map_err(|source| TlsError::Read {
            path: path.to_path_buf(),
            source,
        })?
        .ok_or_else(|| TlsError::NoPrivateKey(path.to_path_buf()))
}
