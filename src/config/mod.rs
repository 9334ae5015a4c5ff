//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! defaults (schema.rs)
//!     → optional TOML file (loader.rs)
//!     → CLI overrides (cli.rs)
//!     → validation.rs (required files exist, addresses parse)
//!     → ServerConfig (validated, immutable)
//!     → shared via Arc with every request handler
//! ```
//!
//! # Design Decisions
//! - Config is immutable once the listener starts; no locking around it
//! - All fields have defaults to allow minimal or absent config files
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{check_config, load_config, ConfigError};
pub use schema::{
    AckConfig, LimitsConfig, ListenerConfig, PageConfig, RelayConfig, ServerConfig, ServiceKind,
    TlsConfig, TlsVersion,
};
pub use validation::ValidationError;
