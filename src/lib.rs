//! HTTP/HTTPS command relay and acknowledgment simulator.
//!
//! Two services share this library:
//! - the relay answers `GET` API calls with the JSON printed by a shell command
//! - the receiver answers event `POST`s with `ACK`/`NACK`, sometimes late,
//!   to exercise a client's retry and timeout handling

// Core subsystems
pub mod ack;
pub mod executor;
pub mod http;
pub mod net;
pub mod routing;

// Cross-cutting concerns
pub mod cli;
pub mod config;
pub mod lifecycle;
pub mod observability;

pub use config::{ServerConfig, ServiceKind};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
