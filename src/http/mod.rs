//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP/TLS connection (one task per connection)
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID, body draining)
//!     → handlers.rs (route lookup, page / command / ack behavior)
//!     → response.rs (content types, 404 mapping)
//!     → Send to client
//! ```

pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use response::DispatchError;
pub use server::{AppState, HttpServer};
