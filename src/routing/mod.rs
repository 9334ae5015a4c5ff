//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request (method, path)
//!     → router.rs (route lookup)
//!     → matcher.rs (exact, suffix or any-of path rules)
//!     → Return: matched Route (with its Handler) or no match
//!
//! Route Compilation (at startup):
//!     ServiceKind + ServerConfig
//!     → fixed route list for the service
//!     → Freeze as immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - Deterministic: same input always matches same route
//! - Unmatched requests are handled by an explicit fallback, never a default route

pub mod matcher;
pub mod router;

pub use router::{Handler, Route, RouteTable};
