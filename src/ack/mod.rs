//! Acknowledgment simulation subsystem.
//!
//! # Data Flow
//! ```text
//! POST to the event route
//!     → outcome.rs (decide: forced flag + random token → AckOutcome)
//!     → simulator.rs (sleep for DelayedAck, then render "ACK"/"NACK")
//!     → response body
//! ```
//!
//! # Design Decisions
//! - The decision is one pure function; the token source is injected
//! - The delay is a separate async step on the tokio clock, so tests can pause time
//! - No state is shared between requests

pub mod outcome;
pub mod simulator;

pub use outcome::{decide, AckOutcome, TOKEN_RANGE};
pub use simulator::{AckSimulator, FixedTokens, RandomTokens, TokenSource};
