//! External command execution and JSON capture.
//!
//! # Data Flow
//! ```text
//! command line (from the matched route)
//!     → shell.rs (sh -c, stderr merged into stdout, optional timeout)
//!     → captured output parsed as one JSON document
//!     → CommandResult (object, or empty on any failure)
//! ```
//!
//! # Design Decisions
//! - Fail-soft: the HTTP layer always receives an object to serialize
//! - Failures go to the operator log, never to the HTTP client
//! - The runner is a trait so the dispatcher does not care how data is produced

pub mod shell;

use futures_util::future::BoxFuture;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

pub use shell::ShellExecutor;

/// Outcome of running a relay command: a JSON object, or empty when anything failed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CommandResult(Map<String, Value>);

impl CommandResult {
    /// The "no data" result.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Serialize as compact UTF-8 JSON. Non-ASCII characters are written as-is.
    pub fn to_json_bytes(&self) -> Vec<u8> {
        // Map<String, Value> serialization cannot fail.
        serde_json::to_vec(&self.0).unwrap_or_else(|_| b"{}".to_vec())
    }
}

impl From<Map<String, Value>> for CommandResult {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Why a command produced no data.
#[derive(Debug, Error)]
pub enum ExecError {
    /// The shell could not be started.
    #[error("failed to spawn command: {0}")]
    Spawn(#[source] std::io::Error),

    /// The command exited unsuccessfully or was killed by a signal.
    #[error("command exited with {}: {output}", exit_label(.code))]
    Exit { code: Option<i32>, output: String },

    /// The command did not finish within the configured timeout.
    #[error("command timed out after {0} ms")]
    Timeout(u128),

    /// Output was not valid JSON.
    #[error("malformed JSON output: {0}")]
    Parse(#[source] serde_json::Error),

    /// Output was valid JSON but not an object.
    #[error("JSON output is {0}, expected an object")]
    NotAnObject(&'static str),
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "a signal".to_string(),
    }
}

/// Adapter that turns a command line into JSON data.
pub trait CommandRunner: Send + Sync {
    /// Run `command_line` and return its JSON object, or an empty result on failure.
    fn execute<'a>(&'a self, command_line: &'a str) -> BoxFuture<'a, CommandResult>;
}
