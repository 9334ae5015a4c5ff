//! Shell-backed command runner.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use serde_json::{Map, Value};
use tokio::process::Command;

use crate::executor::{CommandResult, CommandRunner, ExecError};

/// Longest slice of failed command output copied into a diagnostic.
const MAX_DIAGNOSTIC_OUTPUT: usize = 512;

/// Runs command lines through `/bin/sh -c` with stderr merged into stdout.
#[derive(Debug, Clone)]
pub struct ShellExecutor {
    shell: PathBuf,
    timeout: Option<Duration>,
}

impl Default for ShellExecutor {
    fn default() -> Self {
        Self {
            shell: PathBuf::from("/bin/sh"),
            timeout: None,
        }
    }
}

impl ShellExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Kill commands that run longer than `timeout`.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Use a different shell binary.
    pub fn with_shell(mut self, shell: impl Into<PathBuf>) -> Self {
        self.shell = shell.into();
        self
    }

    /// Run the command and parse its output, keeping the failure cause.
    pub async fn try_execute(&self, command_line: &str) -> Result<Map<String, Value>, ExecError> {
        let mut command = Command::new(&self.shell);
        // `exec 2>&1` applies to every statement in the line, not just the last one.
        command
            .arg("-c")
            .arg(format!("exec 2>&1\n{command_line}"))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        tracing::debug!(command = %command_line, "Running relay command");

        let output = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, command.output())
                .await
                .map_err(|_| ExecError::Timeout(limit.as_millis()))?,
            None => command.output().await,
        }
        .map_err(ExecError::Spawn)?;

        if !output.status.success() {
            let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
            if text.len() > MAX_DIAGNOSTIC_OUTPUT {
                let mut cut = MAX_DIAGNOSTIC_OUTPUT;
                while !text.is_char_boundary(cut) {
                    cut -= 1;
                }
                text.truncate(cut);
            }
            return Err(ExecError::Exit {
                code: output.status.code(),
                output: text.trim_end().to_string(),
            });
        }

        match serde_json::from_slice::<Value>(&output.stdout).map_err(ExecError::Parse)? {
            Value::Object(map) => Ok(map),
            other => Err(ExecError::NotAnObject(json_kind(&other))),
        }
    }
}

impl CommandRunner for ShellExecutor {
    fn execute<'a>(&'a self, command_line: &'a str) -> BoxFuture<'a, CommandResult> {
        async move {
            match self.try_execute(command_line).await {
                Ok(map) => CommandResult::from(map),
                Err(e) => {
                    tracing::warn!(command = %command_line, error = %e, "Command produced no data");
                    CommandResult::empty()
                }
            }
        }
        .boxed()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
