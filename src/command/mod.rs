//! # Command Execution
//!
//! Drivers never touch the process layer. They describe a command as a
//! [`CommandSpec`] and hand it to a [`Commander`], which returns the captured
//! output together with the exit code.
//!
//! - [`SystemCommander`] spawns real processes with an optional timeout.
//! - [`ScriptedCommander`] replays canned output keyed by the rendered
//!   command line, for tests and dry runs.

mod scripted;
mod system;

pub use scripted::ScriptedCommander;
pub use system::{DEFAULT_COMMAND_TIMEOUT, SystemCommander};

use crate::error::{HostspecError, Result};
use std::fmt;

/// Program plus arguments, built by a driver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    program: String,
    args: Vec<String>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.append_args(args);
        self
    }

    pub fn append_args<I, S>(&mut self, args: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn arguments(&self) -> &[String] {
        &self.args
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let words = std::iter::once(self.program.as_str()).chain(self.args.iter().map(String::as_str));
        match shlex::try_join(words) {
            Ok(line) => f.write_str(&line),
            // Only reachable with NUL bytes in an argument
            Err(_) => write!(f, "{} {}", self.program, self.args.join(" ")),
        }
    }
}

/// Captured output of a finished command
///
/// `text` holds stdout followed by stderr. A non-zero `code` is not an error
/// by itself: some tools report a negative answer through the exit code and
/// still print something worth parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub code: Option<i32>,
    pub text: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Text of a successful run, or `ExecutionFailed` carrying the output
    pub fn into_success(self, spec: &CommandSpec) -> Result<String> {
        if self.success() {
            return Ok(self.text);
        }

        let reason = match self.code {
            Some(code) => format!("exited with status {}", code),
            None => "terminated by signal".to_string(),
        };

        Err(HostspecError::ExecutionFailed {
            command: spec.to_string(),
            reason,
            output: self.text,
        })
    }
}

/// The process-execution collaborator every driver depends on
pub trait Commander: Send + Sync {
    /// Run to completion and capture combined output.
    ///
    /// Errors only when the command could not run at all (missing binary,
    /// permission denied, timeout). Non-zero exits come back as output.
    fn run_combined(&self, spec: &CommandSpec) -> Result<CommandOutput>;

    /// Feed stdout to `sink` one line at a time.
    ///
    /// A non-zero exit is `ExecutionFailed`. The default implementation
    /// buffers through [`Commander::run_combined`].
    fn for_each_line(
        &self,
        spec: &CommandSpec,
        sink: &mut dyn FnMut(&str) -> Result<()>,
    ) -> Result<()> {
        let text = self.run_combined(spec)?.into_success(spec)?;
        for line in text.lines() {
            sink(line)?;
        }
        Ok(())
    }
}
