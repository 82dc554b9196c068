use super::{CommandOutput, CommandSpec, Commander};
use crate::error::{HostspecError, Result};
use std::collections::HashMap;
use std::sync::Mutex;

enum Reply {
    Output(CommandOutput),
    SpawnError(String),
}

/// Replays canned output keyed by the rendered command line
///
/// Every invocation is recorded, including ones with no scripted reply
/// (those fail as if the binary were missing).
#[derive(Default)]
pub struct ScriptedCommander {
    replies: HashMap<String, Reply>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedCommander {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reply to `command` with `text` and exit code 0
    pub fn reply(self, command: impl Into<String>, text: impl Into<String>) -> Self {
        self.reply_with_code(command, 0, text)
    }

    pub fn reply_with_code(
        mut self,
        command: impl Into<String>,
        code: i32,
        text: impl Into<String>,
    ) -> Self {
        self.replies.insert(
            command.into(),
            Reply::Output(CommandOutput {
                code: Some(code),
                text: text.into(),
            }),
        );
        self
    }

    /// Make `command` fail before producing any output
    pub fn fail(mut self, command: impl Into<String>, reason: impl Into<String>) -> Self {
        self.replies
            .insert(command.into(), Reply::SpawnError(reason.into()));
        self
    }

    /// Rendered command lines in invocation order
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

impl Commander for ScriptedCommander {
    fn run_combined(&self, spec: &CommandSpec) -> Result<CommandOutput> {
        let line = spec.to_string();
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(line.clone());
        }

        match self.replies.get(&line) {
            Some(Reply::Output(output)) => Ok(output.clone()),
            Some(Reply::SpawnError(reason)) => Err(HostspecError::ExecutionFailed {
                command: line,
                reason: reason.clone(),
                output: String::new(),
            }),
            None => Err(HostspecError::ExecutionFailed {
                command: line,
                reason: "No such file or directory (os error 2)".to_string(),
                output: String::new(),
            }),
        }
    }
}
