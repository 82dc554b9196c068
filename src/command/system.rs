use super::{CommandOutput, CommandSpec, Commander};
use crate::error::{HostspecError, Result};
use std::io::{BufRead, BufReader, Read};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Default timeout for backend commands (5 minutes)
pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(300);

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Runs commands on the local host
#[derive(Debug, Clone)]
pub struct SystemCommander {
    timeout: Option<Duration>,
}

impl SystemCommander {
    /// `None` waits forever; a hung tool then hangs the caller
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    fn spawn(&self, spec: &CommandSpec) -> Result<Child> {
        debug!(command = %spec, "spawning");

        Command::new(spec.program())
            .args(spec.arguments())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| failed(spec, e.to_string()))
    }

    fn timed_out(&self, start: Instant) -> bool {
        self.timeout.is_some_and(|limit| start.elapsed() > limit)
    }

    /// Wait for the child until the deadline measured from `start`
    ///
    /// `Ok(None)` means the deadline passed and the child has been killed.
    fn wait_until_deadline(&self, child: &mut Child, start: Instant) -> std::io::Result<Option<ExitStatus>> {
        loop {
            if let Some(status) = child.try_wait()? {
                return Ok(Some(status));
            }
            if self.timed_out(start) {
                let _ = child.kill();
                let _ = child.wait();
                return Ok(None);
            }
            thread::sleep(POLL_INTERVAL);
        }
    }

    fn timeout_error(&self, spec: &CommandSpec) -> HostspecError {
        let secs = self.timeout.map(|t| t.as_secs()).unwrap_or_default();
        warn!(command = %spec, secs, "command timed out");
        failed(spec, format!("Command timed out after {} seconds", secs))
    }
}

impl Default for SystemCommander {
    fn default() -> Self {
        Self::new(Some(DEFAULT_COMMAND_TIMEOUT))
    }
}

impl Commander for SystemCommander {
    fn run_combined(&self, spec: &CommandSpec) -> Result<CommandOutput> {
        let mut child = self.spawn(spec)?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| failed(spec, "Failed to capture stdout".to_string()))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| failed(spec, "Failed to capture stderr".to_string()))?;

        let stdout_thread = thread::spawn(move || read_all(stdout));
        let stderr_thread = thread::spawn(move || read_all(stderr));

        let start = Instant::now();
        let status = match self.wait_until_deadline(&mut child, start) {
            Ok(Some(status)) => status,
            Ok(None) => {
                let _ = stdout_thread.join();
                let _ = stderr_thread.join();
                return Err(self.timeout_error(spec));
            }
            Err(e) => return Err(failed(spec, e.to_string())),
        };

        let mut text = stdout_thread.join().unwrap_or_default();
        text.push_str(&stderr_thread.join().unwrap_or_default());

        debug!(command = %spec, code = ?status.code(), bytes = text.len(), "finished");

        Ok(CommandOutput {
            code: status.code(),
            text,
        })
    }

    fn for_each_line(
        &self,
        spec: &CommandSpec,
        sink: &mut dyn FnMut(&str) -> Result<()>,
    ) -> Result<()> {
        let mut child = self.spawn(spec)?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| failed(spec, "Failed to capture stdout".to_string()))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| failed(spec, "Failed to capture stderr".to_string()))?;

        // Lines cross a channel so the timeout can still fire while the
        // tool is silent
        let (tx, rx) = mpsc::channel::<std::io::Result<String>>();
        let stdout_thread = thread::spawn(move || {
            for line in BufReader::new(stdout).lines() {
                if tx.send(line).is_err() {
                    break;
                }
            }
        });
        let stderr_thread = thread::spawn(move || read_all(stderr));

        let start = Instant::now();
        let mut outcome = Ok(());
        loop {
            let wait = match self.timeout {
                Some(limit) => match limit.checked_sub(start.elapsed()) {
                    Some(left) => left,
                    None => {
                        outcome = Err(self.timeout_error(spec));
                        break;
                    }
                },
                None => Duration::MAX,
            };

            match rx.recv_timeout(wait) {
                Ok(Ok(line)) => {
                    if let Err(e) = sink(&line) {
                        outcome = Err(e);
                        break;
                    }
                }
                Ok(Err(e)) => {
                    outcome = Err(failed(spec, e.to_string()));
                    break;
                }
                Err(RecvTimeoutError::Timeout) => {
                    outcome = Err(self.timeout_error(spec));
                    break;
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }

        if let Err(e) = outcome {
            let _ = child.kill();
            let _ = child.wait();
            drop(rx);
            let _ = stdout_thread.join();
            let _ = stderr_thread.join();
            return Err(e);
        }

        // Stdout can close while the tool keeps running
        let status = match self.wait_until_deadline(&mut child, start) {
            Ok(Some(status)) => status,
            Ok(None) => {
                let _ = stdout_thread.join();
                let _ = stderr_thread.join();
                return Err(self.timeout_error(spec));
            }
            Err(e) => return Err(failed(spec, e.to_string())),
        };
        let _ = stdout_thread.join();
        let stderr_text = stderr_thread.join().unwrap_or_default();

        debug!(command = %spec, code = ?status.code(), "stream finished");

        CommandOutput {
            code: status.code(),
            text: stderr_text,
        }
        .into_success(spec)
        .map(|_| ())
    }
}

fn read_all(source: impl Read) -> String {
    let mut buf = Vec::new();
    let _ = BufReader::new(source).read_to_end(&mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}

fn failed(spec: &CommandSpec, reason: String) -> HostspecError {
    HostspecError::ExecutionFailed {
        command: spec.to_string(),
        reason,
        output: String::new(),
    }
}
