//! # Service Init Systems
//!
//! [`SysInit`] starts, stops and inspects services through one of the
//! supported init systems. Status output is classified with a
//! [`SignatureTable`], which callers can extend through
//! [`crate::config::Settings`] without touching any parsing code.

pub mod signatures;
pub mod systemd;
pub mod sysv;
pub mod traits;
pub mod upstart;

pub use signatures::{SignatureState, SignatureTable};
pub use traits::{Action, InitDriver};

use crate::command::{Commander, SystemCommander};
use crate::config::Settings;
use crate::core::types::{InitKind, ServiceStatus};
use crate::error::{HostspecError, Result};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Status output kept in an ambiguity error
const OUTPUT_EXCERPT: usize = 512;

pub fn driver_for(kind: InitKind) -> &'static dyn InitDriver {
    match kind {
        InitKind::Systemd => &systemd::SystemdDriver,
        InitKind::Upstart => &upstart::UpstartDriver,
        InitKind::Sysv => &sysv::SysvDriver,
    }
}

impl InitKind {
    /// First init system whose control binary is on PATH
    pub fn detect() -> Option<InitKind> {
        InitKind::ALL
            .into_iter()
            .find(|kind| which::which(driver_for(*kind).binary()).is_ok())
    }
}

/// Uniform start/stop/status front for every supported init system
#[derive(Clone)]
pub struct SysInit {
    kind: InitKind,
    driver: &'static dyn InitDriver,
    commander: Arc<dyn Commander>,
    signatures: Arc<SignatureTable>,
}

impl SysInit {
    pub fn new(type_name: &str) -> Result<Self> {
        Self::with_settings(type_name, &Settings::default())
    }

    pub fn with_settings(type_name: &str, settings: &Settings) -> Result<Self> {
        let kind: InitKind = type_name.parse()?;
        Ok(Self::from_kind(kind)
            .with_commander(Arc::new(SystemCommander::new(settings.command_timeout)))
            .with_signatures(settings.signatures.clone()))
    }

    pub fn from_kind(kind: InitKind) -> Self {
        Self {
            kind,
            driver: driver_for(kind),
            commander: Arc::new(SystemCommander::default()),
            signatures: Arc::new(SignatureTable::builtin()),
        }
    }

    pub fn with_commander(mut self, commander: Arc<dyn Commander>) -> Self {
        self.commander = commander;
        self
    }

    pub fn with_signatures(mut self, signatures: SignatureTable) -> Self {
        self.signatures = Arc::new(signatures);
        self
    }

    pub fn kind(&self) -> InitKind {
        self.kind
    }

    pub fn type_name(&self) -> &'static str {
        self.kind.as_str()
    }

    pub fn is_available(&self) -> bool {
        which::which(self.driver.binary()).is_ok()
    }

    pub fn start(&self, name: &str) -> Result<()> {
        self.run(Action::Start, name)
    }

    pub fn stop(&self, name: &str) -> Result<()> {
        self.run(Action::Stop, name)
    }

    /// Classify the init system's status output for `name`
    ///
    /// Non-zero exits are expected here (`systemctl status` exits 3 for an
    /// inactive unit), so only a failure to run the tool at all is an
    /// execution error. Output matching no signature is
    /// [`HostspecError::AmbiguousStatus`].
    pub fn status(&self, name: &str) -> Result<ServiceStatus> {
        let spec = self.driver.command(Action::Status, name);
        let output = self.commander.run_combined(&spec)?;

        let status = self.signatures.classify(self.kind, &output.text);
        debug!(init = %self.kind, service = name, code = ?output.code, %status, "classified");

        if status == ServiceStatus::Unknown {
            return Err(HostspecError::AmbiguousStatus {
                service: name.to_string(),
                init: self.kind.to_string(),
                output: excerpt(&output.text),
            });
        }

        Ok(status)
    }

    fn run(&self, action: Action, name: &str) -> Result<()> {
        let spec = self.driver.command(action, name);
        self.commander.run_combined(&spec)?.into_success(&spec)?;
        debug!(init = %self.kind, service = name, action = action.as_str(), "done");
        Ok(())
    }
}

impl fmt::Debug for SysInit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SysInit")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// A named unit managed by one init system
#[derive(Debug, Clone)]
pub struct Service {
    pub name: String,
    pub sys_init: SysInit,
}

impl Service {
    pub fn new(name: impl Into<String>, sys_init: SysInit) -> Self {
        Self {
            name: name.into(),
            sys_init,
        }
    }

    pub fn status(&self) -> Result<ServiceStatus> {
        self.sys_init.status(&self.name)
    }

    pub fn start(&self) -> Result<()> {
        self.sys_init.start(&self.name)
    }

    pub fn stop(&self) -> Result<()> {
        self.sys_init.stop(&self.name)
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.sys_init.kind)
    }
}

fn excerpt(text: &str) -> String {
    let trimmed = text.trim();
    match trimmed.char_indices().nth(OUTPUT_EXCERPT) {
        Some((cut, _)) => format!("{}...", &trimmed[..cut]),
        None => trimmed.to_string(),
    }
}
