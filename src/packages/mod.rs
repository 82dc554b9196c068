//! # Package Managers
//!
//! One driver per supported tool, behind the [`PackageManager`] facade.
//!
//! ## Architecture
//!
//! - [`traits::PackageDriver`] knows one tool: how to build its query and
//!   listing command lines and how to parse what it prints, line by line.
//! - [`PackageManager`] picks the driver from a [`ManagerKind`] at
//!   construction time, runs the commands through a [`Commander`] and turns
//!   driver complaints into [`HostspecError::ParseFailed`].
//!
//! | Kind  | Tool                        |
//! |-------|-----------------------------|
//! | `apt` | `dpkg-query -W`             |
//! | `yum` | `rpm -q` / `rpm -qa`        |
//! | `apk` | `apk list --installed`      |
//! | `pip` | `pip show` / `pip list`     |
//! | `gem` | `gem list --local`          |
//!
//! ## Usage
//!
//! ```rust,no_run
//! use hostspec::packages::PackageManager;
//!
//! let apt = PackageManager::new("apt")?;
//! for pkg in apt.query_pkg("curl")? {
//!     println!("{}", pkg);
//! }
//! # Ok::<(), hostspec::error::HostspecError>(())
//! ```

pub mod apk;
pub mod apt;
pub mod gem;
pub mod pip;
pub mod traits;
pub mod yum;

pub use traits::{OutputMode, PackageDriver};

use crate::command::{CommandSpec, Commander, SystemCommander};
use crate::config::Settings;
use crate::core::types::{ManagerKind, Package};
use crate::error::{HostspecError, Result};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Driver for a manager kind
pub fn driver_for(kind: ManagerKind) -> &'static dyn PackageDriver {
    match kind {
        ManagerKind::Apt => &apt::AptDriver,
        ManagerKind::Yum => &yum::YumDriver,
        ManagerKind::Apk => &apk::ApkDriver,
        ManagerKind::Pip => &pip::PipDriver,
        ManagerKind::Gem => &gem::GemDriver,
    }
}

impl ManagerKind {
    /// First system package manager whose binary is on PATH
    ///
    /// Language managers (pip, gem) live alongside a system manager and
    /// are never picked here.
    pub fn detect() -> Option<ManagerKind> {
        [ManagerKind::Apt, ManagerKind::Yum, ManagerKind::Apk]
            .into_iter()
            .find(|kind| which::which(driver_for(*kind).binary()).is_ok())
    }
}

/// Uniform query/list front for every supported package manager
///
/// Holds nothing beyond its kind and the commander used to run the tool;
/// every call spawns a fresh process.
#[derive(Clone)]
pub struct PackageManager {
    kind: ManagerKind,
    driver: &'static dyn PackageDriver,
    commander: Arc<dyn Commander>,
}

impl PackageManager {
    /// Manager for a type tag such as `"apt"`, using default settings
    pub fn new(type_name: &str) -> Result<Self> {
        Self::with_settings(type_name, &Settings::default())
    }

    pub fn with_settings(type_name: &str, settings: &Settings) -> Result<Self> {
        let kind: ManagerKind = type_name.parse()?;
        Ok(Self::from_kind(kind)
            .with_commander(Arc::new(SystemCommander::new(settings.command_timeout))))
    }

    pub fn from_kind(kind: ManagerKind) -> Self {
        Self {
            kind,
            driver: driver_for(kind),
            commander: Arc::new(SystemCommander::default()),
        }
    }

    /// Swap the process layer, e.g. for a [`crate::command::ScriptedCommander`]
    pub fn with_commander(mut self, commander: Arc<dyn Commander>) -> Self {
        self.commander = commander;
        self
    }

    pub fn kind(&self) -> ManagerKind {
        self.kind
    }

    /// The type tag this manager was built from
    pub fn type_name(&self) -> &'static str {
        self.kind.as_str()
    }

    pub fn is_available(&self) -> bool {
        which::which(self.driver.binary()).is_ok()
    }

    /// Installed entries for exactly one package name
    ///
    /// An empty result means the package is not installed; deciding whether
    /// that is a failure is up to the caller.
    pub fn query_pkg(&self, name: &str) -> Result<Vec<Package>> {
        let spec = self.driver.query_command(name);
        let output = self.commander.run_combined(&spec)?;

        let text = match self.driver.not_found_marker() {
            Some(marker) if !output.success() && output.text.contains(marker) => {
                debug!(manager = %self.kind, package = name, "not installed");
                return Ok(Vec::new());
            }
            _ => output.into_success(&spec)?,
        };

        let mut parser = LineParser::new(self.driver, OutputMode::Query, &spec);
        for line in text.lines() {
            parser.feed(line)?;
        }

        let found: Vec<Package> = parser
            .finish()?
            .into_iter()
            .filter(|pkg| self.driver.matches_name(&pkg.name, name))
            .collect();

        debug!(manager = %self.kind, package = name, entries = found.len(), "queried");
        Ok(found)
    }

    /// Every installed package, parsed while the tool is still printing
    pub fn list_pkgs(&self) -> Result<Vec<Package>> {
        let spec = self.driver.list_command();
        let mut parser = LineParser::new(self.driver, OutputMode::List, &spec);

        self.commander
            .for_each_line(&spec, &mut |line: &str| parser.feed(line))?;

        let found = parser.finish()?;
        debug!(manager = %self.kind, entries = found.len(), "listed");
        Ok(found)
    }
}

impl fmt::Debug for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PackageManager")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// Accumulates driver output and attaches command context to failures
struct LineParser<'a> {
    driver: &'a dyn PackageDriver,
    mode: OutputMode,
    spec: &'a CommandSpec,
    found: Vec<Package>,
}

impl<'a> LineParser<'a> {
    fn new(driver: &'a dyn PackageDriver, mode: OutputMode, spec: &'a CommandSpec) -> Self {
        Self {
            driver,
            mode,
            spec,
            found: Vec::new(),
        }
    }

    fn feed(&mut self, line: &str) -> Result<()> {
        self.driver
            .parse_line(self.mode, line, &mut self.found)
            .map_err(|message| parse_failed(self.spec, message, line))
    }

    fn finish(self) -> Result<Vec<Package>> {
        let spec = self.spec;
        self.driver
            .finish(self.mode, self.found)
            .map_err(|message| parse_failed(spec, message, ""))
    }
}

fn parse_failed(spec: &CommandSpec, message: String, line: &str) -> HostspecError {
    HostspecError::ParseFailed {
        command: spec.to_string(),
        message,
        line: line.to_string(),
    }
}
