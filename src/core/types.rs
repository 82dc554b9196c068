use crate::error::HostspecError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// One installed package as reported by a backend.
// Some backends report several versions side by side in one entry (gem),
// others report one entry per installed version (rpm).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    pub name: String,
    pub versions: Vec<String>,
}

impl Package {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            versions: Vec::new(),
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.push_version(version);
        self
    }

    /// Append a version, skipping duplicates and empty strings
    pub fn push_version(&mut self, version: impl Into<String>) {
        let version = version.into();
        if !version.is_empty() && !self.versions.contains(&version) {
            self.versions.push(version);
        }
    }
}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.versions.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} ({})", self.name, self.versions.join(", "))
        }
    }
}

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Running,
    Stopped,
    Unknown,
}

impl fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Running => write!(f, "running"),
            Self::Stopped => write!(f, "stopped"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

// Supported package managers.
// To add one, add a variant here and a driver under packages/, then wire it
// into packages::driver_for().
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ManagerKind {
    Apt,
    Yum,
    Apk,
    Pip,
    Gem,
}

impl ManagerKind {
    pub const ALL: [ManagerKind; 5] = [Self::Apt, Self::Yum, Self::Apk, Self::Pip, Self::Gem];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Apt => "apt",
            Self::Yum => "yum",
            Self::Apk => "apk",
            Self::Pip => "pip",
            Self::Gem => "gem",
        }
    }
}

impl fmt::Display for ManagerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ManagerKind {
    type Err = HostspecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| HostspecError::UnsupportedBackend {
                family: "package manager",
                name: s.to_string(),
            })
    }
}

// Supported init systems.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InitKind {
    Systemd,
    Upstart,
    Sysv,
}

impl InitKind {
    pub const ALL: [InitKind; 3] = [Self::Systemd, Self::Upstart, Self::Sysv];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Systemd => "systemd",
            Self::Upstart => "upstart",
            Self::Sysv => "sysv",
        }
    }
}

impl fmt::Display for InitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InitKind {
    type Err = HostspecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| HostspecError::UnsupportedBackend {
                family: "init system",
                name: s.to_string(),
            })
    }
}
