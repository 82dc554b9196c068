//! Status signature table
//!
//! Maps `(state, init system)` to the substring that identifies that state in
//! the init system's status output. Classification is plain substring
//! containment: status output carries colours, PIDs and timestamps around
//! the part that matters.

use crate::core::types::{InitKind, ServiceStatus};
use std::collections::HashMap;

/// States that can be recognised from output; everything else is Unknown
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum SignatureState {
    Running,
    Stopped,
}

impl SignatureState {
    pub const ALL: [SignatureState; 2] = [Self::Running, Self::Stopped];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Stopped => "stopped",
        }
    }
}

impl From<SignatureState> for ServiceStatus {
    fn from(state: SignatureState) -> Self {
        match state {
            SignatureState::Running => ServiceStatus::Running,
            SignatureState::Stopped => ServiceStatus::Stopped,
        }
    }
}

const BUILTIN: &[(SignatureState, InitKind, &str)] = &[
    (SignatureState::Running, InitKind::Systemd, "active (running)"),
    (SignatureState::Running, InitKind::Upstart, "start/running"),
    (SignatureState::Running, InitKind::Sysv, "is running"),
    (SignatureState::Stopped, InitKind::Systemd, "inactive (dead)"),
    (SignatureState::Stopped, InitKind::Upstart, "stop/waiting"),
    (SignatureState::Stopped, InitKind::Sysv, "is not running"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureTable {
    entries: HashMap<(SignatureState, InitKind), String>,
}

impl SignatureTable {
    pub fn builtin() -> Self {
        let mut table = Self::empty();
        for (state, kind, signature) in BUILTIN {
            table.set(*state, *kind, *signature);
        }
        table
    }

    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Add or replace the signature for one state of one init system
    pub fn set(&mut self, state: SignatureState, kind: InitKind, signature: impl Into<String>) {
        self.entries.insert((state, kind), signature.into());
    }

    pub fn get(&self, state: SignatureState, kind: InitKind) -> Option<&str> {
        self.entries.get(&(state, kind)).map(String::as_str)
    }

    pub fn entries(&self) -> impl Iterator<Item = (SignatureState, InitKind, &str)> {
        self.entries
            .iter()
            .map(|((state, kind), signature)| (*state, *kind, signature.as_str()))
    }

    /// Running wins over Stopped; no match is Unknown
    pub fn classify(&self, kind: InitKind, output: &str) -> ServiceStatus {
        SignatureState::ALL
            .into_iter()
            .find(|state| {
                self.get(*state, kind)
                    .is_some_and(|signature| !signature.is_empty() && output.contains(signature))
            })
            .map(ServiceStatus::from)
            .unwrap_or(ServiceStatus::Unknown)
    }
}

impl Default for SignatureTable {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_covers_every_init_system() {
        let table = SignatureTable::builtin();
        for kind in InitKind::ALL {
            for state in SignatureState::ALL {
                assert!(table.get(state, kind).is_some(), "{:?} {:?}", state, kind);
            }
        }
    }

    #[test]
    fn test_classify_systemd() {
        let table = SignatureTable::builtin();
        let running = "● nginx.service - A high performance web server\n   \
                       Active: active (running) since Mon 2020-06-01 10:00:00 UTC; 2h ago\n";
        let stopped = "   Active: inactive (dead) since Mon 2020-06-01 12:00:00 UTC\n";

        assert_eq!(table.classify(InitKind::Systemd, running), ServiceStatus::Running);
        assert_eq!(table.classify(InitKind::Systemd, stopped), ServiceStatus::Stopped);
        assert_eq!(
            table.classify(InitKind::Systemd, "Unit foo.service could not be found."),
            ServiceStatus::Unknown
        );
    }

    #[test]
    fn test_sysv_negative_does_not_look_running() {
        let table = SignatureTable::builtin();

        assert_eq!(
            table.classify(InitKind::Sysv, " * nginx is not running"),
            ServiceStatus::Stopped
        );
        assert_eq!(
            table.classify(InitKind::Sysv, " * nginx is running"),
            ServiceStatus::Running
        );
    }

    #[test]
    fn test_signatures_are_per_init_system() {
        let table = SignatureTable::builtin();
        assert_eq!(
            table.classify(InitKind::Upstart, "Active: active (running)"),
            ServiceStatus::Unknown
        );
    }

    #[test]
    fn test_overrides_and_empty_table() {
        let mut table = SignatureTable::empty();
        assert_eq!(table.classify(InitKind::Systemd, "anything"), ServiceStatus::Unknown);

        table.set(SignatureState::Running, InitKind::Systemd, "UP");
        assert_eq!(table.classify(InitKind::Systemd, "state: UP"), ServiceStatus::Running);
        assert_eq!(table.entries().count(), 1);
    }
}
