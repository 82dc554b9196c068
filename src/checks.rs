//! # Assertions
//!
//! Stateless checks that compare what the host reports against what the
//! caller expects. Expectations are evaluated in the order given and the
//! first failure is returned; nothing after it is checked.

use crate::core::matcher;
use crate::core::types::{Package, ServiceStatus};
use crate::error::{HostspecError, Result};
use crate::packages::PackageManager;
use crate::services::Service;
use std::collections::BTreeSet;
use std::fmt;
use tracing::debug;

/// A package that should be installed, optionally in one of several versions
#[derive(Debug, Clone)]
pub struct PackageSpec {
    pub name: String,
    pub manager: PackageManager,
    /// Empty means any version is accepted
    pub versions: BTreeSet<String>,
}

impl PackageSpec {
    pub fn new(name: impl Into<String>, manager: PackageManager) -> Self {
        Self {
            name: name.into(),
            manager,
            versions: BTreeSet::new(),
        }
    }

    pub fn with_versions<I, S>(mut self, versions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.versions.extend(versions.into_iter().map(Into::into));
        self
    }
}

impl fmt::Display for PackageSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Check that every package is installed
///
/// A package with a version set passes when any version found for it is in
/// the set. Found entries are pooled: one matching version anywhere is
/// enough, even if other installed instances match nothing.
pub fn is_installed(specs: &[PackageSpec]) -> Result<()> {
    for spec in specs {
        let found = spec.manager.query_pkg(&spec.name)?;

        if found.is_empty() {
            return Err(HostspecError::NotFound {
                package: spec.to_string(),
            });
        }

        if spec.versions.is_empty() {
            debug!(package = %spec, "installed, any version");
            continue;
        }

        match matcher::find_overlap(&spec.versions, &found) {
            Some(version) => debug!(package = %spec, version, "installed"),
            None => {
                return Err(HostspecError::VersionMismatch {
                    package: spec.to_string(),
                    requested: spec.versions.iter().cloned().collect(),
                    found: matcher::discovered_versions(&found),
                });
            }
        }
    }

    Ok(())
}

/// Every package installed through the given manager type
pub fn list_installed(manager_type: &str) -> Result<Vec<Package>> {
    PackageManager::new(manager_type)?.list_pkgs()
}

/// Check that every service reports `expected`
pub fn has_status(services: &[Service], expected: ServiceStatus) -> Result<()> {
    for service in services {
        let actual = service.status()?;
        if actual != expected {
            return Err(HostspecError::StatusMismatch {
                service: service.name.clone(),
                expected,
                actual,
            });
        }
        debug!(service = %service, status = %actual, "status matches");
    }

    Ok(())
}

pub fn is_running(services: &[Service]) -> Result<()> {
    has_status(services, ServiceStatus::Running)
}

pub fn is_stopped(services: &[Service]) -> Result<()> {
    has_status(services, ServiceStatus::Stopped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::ScriptedCommander;
    use crate::core::types::ManagerKind;
    use crate::packages::driver_for;
    use std::sync::Arc;

    fn gem_with(listing: &str) -> (PackageManager, Arc<ScriptedCommander>) {
        let line = driver_for(ManagerKind::Gem).query_command("rake").to_string();
        let commander = Arc::new(ScriptedCommander::new().reply(line, listing));
        let manager = PackageManager::from_kind(ManagerKind::Gem).with_commander(commander.clone());
        (manager, commander)
    }

    #[test]
    fn test_any_single_version_satisfies() {
        let (gem, _) = gem_with("rake (13.0.1, 12.3.3)\n");
        let spec = PackageSpec::new("rake", gem).with_versions(["12.3.3", "10.0.0"]);

        assert!(is_installed(&[spec]).is_ok());
    }

    #[test]
    fn test_full_set_is_not_required() {
        let (gem, _) = gem_with("rake (13.0.1)\n");
        let spec = PackageSpec::new("rake", gem).with_versions(["13.0.1", "14.0.0", "15.0.0"]);

        assert!(is_installed(&[spec]).is_ok());
    }

    #[test]
    fn test_mismatch_reports_both_sides() {
        let (gem, _) = gem_with("rake (13.0.1, 12.3.3)\n");
        let spec = PackageSpec::new("rake", gem).with_versions(["1.0.0"]);

        match is_installed(&[spec]).unwrap_err() {
            HostspecError::VersionMismatch {
                package,
                requested,
                found,
            } => {
                assert_eq!(package, "rake");
                assert_eq!(requested, vec!["1.0.0"]);
                assert_eq!(found, vec!["13.0.1", "12.3.3"]);
            }
            other => panic!("expected VersionMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_stops_at_first_failure() {
        let (gem, commander) = gem_with("");
        let specs = vec![
            PackageSpec::new("rake", gem.clone()),
            PackageSpec::new("bundler", gem),
        ];

        let err = is_installed(&specs).unwrap_err();

        assert_eq!(err.to_string(), "Unable to look up rake: no package found");
        assert_eq!(commander.calls().len(), 1);
    }

    #[test]
    fn test_empty_expectations_pass() {
        assert!(is_installed(&[]).is_ok());
        assert!(has_status(&[], ServiceStatus::Running).is_ok());
    }
}
