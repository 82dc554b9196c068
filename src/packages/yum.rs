//! RPM-based systems (yum/dnf) via the rpm database
//!
//! rpm prints one row per installed instance, so packages installed side by
//! side (kernels) come back as several entries with the same name.

use crate::command::CommandSpec;
use crate::core::types::{ManagerKind, Package};
use crate::packages::traits::{LineResult, OutputMode, PackageDriver};

const QUERY_FORMAT: &str = "%{NAME}\t%{VERSION}\t%{RELEASE}\n";

pub struct YumDriver;

impl PackageDriver for YumDriver {
    fn kind(&self) -> ManagerKind {
        ManagerKind::Yum
    }

    fn binary(&self) -> &'static str {
        "rpm"
    }

    fn query_command(&self, name: &str) -> CommandSpec {
        CommandSpec::new("rpm").args(["-q", "--qf", QUERY_FORMAT, name])
    }

    fn list_command(&self) -> CommandSpec {
        CommandSpec::new("rpm").args(["-qa", "--qf", QUERY_FORMAT])
    }

    fn not_found_marker(&self) -> Option<&'static str> {
        Some("is not installed")
    }

    fn parse_line(&self, _mode: OutputMode, line: &str, found: &mut Vec<Package>) -> LineResult {
        if line.trim().is_empty() {
            return Ok(());
        }

        let fields: Vec<&str> = line.split('\t').collect();
        let [name, version, release] = fields.as_slice() else {
            return Err("expected name, version and release separated by tabs".to_string());
        };
        if name.is_empty() || version.is_empty() {
            return Err("row without name or version".to_string());
        }

        let mut pkg = Package::new(*name).with_version(*version);
        // gpg-pubkey and friends have no release
        if !release.is_empty() && *release != "(none)" {
            pkg.push_version(format!("{}-{}", version, release));
        }
        found.push(pkg);

        Ok(())
    }
}
