//! Debian/Ubuntu packages via dpkg-query
//!
//! Output is one row per known package: name, version and the two-letter
//! status abbreviation (`ii` = wanted and installed, `rc` = removed with
//! config files left, `un` = unknown). Only rows whose second status letter
//! is `i` count as installed.

use crate::command::CommandSpec;
use crate::core::types::{ManagerKind, Package};
use crate::packages::traits::{LineResult, OutputMode, PackageDriver};

const FORMAT: &str = "-f=${Package}\t${Version}\t${db:Status-Abbrev}\n";

pub struct AptDriver;

impl PackageDriver for AptDriver {
    fn kind(&self) -> ManagerKind {
        ManagerKind::Apt
    }

    fn binary(&self) -> &'static str {
        "dpkg-query"
    }

    fn query_command(&self, name: &str) -> CommandSpec {
        self.list_command().arg(name)
    }

    fn list_command(&self) -> CommandSpec {
        CommandSpec::new("dpkg-query").args(["-W", FORMAT])
    }

    fn not_found_marker(&self) -> Option<&'static str> {
        Some("no packages found matching")
    }

    fn parse_line(&self, _mode: OutputMode, line: &str, found: &mut Vec<Package>) -> LineResult {
        if line.trim().is_empty() {
            return Ok(());
        }

        let fields: Vec<&str> = line.split('\t').collect();
        let [name, version, status] = fields.as_slice() else {
            return Err("expected name, version and status separated by tabs".to_string());
        };

        if !is_installed(status) {
            return Ok(());
        }
        if name.is_empty() || version.is_empty() {
            return Err("installed package without name or version".to_string());
        }

        let mut pkg = Package::new(*name).with_version(*version);
        pkg.push_version(upstream_version(version));
        found.push(pkg);

        Ok(())
    }
}

fn is_installed(status: &str) -> bool {
    status.chars().nth(1) == Some('i')
}

/// Debian version without epoch and revision: `1:7.68.0-1ubuntu2` -> `7.68.0`
fn upstream_version(version: &str) -> &str {
    let without_epoch = match version.split_once(':') {
        Some((epoch, rest)) if epoch.chars().all(|c| c.is_ascii_digit()) => rest,
        _ => version,
    };

    match without_epoch.rsplit_once('-') {
        Some((upstream, _revision)) => upstream,
        None => without_epoch,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(output: &str) -> Result<Vec<Package>, String> {
        let mut found = Vec::new();
        for line in output.lines() {
            AptDriver.parse_line(OutputMode::List, line, &mut found)?;
        }
        Ok(found)
    }

    #[test]
    fn test_parse_installed_rows() {
        let output = "curl\t7.68.0-1ubuntu2.7\tii \nlibc6\t2.31-0ubuntu9\tii \n";
        let found = parse(output).expect("parse");

        assert_eq!(found.len(), 2);
        assert_eq!(found[0].name, "curl");
        assert_eq!(found[0].versions, vec!["7.68.0-1ubuntu2.7", "7.68.0"]);
        assert_eq!(found[1].versions, vec!["2.31-0ubuntu9", "2.31"]);
    }

    #[test]
    fn test_skips_removed_and_unknown_rows() {
        let output = "vim\t2:8.1.2269-1ubuntu5\trc \nnano\t\tun \ngit\t1:2.25.1-1\thi \n";
        let found = parse(output).expect("parse");

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "git");
        assert_eq!(found[0].versions, vec!["1:2.25.1-1", "2.25.1"]);
    }

    #[test]
    fn test_malformed_row_is_rejected() {
        assert!(parse("curl 7.68.0\n").is_err());
    }

    #[test]
    fn test_upstream_version() {
        assert_eq!(upstream_version("7.68.0"), "7.68.0");
        assert_eq!(upstream_version("1:2.25.1-1"), "2.25.1");
        assert_eq!(upstream_version("2.31-0ubuntu9"), "2.31");
    }

    #[test]
    fn test_query_command() {
        let spec = AptDriver.query_command("curl");
        assert_eq!(spec.program(), "dpkg-query");
        assert_eq!(spec.arguments().last().map(String::as_str), Some("curl"));
    }
}
