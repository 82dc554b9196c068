//! Ruby gems via `gem list`
//!
//! Every installed version of a gem shares one row:
//! `nokogiri (1.10.9 x86_64-linux, 1.10.4)` or `bundler (default: 2.1.4)`.

use crate::command::CommandSpec;
use crate::core::types::{ManagerKind, Package};
use crate::packages::traits::{LineResult, OutputMode, PackageDriver};
use crate::utils::regex_cache;
use tracing::debug;

const ROW_PATTERN: &str = r"^(\S+) \((.+)\)$";

pub struct GemDriver;

impl PackageDriver for GemDriver {
    fn kind(&self) -> ManagerKind {
        ManagerKind::Gem
    }

    fn binary(&self) -> &'static str {
        "gem"
    }

    fn query_command(&self, name: &str) -> CommandSpec {
        self.list_command().args(["--exact", name])
    }

    fn list_command(&self) -> CommandSpec {
        CommandSpec::new("gem").args(["list", "--local"])
    }

    fn parse_line(&self, _mode: OutputMode, line: &str, found: &mut Vec<Package>) -> LineResult {
        let line = line.trim();
        if line.is_empty() {
            return Ok(());
        }
        // `*** LOCAL GEMS ***` banner
        if line.starts_with("***") {
            debug!(line, "gem header skipped");
            return Ok(());
        }

        let row = regex_cache::cached(ROW_PATTERN).map_err(|e| e.to_string())?;
        let caps = row
            .captures(line)
            .ok_or_else(|| "expected <name> (<version>, ...)".to_string())?;

        let mut pkg = Package::new(&caps[1]);
        for version in caps[2].split(',') {
            let version = version.trim();
            let version = version.strip_prefix("default:").unwrap_or(version);
            // Drop the platform suffix
            if let Some(number) = version.split_whitespace().next() {
                pkg.push_version(number);
            }
        }

        if pkg.versions.is_empty() {
            return Err("gem row without versions".to_string());
        }
        found.push(pkg);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_listing() {
        let output = "
*** LOCAL GEMS ***

bundler (default: 2.1.4)
nokogiri (1.10.9 x86_64-linux, 1.10.4)
rake (13.0.1, 12.3.3)
";
        let mut found = Vec::new();
        for line in output.lines() {
            GemDriver
                .parse_line(OutputMode::List, line, &mut found)
                .expect("parse");
        }

        assert_eq!(found.len(), 3);
        assert_eq!(found[0].versions, vec!["2.1.4"]);
        assert_eq!(found[1].versions, vec!["1.10.9", "1.10.4"]);
        assert_eq!(found[2].name, "rake");
        assert_eq!(found[2].versions, vec!["13.0.1", "12.3.3"]);
    }

    #[test]
    fn test_rejects_unknown_shape() {
        let mut found = Vec::new();
        assert!(
            GemDriver
                .parse_line(OutputMode::List, "rake 13.0.1", &mut found)
                .is_err()
        );
    }

    #[test]
    fn test_query_command_is_exact() {
        assert_eq!(
            GemDriver.query_command("rake").to_string(),
            "gem list --local --exact rake"
        );
    }
}
