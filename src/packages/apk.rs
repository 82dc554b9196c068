//! Alpine packages via `apk list --installed`
//!
//! Rows look like `curl-7.68.0-r0 x86_64 {curl} (MIT) [installed]`; name,
//! version and release are glued together with dashes. Names may contain
//! dashes and digits (`font-adobe-100dpi`), versions never contain a dash.

use crate::command::CommandSpec;
use crate::core::types::{ManagerKind, Package};
use crate::packages::traits::{LineResult, OutputMode, PackageDriver};
use crate::utils::regex_cache;
use tracing::warn;

const ROW_PATTERN: &str = r"^(\S+)-([^-\s]+)-(r\d+)(?:\s|$)";

pub struct ApkDriver;

impl PackageDriver for ApkDriver {
    fn kind(&self) -> ManagerKind {
        ManagerKind::Apk
    }

    fn binary(&self) -> &'static str {
        "apk"
    }

    fn query_command(&self, name: &str) -> CommandSpec {
        self.list_command().arg(name)
    }

    fn list_command(&self) -> CommandSpec {
        CommandSpec::new("apk").args(["list", "--installed"])
    }

    fn parse_line(&self, _mode: OutputMode, line: &str, found: &mut Vec<Package>) -> LineResult {
        let line = line.trim();
        // Stale index warnings go to stderr and land in combined output
        if line.is_empty() {
            return Ok(());
        }
        if line.starts_with("WARNING:") {
            warn!(line, "apk warning skipped");
            return Ok(());
        }

        let row = regex_cache::cached(ROW_PATTERN).map_err(|e| e.to_string())?;
        let caps = row
            .captures(line)
            .ok_or_else(|| "expected <name>-<version>-r<release>".to_string())?;

        let version = &caps[2];
        let pkg = Package::new(&caps[1])
            .with_version(version)
            .with_version(format!("{}-{}", version, &caps[3]));
        found.push(pkg);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(output: &str) -> Result<Vec<Package>, String> {
        let mut found = Vec::new();
        for line in output.lines() {
            ApkDriver.parse_line(OutputMode::List, line, &mut found)?;
        }
        Ok(found)
    }

    #[test]
    fn test_parse_rows() {
        let output = "\
curl-7.68.0-r0 x86_64 {curl} (MIT) [installed]
py3-six-1.15.0-r0 noarch {py-six} (MIT) [installed]
libxml2-2.9.10-r5 x86_64 {libxml2} (MIT) [installed]
";
        let found = parse(output).expect("parse");

        assert_eq!(found.len(), 3);
        assert_eq!(found[0].name, "curl");
        assert_eq!(found[0].versions, vec!["7.68.0", "7.68.0-r0"]);
        assert_eq!(found[1].name, "py3-six");
        assert_eq!(found[2].name, "libxml2");
        assert_eq!(found[2].versions, vec!["2.9.10", "2.9.10-r5"]);
    }

    #[test]
    fn test_skips_warnings() {
        let output = "WARNING: Ignoring APKINDEX.2c4ac24e.tar.gz: No such file or directory\n\
                      busybox-1.31.1-r19 x86_64 {busybox} (GPL-2.0-only) [installed]\n";
        let found = parse(output).expect("parse");

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "busybox");
    }

    #[test]
    fn test_names_with_numeric_segments() {
        let output = "\
font-adobe-100dpi-1.0.3-r0 noarch {font-adobe-100dpi} (MIT) [installed]
lua5.3-libs-5.3.6-r0 x86_64 {lua5.3} (MIT) [installed]
py3-cryptography-3.3.2-r1 x86_64 {py3-cryptography} (Apache-2.0) [installed]
";
        let found = parse(output).expect("parse");

        assert_eq!(found[0].name, "font-adobe-100dpi");
        assert_eq!(found[0].versions, vec!["1.0.3", "1.0.3-r0"]);
        assert_eq!(found[1].name, "lua5.3-libs");
        assert_eq!(found[1].versions, vec!["5.3.6", "5.3.6-r0"]);
        assert_eq!(found[2].name, "py3-cryptography");
        assert_eq!(found[2].versions, vec!["3.3.2", "3.3.2-r1"]);
    }

    #[test]
    fn test_rejects_unknown_shape() {
        assert!(parse("curl 7.68.0\n").is_err());
    }
}
