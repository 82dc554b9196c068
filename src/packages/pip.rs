//! Python distributions via pip
//!
//! Listing uses the freeze format (`name==version`); a single query uses
//! `pip show`, which prints a block of `Key: value` lines per package.

use crate::command::CommandSpec;
use crate::core::types::{ManagerKind, Package};
use crate::packages::traits::{LineResult, OutputMode, PackageDriver};

pub struct PipDriver;

impl PackageDriver for PipDriver {
    fn kind(&self) -> ManagerKind {
        ManagerKind::Pip
    }

    fn binary(&self) -> &'static str {
        "pip"
    }

    fn query_command(&self, name: &str) -> CommandSpec {
        CommandSpec::new("pip").args(["show", "--disable-pip-version-check", name])
    }

    fn list_command(&self) -> CommandSpec {
        CommandSpec::new("pip").args(["list", "--format=freeze", "--disable-pip-version-check"])
    }

    fn not_found_marker(&self) -> Option<&'static str> {
        Some("Package(s) not found")
    }

    fn parse_line(&self, mode: OutputMode, line: &str, found: &mut Vec<Package>) -> LineResult {
        match mode {
            OutputMode::List => parse_freeze_line(line, found),
            OutputMode::Query => parse_show_line(line, found),
        }
    }

    fn finish(
        &self,
        mode: OutputMode,
        found: Vec<Package>,
    ) -> std::result::Result<Vec<Package>, String> {
        if mode == OutputMode::Query
            && let Some(pkg) = found.iter().find(|pkg| pkg.versions.is_empty())
        {
            return Err(format!("no Version field for {}", pkg.name));
        }
        Ok(found)
    }

    fn matches_name(&self, reported: &str, requested: &str) -> bool {
        normalize(reported) == normalize(requested)
    }
}

fn parse_freeze_line(line: &str, found: &mut Vec<Package>) -> LineResult {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') || line.starts_with("-e ") {
        return Ok(());
    }

    if let Some((name, version)) = line.split_once("==") {
        found.push(Package::new(name.trim()).with_version(version.trim()));
        return Ok(());
    }

    // Direct URL installs carry no version
    if let Some((name, _url)) = line.split_once(" @ ") {
        found.push(Package::new(name.trim()));
        return Ok(());
    }

    Err("expected <name>==<version>".to_string())
}

fn parse_show_line(line: &str, found: &mut Vec<Package>) -> LineResult {
    // Anything without a key is a continuation of a multi-line field
    let Some((key, value)) = line.split_once(':') else {
        return Ok(());
    };

    match key {
        "Name" => found.push(Package::new(value.trim())),
        "Version" => {
            let pkg = found
                .last_mut()
                .ok_or_else(|| "Version field before any Name field".to_string())?;
            pkg.push_version(value.trim());
        }
        _ => {}
    }

    Ok(())
}

/// PEP 503 name folding: case-insensitive, `_` and `.` equal to `-`
fn normalize(name: &str) -> String {
    name.to_lowercase().replace(['_', '.'], "-")
}
