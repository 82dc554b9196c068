use crate::command::CommandSpec;
use crate::core::types::{ManagerKind, Package};

/// Which command produced the text being parsed
///
/// Some tools print a different shape for a single-package query than for a
/// full listing (`pip show` vs `pip list`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Query,
    List,
}

/// Outcome of parsing one line; the message explains the expected shape
pub type LineResult = std::result::Result<(), String>;

/// One package manager's command lines and output format
///
/// Parsing is line-oriented so listings can be consumed while the tool is
/// still writing them. Identical input always yields identical output.
pub trait PackageDriver: Send + Sync {
    fn kind(&self) -> ManagerKind;

    /// Binary that must be on PATH for the driver to work
    fn binary(&self) -> &'static str;

    fn query_command(&self, name: &str) -> CommandSpec;

    fn list_command(&self) -> CommandSpec;

    /// Text a failed query prints when the package simply is not installed
    fn not_found_marker(&self) -> Option<&'static str> {
        None
    }

    /// Consume one line, appending to or amending `found`
    fn parse_line(&self, mode: OutputMode, line: &str, found: &mut Vec<Package>) -> LineResult;

    /// Validate the collected entries once the output is exhausted
    fn finish(
        &self,
        _mode: OutputMode,
        found: Vec<Package>,
    ) -> std::result::Result<Vec<Package>, String> {
        Ok(found)
    }

    /// Whether a reported name answers a query for `requested`
    fn matches_name(&self, reported: &str, requested: &str) -> bool {
        reported == requested
    }
}
