//! Compiled-pattern cache for the output parsers
//!
//! Drivers parse one line at a time, so every pattern is looked up once per
//! line. Compiling on each call would dominate parse time for long listings.

use crate::error::{HostspecError, Result};
use regex::Regex;
use std::collections::HashMap;
use std::sync::{LazyLock, Mutex};

static PATTERNS: LazyLock<Mutex<HashMap<&'static str, Regex>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

/// Return the compiled form of a driver pattern, compiling it on first use
///
/// Patterns are `'static` driver constants; a bad pattern is reported as a
/// configuration error rather than a panic.
pub fn cached(pattern: &'static str) -> Result<Regex> {
    if let Ok(patterns) = PATTERNS.lock()
        && let Some(regex) = patterns.get(pattern)
    {
        return Ok(regex.clone());
    }

    let regex = Regex::new(pattern)
        .map_err(|e| HostspecError::ConfigError(format!("Invalid regex pattern: {}", e)))?;

    // Lock poisoning only costs a recompile next time
    if let Ok(mut patterns) = PATTERNS.lock() {
        patterns.insert(pattern, regex.clone());
    }

    Ok(regex)
}

/// Whether a pattern has been compiled already
#[cfg(test)]
pub(crate) fn is_cached(pattern: &str) -> bool {
    PATTERNS
        .lock()
        .map(|patterns| patterns.contains_key(pattern))
        .unwrap_or(false)
}
