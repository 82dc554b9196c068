//! Version matching between an expectation and what a backend reported
//!
//! A package satisfies a version expectation when ANY found version is in the
//! requested set. The found side is jagged (several entries, each with
//! several versions), so the test runs over the union of all found versions.

use crate::core::types::Package;
use std::collections::BTreeSet;

/// First found version that is also requested, if any
pub fn find_overlap<'a>(requested: &BTreeSet<String>, found: &'a [Package]) -> Option<&'a str> {
    found
        .iter()
        .flat_map(|pkg| pkg.versions.iter())
        .find(|version| requested.contains(*version))
        .map(String::as_str)
}

/// Every discovered version in report order, without duplicates
pub fn discovered_versions(found: &[Package]) -> Vec<String> {
    let mut versions: Vec<String> = Vec::new();
    for version in found.iter().flat_map(|pkg| pkg.versions.iter()) {
        if !versions.contains(version) {
            versions.push(version.clone());
        }
    }
    versions
}

#[cfg(test)]
mod tests;
