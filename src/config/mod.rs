//! Settings for command execution and status classification
//!
//! Settings live in `<config dir>/hostspec/hostspec.kdl`. A missing file
//! means defaults; see [`kdl::parse_settings`] for the format.

pub mod kdl;

use crate::command::DEFAULT_COMMAND_TIMEOUT;
use crate::error::{HostspecError, Result};
use crate::services::SignatureTable;
use crate::utils::paths;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Upper bound for one tool invocation; `None` waits forever
    pub command_timeout: Option<Duration>,
    pub signatures: SignatureTable,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            command_timeout: Some(DEFAULT_COMMAND_TIMEOUT),
            signatures: SignatureTable::builtin(),
        }
    }
}

impl Settings {
    pub fn from_kdl(content: &str) -> Result<Self> {
        kdl::parse_settings(content)
    }

    /// Load settings from `path`, falling back to defaults when it is absent
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| HostspecError::IoError {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::from_kdl(&content)
    }

    pub fn default_path() -> Result<PathBuf> {
        paths::settings_file()
    }

    pub fn load_default() -> Result<Self> {
        Self::load(&Self::default_path()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::InitKind;
    use crate::services::SignatureState;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let settings = Settings::load(&dir.path().join("hostspec.kdl")).expect("load");

        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("hostspec.kdl");
        std::fs::write(
            &path,
            "timeout 5\nsignature \"systemd\" { running \"active (running)\"; stopped \"inactive\" }\n",
        )
        .expect("write settings");

        let settings = Settings::load(&path).expect("load");

        assert_eq!(settings.command_timeout, Some(Duration::from_secs(5)));
        assert_eq!(
            settings.signatures.get(SignatureState::Stopped, InitKind::Systemd),
            Some("inactive")
        );
    }

    #[test]
    fn test_directory_is_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = Settings::load(dir.path()).unwrap_err();

        assert!(matches!(err, HostspecError::IoError { .. }));
    }

    #[test]
    fn test_default_path_file_name() {
        if let Ok(path) = Settings::default_path() {
            assert!(path.ends_with("hostspec/hostspec.kdl") || path.ends_with("hostspec.kdl"));
        }
    }
}
