use crate::error::{HostspecError, Result};
use directories::ProjectDirs;
use std::path::PathBuf;

pub fn config_dir() -> Result<PathBuf> {
    let proj = ProjectDirs::from("", "", "hostspec").ok_or_else(|| {
        HostspecError::ConfigError("Could not determine config directory".to_string())
    })?;
    Ok(proj.config_dir().to_path_buf())
}

pub fn settings_file() -> Result<PathBuf> {
    Ok(config_dir()?.join("hostspec.kdl"))
}
