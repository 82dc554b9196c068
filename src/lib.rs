//! Server-state assertions.
//!
//! Checks installed packages and service status on the local host through
//! the host's own tools (dpkg, rpm, apk, pip, gem; systemd, upstart, sysv)
//! and reports whether what they print matches what the caller expects.
//!
//! ```rust,no_run
//! use hostspec::checks::{is_installed, PackageSpec};
//! use hostspec::packages::PackageManager;
//!
//! let apt = PackageManager::new("apt")?;
//! is_installed(&[
//!     PackageSpec::new("curl", apt.clone()),
//!     PackageSpec::new("nginx", apt).with_versions(["1.18.0"]),
//! ])?;
//! # Ok::<(), hostspec::error::HostspecError>(())
//! ```

pub mod checks;
pub mod command;
pub mod config;
pub mod core;
pub mod error;
pub mod packages;
pub mod services;
pub mod utils;

pub use checks::{PackageSpec, has_status, is_installed, is_running, is_stopped, list_installed};
pub use crate::core::types::{InitKind, ManagerKind, Package, ServiceStatus};
pub use error::{HostspecError, Result};
pub use packages::PackageManager;
pub use services::{Service, SysInit};
