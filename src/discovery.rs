//! Locating `ApplicationVersions.xml`.
//!
//! Search order: an explicit file wins outright; otherwise the user config
//! root is combined with each vendor directory name the manager has shipped
//! under, and the first candidate that exists is used. The environment is
//! only read by [`RegistryLocation::from_env`] so library callers and tests
//! can pass the config root explicitly.

use crate::error::AvmError;
use directories::BaseDirs;
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Vendor directory names, newest branding last. Order is part of the
/// lookup contract.
pub const VENDOR_DIRS: &[&str] = &["DNVGL", "DNV"];
pub const MANAGER_DIR: &str = "ApplicationVersionManager";
pub const REGISTRY_FILE: &str = "ApplicationVersions.xml";

const APPDATA_ENV: &str = "APPDATA";

/// Where to read the registry from.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RegistryLocation {
    /// Explicit registry file; skips discovery when set.
    pub xml_file: Option<PathBuf>,
    /// Platform user configuration root used for discovery.
    pub config_root: Option<PathBuf>,
}

impl RegistryLocation {
    /// Location pinned to a single file.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            xml_file: Some(path.into()),
            config_root: None,
        }
    }

    /// Location discovered under `config_root`.
    pub fn config_root(root: impl Into<PathBuf>) -> Self {
        Self {
            xml_file: None,
            config_root: Some(root.into()),
        }
    }

    /// Build a location from process state: `xml_file` when given, else the
    /// config root from `APPDATA` (as the manager itself uses on Windows) or
    /// the platform's roaming config directory.
    pub fn from_env(xml_file: Option<PathBuf>) -> Self {
        let config_root = env::var_os(APPDATA_ENV)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
            .or_else(|| BaseDirs::new().map(|dirs| dirs.config_dir().to_path_buf()));
        Self {
            xml_file,
            config_root,
        }
    }

    /// Resolve to a concrete file path.
    ///
    /// An explicit file is returned as-is; the loader reports it as missing
    /// if it does not exist.
    pub fn resolve(&self) -> Result<PathBuf, AvmError> {
        if let Some(path) = &self.xml_file {
            return Ok(path.clone());
        }
        let root = self
            .config_root
            .as_deref()
            .ok_or(AvmError::ConfigRootUnavailable)?;
        discover_registry(root)
    }
}

/// Candidate registry paths under `config_root`, in probe order.
pub fn registry_candidates(config_root: &Path) -> Vec<PathBuf> {
    VENDOR_DIRS
        .iter()
        .map(|vendor| config_root.join(vendor).join(MANAGER_DIR).join(REGISTRY_FILE))
        .collect()
}

/// First existing registry file under `config_root`.
pub fn discover_registry(config_root: &Path) -> Result<PathBuf, AvmError> {
    let candidates = registry_candidates(config_root);
    for candidate in &candidates {
        if candidate.is_file() {
            debug!("Using application registry '{}'.", candidate.display());
            return Ok(candidate.clone());
        }
        debug!("No application registry at '{}'.", candidate.display());
    }
    Err(AvmError::NotDiscovered { candidates })
}
