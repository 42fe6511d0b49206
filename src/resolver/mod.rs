//! Path and version queries over a loaded [`Registry`].
//!
//! "Not installed" is an ordinary answer here: unknown applications, unknown
//! versions, a missing default, and paths that no longer exist on disk all
//! come back as `None` with a log line explaining which step came up empty.
//! Only malformed arguments and unorderable versions are errors.

pub mod overrides;

use crate::error::AvmError;
use crate::registry::{ApplicationEntry, ApplicationName, Registry, VersionId, VersionRecord};
use crate::version::{self, VersionBound};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{error, warn};

pub use overrides::{ExecutableLayout, InstallDirSuffix, PathOverrides};

/// An existing path that renders double-quoted, ready to be pasted into a
/// command line even when it contains spaces.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct QuotedPath {
    path: PathBuf,
}

impl QuotedPath {
    fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// The unquoted path.
    pub fn as_path(&self) -> &Path {
        &self.path
    }

    pub fn into_path_buf(self) -> PathBuf {
        self.path
    }
}

impl fmt::Display for QuotedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", self.path.display())
    }
}

/// Answers path and version queries against one registry snapshot.
#[derive(Debug)]
pub struct Resolver<'r> {
    registry: &'r Registry,
    overrides: PathOverrides,
}

impl<'r> Resolver<'r> {
    /// Resolver with the built-in executable layouts.
    pub fn new(registry: &'r Registry) -> Self {
        Self::with_overrides(registry, PathOverrides::default())
    }

    pub fn with_overrides(registry: &'r Registry, overrides: PathOverrides) -> Self {
        Self {
            registry,
            overrides,
        }
    }

    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    /// All registered versions of `app`, in document order.
    pub fn list_versions(&self, app: &str) -> Option<&'r ApplicationEntry> {
        self.registry.application(app)
    }

    /// Executable for `app` at `version`, or at its default version when
    /// `version` is `None`.
    pub fn resolve_executable_path(
        &self,
        app: &str,
        version: Option<&str>,
    ) -> Option<QuotedPath> {
        let (name, record) = self.select(app, version)?;
        let path = self.overrides.executable_path(&name, record);
        existing(&name, record, path, "executable")
    }

    /// Installation directory for `app` at `version` (or its default).
    pub fn resolve_install_dir(&self, app: &str, version: Option<&str>) -> Option<QuotedPath> {
        let (name, record) = self.select(app, version)?;
        let path = PathBuf::from(&record.install_dir);
        existing(&name, record, path, "install directory")
    }

    /// Greatest registered version of `app` strictly below `below`.
    ///
    /// The bound is validated before the registry is consulted.
    pub fn latest_version(&self, app: &str, below: Option<&str>) -> Result<VersionId, AvmError> {
        let bound = below.map(str::parse::<VersionBound>).transpose()?;
        let name = ApplicationName::new(app);
        match self.registry.application(name.as_str()) {
            Some(entry) => version::latest(name.as_str(), entry.ids(), bound.as_ref()),
            None => Err(AvmError::NoMatch {
                app: name.to_string(),
                below: bound.map(|b| b.to_string()),
            }),
        }
    }

    fn select(
        &self,
        app: &str,
        version: Option<&str>,
    ) -> Option<(ApplicationName, &'r VersionRecord)> {
        let name = ApplicationName::new(app);
        let Some(entry) = self.registry.application(name.as_str()) else {
            error!("Application '{app}' is not registered in Application Version Manager.");
            return None;
        };

        let record = match version {
            Some(version) => {
                let record = entry.get(version);
                if record.is_none() {
                    error!(
                        "Version '{version}' of application '{app}' is not registered in Application Version Manager."
                    );
                }
                record
            }
            None => {
                let record = entry.default_version();
                if record.is_none() {
                    error!(
                        "There is no default version registered for application '{app}' in Application Version Manager."
                    );
                }
                record
            }
        }?;
        Some((name, record))
    }
}

fn existing(
    app: &ApplicationName,
    record: &VersionRecord,
    path: PathBuf,
    what: &str,
) -> Option<QuotedPath> {
    if path.exists() {
        Some(QuotedPath::new(path))
    } else {
        warn!(
            "The {what} path '{}' for application/version {app}/{} does not exist.",
            path.display(),
            record.version
        );
        None
    }
}
