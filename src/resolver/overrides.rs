//! Per-application executable layouts.
//!
//! A few products register an `ExeFilePath` that does not point at the
//! launcher users actually run. For those, the executable is rebuilt from the
//! install directory instead. The table is keyed by application name so new
//! exceptions are added without touching the resolver.

use crate::registry::{ApplicationName, VersionRecord};
use indexmap::IndexMap;
use std::fmt;
use std::path::PathBuf;

/// Builds the executable path for a registered version.
pub trait ExecutableLayout: Send + Sync {
    fn executable_path(&self, record: &VersionRecord) -> PathBuf;
}

/// Joins fixed, case-sensitive segments onto the record's `InstallDir`,
/// ignoring its `ExeFilePath`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InstallDirSuffix {
    segments: &'static [&'static str],
}

impl InstallDirSuffix {
    pub const fn new(segments: &'static [&'static str]) -> Self {
        Self { segments }
    }
}

impl ExecutableLayout for InstallDirSuffix {
    fn executable_path(&self, record: &VersionRecord) -> PathBuf {
        let mut path = PathBuf::from(&record.install_dir);
        path.extend(self.segments);
        path
    }
}

const GENIE_LAYOUT: InstallDirSuffix = InstallDirSuffix::new(&["Program", "GeniE.exe"]);
const XTRACT_LAYOUT: InstallDirSuffix = InstallDirSuffix::new(&["Program", "Xtract.exe"]);

/// Application name to layout strategy. Names are matched case-insensitively.
pub struct PathOverrides {
    layouts: IndexMap<ApplicationName, Box<dyn ExecutableLayout>>,
}

impl PathOverrides {
    /// A table with no exceptions; every application uses `ExeFilePath`.
    pub fn empty() -> Self {
        Self {
            layouts: IndexMap::new(),
        }
    }

    /// Register (or replace) the layout used for `app`.
    pub fn insert(&mut self, app: &str, layout: impl ExecutableLayout + 'static) {
        self.layouts.insert(ApplicationName::new(app), Box::new(layout));
    }

    pub fn get(&self, app: &ApplicationName) -> Option<&dyn ExecutableLayout> {
        self.layouts.get(app).map(|layout| &**layout)
    }

    /// Executable path for `record`, honoring any exception for `app`.
    pub fn executable_path(&self, app: &ApplicationName, record: &VersionRecord) -> PathBuf {
        match self.get(app) {
            Some(layout) => layout.executable_path(record),
            None => PathBuf::from(&record.exe_path),
        }
    }
}

impl Default for PathOverrides {
    /// The built-in exceptions for products whose launcher lives under
    /// `<InstallDir>/Program`.
    fn default() -> Self {
        let mut overrides = Self::empty();
        overrides.insert("genie", GENIE_LAYOUT);
        overrides.insert("xtract", XTRACT_LAYOUT);
        overrides
    }
}

impl fmt::Debug for PathOverrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.layouts.keys()).finish()
    }
}
