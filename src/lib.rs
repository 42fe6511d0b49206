//! Shared library for the Application Version Manager helpers.
//!
//! The crate reads the `ApplicationVersions.xml` registry that DNV's
//! Application Version Manager keeps in the user profile and answers three
//! questions about it: where is the executable (or install directory) of an
//! application's default or given version, which versions are registered, and
//! which is the latest version below a bound. The functions at the crate root
//! load a fresh registry for every call; use [`Registry`] and [`Resolver`]
//! directly to run several queries against one snapshot.

pub mod cli_support;
pub mod discovery;
pub mod error;
pub mod registry;
pub mod report;
pub mod resolver;
pub mod version;

use std::cmp::Ordering;

pub use discovery::{RegistryLocation, discover_registry, registry_candidates};
pub use error::{AvmError, DocumentError, ErrorKind};
pub use registry::{ApplicationEntry, ApplicationName, Registry, VersionId, VersionRecord};
pub use report::{ReportRow, Selection, collect_rows, render_table};
pub use resolver::{ExecutableLayout, InstallDirSuffix, PathOverrides, QuotedPath, Resolver};
pub use version::{VersionBound, VersionTriple};

/// Resolve `location` and load the registry it points at.
pub fn registered_applications(location: &RegistryLocation) -> Result<Registry, AvmError> {
    let path = location.resolve()?;
    Registry::load(&path)
}

/// Quoted path to the executable of `app`, loading the registry first.
///
/// `Ok(None)` means the application, version, default, or file is missing.
pub fn exe_path(
    app: &str,
    version: Option<&str>,
    location: &RegistryLocation,
) -> Result<Option<QuotedPath>, AvmError> {
    let registry = registered_applications(location)?;
    Ok(Resolver::new(&registry).resolve_executable_path(app, version))
}

/// Quoted installation directory of `app`, loading the registry first.
pub fn install_dir(
    app: &str,
    version: Option<&str>,
    location: &RegistryLocation,
) -> Result<Option<QuotedPath>, AvmError> {
    let registry = registered_applications(location)?;
    Ok(Resolver::new(&registry).resolve_install_dir(app, version))
}

/// Latest registered version of `app` below `below`, loading the registry
/// first. A malformed bound fails before the registry file is touched.
pub fn latest_version(
    app: &str,
    below: Option<&str>,
    location: &RegistryLocation,
) -> Result<VersionId, AvmError> {
    if let Some(bound) = below {
        bound.parse::<VersionBound>()?;
    }
    let registry = registered_applications(location)?;
    Resolver::new(&registry).latest_version(app, below)
}

/// Order two version identifiers as `major.minor.patch` triples.
pub fn compare_versions(a: &str, b: &str) -> Result<Ordering, AvmError> {
    version::compare(a, b)
}
