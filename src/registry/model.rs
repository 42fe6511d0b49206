//! In-memory representation of `ApplicationVersions.xml`.
//!
//! The types mirror the attributes the Application Version Manager writes so
//! the resolver and report can reason about records without touching XML.
//! Both maps preserve document order; default selection and latest-version
//! scans depend on it.

use crate::registry::identity::{ApplicationName, VersionId};
use indexmap::IndexMap;
use serde::Serialize;

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
/// One registered version of one application.
pub struct VersionRecord {
    pub version: VersionId,
    pub exe_path: String,
    pub install_dir: String,
    pub platform: String,
    pub product_type: String,
    pub category: String,
    pub is_default: bool,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(transparent)]
/// Every registered version of one application, in document order.
pub struct ApplicationEntry {
    versions: IndexMap<VersionId, VersionRecord>,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(transparent)]
/// Application name to catalog entry, in document order.
///
/// Built once per load and never mutated afterwards.
pub struct Registry {
    applications: IndexMap<ApplicationName, ApplicationEntry>,
}

impl ApplicationEntry {
    /// Record a version. A repeated identifier keeps its original position but
    /// takes the newer attributes; returns the replaced record, if any.
    pub(crate) fn insert(&mut self, record: VersionRecord) -> Option<VersionRecord> {
        self.versions.insert(record.version.clone(), record)
    }

    /// Exact, case-insensitive version lookup.
    pub fn get(&self, version: &str) -> Option<&VersionRecord> {
        self.versions.get(version.to_lowercase().as_str())
    }

    /// The record marked default. When several are marked, the last one in
    /// document order wins.
    pub fn default_version(&self) -> Option<&VersionRecord> {
        self.versions.values().rev().find(|record| record.is_default)
    }

    /// Number of records flagged as default.
    pub fn default_count(&self) -> usize {
        self.versions.values().filter(|record| record.is_default).count()
    }

    pub fn ids(&self) -> impl Iterator<Item = &VersionId> {
        self.versions.keys()
    }

    pub fn records(&self) -> impl Iterator<Item = &VersionRecord> {
        self.versions.values()
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }
}

impl Registry {
    pub(crate) fn insert(
        &mut self,
        name: ApplicationName,
        entry: ApplicationEntry,
    ) -> Option<ApplicationEntry> {
        self.applications.insert(name, entry)
    }

    /// Case-insensitive application lookup.
    pub fn application(&self, name: &str) -> Option<&ApplicationEntry> {
        self.applications.get(name.to_lowercase().as_str())
    }

    /// Iterates applications in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&ApplicationName, &ApplicationEntry)> {
        self.applications.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &ApplicationName> {
        self.applications.keys()
    }

    pub fn len(&self) -> usize {
        self.applications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.applications.is_empty()
    }
}
