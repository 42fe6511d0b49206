use serde::Serialize;
use std::borrow::Borrow;
use std::fmt;

/// Case-insensitive application key (e.g., `sima`, `genie`).
///
/// The inner string is always lowercase so lookups built from user input and
/// keys read from the registry file agree regardless of spelling.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize)]
#[serde(transparent)]
pub struct ApplicationName(String);

/// Case-insensitive version key as written in the registry (e.g., `9.5.3`).
///
/// Stored opaquely; only ordering queries require the `major.minor.patch`
/// shape (see [`crate::version::VersionTriple`]).
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize)]
#[serde(transparent)]
pub struct VersionId(String);

impl ApplicationName {
    pub fn new(raw: &str) -> Self {
        Self(raw.to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl VersionId {
    pub fn new(raw: &str) -> Self {
        Self(raw.to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApplicationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for VersionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Borrowing as `str` lets the ordered maps be queried with an already
// lowercased `&str` without allocating a key.
impl Borrow<str> for ApplicationName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for VersionId {
    fn borrow(&self) -> &str {
        &self.0
    }
}
