//! Application registry wiring.
//!
//! This module wraps the `ApplicationVersions.xml` file maintained by the
//! Application Version Manager so callers get an ordered, case-normalized
//! snapshot. Use [`Registry::load`] for files on disk and the resolver for
//! path and version queries on top of it.

pub mod decode;
pub mod identity;
pub mod loader;
pub mod model;

pub use identity::{ApplicationName, VersionId};
pub use model::{ApplicationEntry, Registry, VersionRecord};
