//! Error taxonomy for registry loading and version queries.
//!
//! Lookups that simply find nothing are not errors; they surface as `None`
//! from the resolver. Everything here aborts the requested operation.

use std::path::PathBuf;
use thiserror::Error;

/// Failures raised by the loader, discovery, and version ordering.
#[derive(Error, Debug)]
pub enum AvmError {
    /// The registry document does not exist or could not be read.
    #[error("application registry not found at {path}")]
    NotFound {
        path: PathBuf,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Discovery probed every candidate location and found nothing.
    #[error("no application registry found; looked in:\n{}", format_candidates(.candidates))]
    NotDiscovered { candidates: Vec<PathBuf> },

    /// No user configuration root to anchor discovery on.
    #[error("unable to determine the user configuration directory; pass an explicit registry file")]
    ConfigRootUnavailable,

    /// The registry document exists but cannot be decoded or is not
    /// well-formed XML.
    #[error("failed to parse application registry {path}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: DocumentError,
    },

    /// A caller-supplied argument has the wrong shape.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A well-formed version query found no satisfying version.
    #[error("no version of '{app}' matches{}", describe_bound(.below))]
    NoMatch { app: String, below: Option<String> },

    /// A registered version identifier cannot be ordered.
    #[error("version '{version}' of '{app}' is not a major.minor.patch triple")]
    InvalidVersion { app: String, version: String },
}

/// Why an existing registry document could not be read as XML.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The encoding declaration names an encoding we cannot decode.
    #[error("unsupported document encoding '{0}'")]
    UnsupportedEncoding(String),

    /// The bytes are not valid in the detected encoding.
    #[error("document is not valid {0}")]
    Malformed(&'static str),

    #[error(transparent)]
    Xml(#[from] roxmltree::Error),
}

/// Coarse classification of [`AvmError`] for callers that branch on kind.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    NotFound,
    ConfigRootUnavailable,
    ParseError,
    InvalidArgument,
    NoMatch,
    InvalidVersion,
}

impl AvmError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AvmError::NotFound { .. } | AvmError::NotDiscovered { .. } => ErrorKind::NotFound,
            AvmError::ConfigRootUnavailable => ErrorKind::ConfigRootUnavailable,
            AvmError::ParseError { .. } => ErrorKind::ParseError,
            AvmError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            AvmError::NoMatch { .. } => ErrorKind::NoMatch,
            AvmError::InvalidVersion { .. } => ErrorKind::InvalidVersion,
        }
    }
}

fn format_candidates(candidates: &[PathBuf]) -> String {
    candidates
        .iter()
        .map(|path| format!("  {}", path.display()))
        .collect::<Vec<_>>()
        .join("\n")
}

fn describe_bound(below: &Option<String>) -> String {
    match below {
        Some(bound) => format!(" below '{bound}'"),
        None => String::new(),
    }
}
