use crate::discovery::RegistryLocation;
use clap::{Args, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

// Flags and logging setup shared by `avm-list` and `avm-path`, so both
// binaries accept the same registry override and verbosity names.

/// Exit status when a query resolved to nothing (not installed, no default).
pub const EXIT_NOT_AVAILABLE: i32 = 2;

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    fn to_filter_directive(self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Args, Clone, Debug)]
pub struct RegistryArgs {
    /// XML file listing application versions (skips discovery).
    #[arg(long = "xml-file", value_name = "FILE")]
    pub xml_file: Option<PathBuf>,

    /// Set logging level.
    #[arg(short = 'l', long = "logging-level", value_enum, default_value = "info")]
    pub logging_level: LogLevel,
}

impl RegistryArgs {
    /// Registry location for this invocation; reads the environment.
    pub fn location(&self) -> RegistryLocation {
        RegistryLocation::from_env(self.xml_file.clone())
    }
}

/// Install the stderr subscriber for a binary. Stdout stays reserved for
/// results so output can be piped.
pub fn init_logging(level: LogLevel) {
    let filter = EnvFilter::new(level.to_filter_directive());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
