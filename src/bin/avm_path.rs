//! Prints the quoted executable path, install directory, or latest version of
//! a registered application.
//!
//! Exit status is 0 on success, 2 when the application/version/file is not
//! available, and 1 when the registry cannot be read or arguments are bad.

use anyhow::Result;
use avm::cli_support::{EXIT_NOT_AVAILABLE, RegistryArgs, init_logging};
use avm::{Registry, Resolver};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "avm-path",
    about = "Resolve the path of an application registered in DNV's Application Version Manager."
)]
struct Cli {
    /// Application name (case-insensitive).
    application: String,

    /// Version to resolve; defaults to the version marked default.
    #[arg(long = "version", value_name = "VERSION", conflicts_with = "latest")]
    app_version: Option<String>,

    /// Print the installation directory instead of the executable.
    #[arg(long, conflicts_with = "latest")]
    install_dir: bool,

    /// Print the latest registered version instead of a path.
    #[arg(long)]
    latest: bool,

    /// Only consider versions below this bound (e.g. `9`, `9.5`, `9.5.3`).
    #[arg(long, value_name = "VERSION", requires = "latest")]
    below: Option<String>,

    #[command(flatten)]
    registry: RegistryArgs,
}

fn main() {
    match run() {
        Ok(true) => {}
        Ok(false) => std::process::exit(EXIT_NOT_AVAILABLE),
        Err(err) => {
            eprintln!("{err:#}");
            std::process::exit(1);
        }
    }
}

/// Returns whether something was printed.
fn run() -> Result<bool> {
    let cli = Cli::parse();
    init_logging(cli.registry.logging_level);

    if let Some(bound) = cli.below.as_deref() {
        bound.parse::<avm::VersionBound>()?;
    }

    let path = cli.registry.location().resolve()?;
    let registry = Registry::load(&path)?;
    let resolver = Resolver::new(&registry);

    if cli.latest {
        let version = resolver.latest_version(&cli.application, cli.below.as_deref())?;
        println!("{version}");
        return Ok(true);
    }

    let version = cli.app_version.as_deref();
    let resolved = if cli.install_dir {
        resolver.resolve_install_dir(&cli.application, version)
    } else {
        resolver.resolve_executable_path(&cli.application, version)
    };

    match resolved {
        Some(path) => {
            println!("{path}");
            Ok(true)
        }
        None => {
            let requested = version.unwrap_or("default");
            eprintln!(
                "{}/{requested} is not available.",
                cli.application.to_lowercase()
            );
            Ok(false)
        }
    }
}
