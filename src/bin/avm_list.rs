//! Lists applications registered in the Application Version Manager.
//!
//! By default only versions marked default are shown; `--all-versions` lists
//! every registered version. The table goes to stdout, diagnostics to stderr.

use anyhow::{Context, Result};
use avm::cli_support::{RegistryArgs, init_logging};
use avm::{Registry, Selection, collect_rows, render_table};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "avm-list",
    version,
    about = "List applications registered in DNV's Application Version Manager."
)]
struct Cli {
    /// List all versions, not just the ones marked as default.
    #[arg(long)]
    all_versions: bool,

    /// Emit the listing as a JSON array instead of a table.
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    registry: RegistryArgs,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.registry.logging_level);

    let path = cli.registry.location().resolve()?;
    let registry = Registry::load(&path)?;

    let selection = if cli.all_versions {
        Selection::AllVersions
    } else {
        Selection::DefaultsOnly
    };
    let rows = collect_rows(&registry, selection);

    if cli.json {
        let rendered =
            serde_json::to_string_pretty(&rows).context("Unable to serialize registry listing")?;
        println!("{rendered}");
    } else {
        print!("{}", render_table(&rows));
    }
    Ok(())
}
