//! taxui CLI - headless harness for the tax-filing page enhancers
//!
//! This is the entry point for the taxui command-line tool, which provides:
//! - Page snapshot inspection: which enhancers would activate (`inspect`)
//! - Scripted event replay against a snapshot (`simulate`)
//! - Live tax-year queries against a running backend (`years`)

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod tracing_setup;
mod ui;

use commands::{run_inspect, run_simulate, run_years, InspectArgs, SimulateArgs, YearsArgs};

#[derive(Parser, Debug)]
#[command(
    name = "taxui",
    author,
    version,
    about = "Headless harness for the association tax-filing page enhancers",
    long_about = "Load JSON snapshots of the app's server-rendered pages, replay user \
                  interaction scripts against the enhancement layer, and query the \
                  backend's AJAX endpoints directly."
)]
struct Cli {
    /// Suppress progress spinners (for script consumption)
    #[arg(long, short = 'q', global = true)]
    quiet: bool,

    /// Enable debug logging (RUST_LOG still takes precedence)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Report which enhancers activate on a page snapshot
    Inspect(InspectArgs),
    /// Replay an event script against a page snapshot and print the result
    Simulate(SimulateArgs),
    /// Query tax years for an association from the live backend
    Years(YearsArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_setup::init_tracing(cli.debug)?;
    ui::init_quiet_mode(cli.quiet);

    match cli.command {
        Commands::Inspect(args) => run_inspect(args),
        Commands::Simulate(args) => run_simulate(args).await,
        Commands::Years(args) => run_years(args).await,
    }
}
