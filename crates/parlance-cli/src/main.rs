//! Parlance CLI - run spatial naming-game simulations.

mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "parlance")]
#[command(author, version, about = "Parlance - Emergent vocabularies in mobile agent populations", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (debug logging, per-tick lexicon changes)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default parlance.toml
    Init {
        /// Project directory (default: current directory)
        #[arg(short, long)]
        path: Option<String>,
    },

    /// Run one simulation
    Run {
        /// Number of ticks to run
        #[arg(short, long)]
        ticks: Option<u64>,

        /// Random seed
        #[arg(short, long)]
        seed: Option<u64>,

        /// Population size
        #[arg(short = 'n', long)]
        population: Option<usize>,

        /// Agents seeded with the canonical vocabulary
        #[arg(short, long)]
        literate: Option<usize>,

        /// Wrap grid edges (toroidal)
        #[arg(long)]
        wrap: Option<bool>,

        /// Print the vocabulary every N ticks (0 disables)
        #[arg(long)]
        report_every: Option<u64>,

        /// Verify lexicon/registry invariants after every tick
        #[arg(long)]
        check_invariants: bool,

        /// Print the final snapshot as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run the configuration over many seeds
    Batch {
        /// Number of seeds
        #[arg(short, long)]
        runs: Option<u64>,

        /// Ticks per run
        #[arg(short, long)]
        ticks: Option<u64>,

        /// First seed
        #[arg(short, long)]
        seed: Option<u64>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Init { path } => commands::init::run(path),
        Commands::Run {
            ticks,
            seed,
            population,
            literate,
            wrap,
            report_every,
            check_invariants,
            json,
        } => commands::run::run(
            commands::run::RunOverrides {
                ticks,
                seed,
                population,
                literate,
                wrap,
                report_every,
                check_invariants,
                json,
            },
            cli.verbose,
        ),
        Commands::Batch { runs, ticks, seed, json } => commands::batch::run(runs, ticks, seed, json),
    }
}
