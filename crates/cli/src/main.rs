mod args;
mod commands;
pub mod defaults;
mod printing;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use args::SimulateArgs;
use commands::{params, simulate, validate};

/// vintsim: a viral integration simulator
///
/// This tool builds benchmark genomes by inserting rearranged fragments of a
/// virus into a host reference, and records where everything went.
#[derive(Parser, Debug)]
#[command(name = "vintsim")]
#[command(author, version, about = "Simulates viral integrations into a host genome", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Simulate integrations and episomes.
    ///
    /// Writes the mutated host (plus episomes) as FASTA and one table per
    /// event kind.
    Simulate(Box<SimulateArgs>),

    /// Write a parameter file with the default event model.
    Params {
        /// Output JSON file
        #[arg(short, long, default_value = defaults::PARAMS_FILE)]
        output: PathBuf,
    },

    /// Check a parameter file.
    ///
    /// Verifies that all parameters are present and in range, and that the
    /// junctions fit into fragments of the minimum length.
    Validate {
        /// Parameter JSON file
        #[arg(short, long, default_value = defaults::PARAMS_FILE)]
        params: PathBuf,

        /// Minimum length of partial virus fragments
        #[arg(long, default_value_t = defaults::MIN_LEN, allow_negative_numbers = true)]
        min_len: i64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match cli.command {
        Commands::Simulate(args) => {
            simulate::run_simulation(&args)?;
        }
        Commands::Params { output } => {
            params::write_params(&output)?;
        }
        Commands::Validate { params, min_len } => {
            validate::validate_params(&params, min_len)?;
        }
    }

    Ok(())
}
