//! MedMap CLI - headless driver for the map synchronization engine.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;
mod error;
mod runner;

use commands::config::ConfigCommands;
use commands::distance::DistanceArgs;
use commands::simulate::SimulateArgs;

#[derive(Parser)]
#[command(name = "medmap")]
#[command(version = medmap::VERSION)]
#[command(about = "Simulate the health-care provider map from the command line", long_about = None)]
struct Cli {
    /// Configuration file (defaults to ~/.medmap/config.ini)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a map session over a provider file and report the result
    Simulate(SimulateArgs),

    /// Great-circle distance between two points
    Distance(DistanceArgs),

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn main() {
    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    let result = match cli.command {
        Commands::Simulate(args) => commands::simulate::run(args, config_path),
        Commands::Distance(args) => commands::distance::run(args),
        Commands::Config { command } => commands::config::run(command, config_path),
    };

    if let Err(e) = result {
        e.exit();
    }
}
