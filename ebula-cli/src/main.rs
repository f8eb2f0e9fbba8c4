//! ebula CLI - Command-line interface
//!
//! This binary drives the ebula library from route bundles on disk.

mod commands;
mod error;
mod runner;

use clap::{Parser, Subcommand};

use commands::config::ConfigCommands;
use commands::drive::DriveArgs;
use commands::position::PositionArgs;
use commands::timeline::TimelineArgs;
use error::CliError;
use runner::CliRunner;

#[derive(Parser)]
#[command(name = "ebula")]
#[command(version = ebula::VERSION)]
#[command(about = "Electronic timetable and position tracking for rail routes", long_about = None)]
struct Cli {
    /// Also write log lines to stdout
    #[arg(long, global = true)]
    verbose: bool,

    /// Log at DEBUG level
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the merged timeline of a route bundle
    Timeline(TimelineArgs),

    /// Locate the train once for a clock time
    Position(PositionArgs),

    /// Run a live session, advancing the clock automatically
    Drive(DriveArgs),

    /// Manage ~/.ebula/config.ini
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        e.exit();
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Config { command } => commands::config::run(command),
        Commands::Timeline(args) => {
            let runner = CliRunner::new(cli.verbose, cli.debug)?;
            commands::timeline::run(&runner, args)
        }
        Commands::Position(args) => {
            let runner = CliRunner::new(cli.verbose, cli.debug)?;
            commands::position::run(&runner, args).await
        }
        Commands::Drive(args) => {
            let runner = CliRunner::new(cli.verbose, cli.debug)?;
            commands::drive::run(&runner, args).await
        }
    }
}
