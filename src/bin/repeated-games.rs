//! repeated-games CLI - Learning dynamics in repeated two-player matrix games
//!
//! This CLI provides a unified interface for:
//! - Running one matchup over repeated noisy trials
//! - Comparing SPaM, fictitious play and WoLF-PHC across the built-in games
//! - Inspecting a game's security values and cooperative target

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "repeated-games")]
#[command(version, about = "Learning dynamics in repeated matrix games", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run repeated trials of one matchup
    Run(Box<repeated_games::cli::commands::run::RunArgs>),

    /// Compare every learner against every opponent
    Scenarios(Box<repeated_games::cli::commands::scenarios::ScenariosArgs>),

    /// Describe a game
    Inspect(repeated_games::cli::commands::inspect::InspectArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    repeated_games::cli::init_logging(cli.verbose);

    match cli.command {
        Commands::Run(args) => repeated_games::cli::commands::run::execute(*args),
        Commands::Scenarios(args) => repeated_games::cli::commands::scenarios::execute(*args),
        Commands::Inspect(args) => repeated_games::cli::commands::inspect::execute(args),
    }
}
