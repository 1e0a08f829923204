//! Hexapawn CLI - train HER learners and play against them
//!
//! This CLI provides:
//! - Training runs between random and learning agents
//! - Interactive games against a learner at the console

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "hexapawn")]
#[command(version, about = "Hexapawn with a HER rote learner", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(long, short = 'v', action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train two agents against each other
    Train(hexapawn::cli::commands::train::TrainArgs),

    /// Play against the learner
    Play(hexapawn::cli::commands::play::PlayArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    hexapawn::cli::init_logging(cli.verbose);

    match cli.command {
        Commands::Train(args) => hexapawn::cli::commands::train::execute(args),
        Commands::Play(args) => hexapawn::cli::commands::play::execute(args),
    }
}
