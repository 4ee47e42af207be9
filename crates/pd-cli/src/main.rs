//! Command-line host for the Pipdream dice game.
//!
//! The binary is a thin shell: it parses arguments, owns stdin/stdout,
//! and dispatches predefined actions into the engine. All game logic
//! lives in `pd-engine`.

mod commands;

use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "pd",
    about = "Pipdream — a push-your-luck dice game",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play an interactive game in the terminal
    Play {
        /// RNG seed for a reproducible run
        #[arg(short, long, default_value = "42")]
        seed: u64,
    },

    /// Autoplay headless games and report how far a simple policy gets
    Simulate {
        /// RNG seed of the first game; later games increment it
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Number of games to play
        #[arg(short, long, default_value = "10")]
        games: u64,

        /// Print the summary as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Print the scoring and checkpoint rules
    Rules,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play { seed } => commands::play::run(seed),
        Commands::Simulate { seed, games, json } => commands::simulate::run(seed, games, json),
        Commands::Rules => commands::rules::run(),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
