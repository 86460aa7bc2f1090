//! Noughts - tic-tac-toe in the terminal.

#![warn(missing_docs)]

use anyhow::Result;
use clap::Parser;
use noughts::{Cli, Command, Console, MatchArgs, simulate};
use std::io;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Logs go to stderr so they never interleave with the board.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play { setup } => run_play(&setup),
        Command::Simulate { setup, games, json } => run_simulate(&setup, games, json),
    }
}

/// Run interactive games on stdin/stdout until the player stops
#[instrument(skip_all)]
fn run_play(setup: &MatchArgs) -> Result<()> {
    let config = setup.resolve(None)?;
    info!(
        player_one = %config.player_one(),
        player_two = %config.player_two(),
        "Starting play"
    );

    let mut rng = config.rng();
    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout());
    console.session(*config.player_one(), *config.player_two(), &mut rng)?;
    Ok(())
}

/// Run a batch of computer games and print the tally
#[instrument(skip(setup))]
fn run_simulate(setup: &MatchArgs, games: Option<u32>, json: bool) -> Result<()> {
    let config = setup.resolve(games)?;
    let mut rng = config.rng();
    let tally = simulate(
        *config.player_one(),
        *config.player_two(),
        *config.games(),
        &mut rng,
    )?;

    if json {
        println!("{}", serde_json::to_string_pretty(&tally)?);
    } else {
        println!("{tally}");
    }
    Ok(())
}
