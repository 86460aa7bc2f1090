//! Command-line interface for noughts.

use crate::config::MatchConfig;
use clap::{Args, Parser, Subcommand};
use noughts_core::{ConfigurationError, PlayerKind};
use std::path::PathBuf;

/// Noughts - tic-tac-toe against humans or minimax opponents
#[derive(Parser, Debug)]
#[command(name = "noughts")]
#[command(about = "Tic-tac-toe with a five-level minimax opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play an interactive game in the terminal
    Play {
        /// Match setup
        #[command(flatten)]
        setup: MatchArgs,
    },

    /// Play computer against computer and report the tally
    Simulate {
        /// Match setup
        #[command(flatten)]
        setup: MatchArgs,

        /// Number of games to play
        #[arg(short, long)]
        games: Option<u32>,

        /// Print the tally as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Options shared by every command that sets up a match.
#[derive(Args, Debug, Clone, Default)]
pub struct MatchArgs {
    /// Path to a TOML match config
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Player one, O, moves first (`human` or `computer:<0-4>`)
    #[arg(long)]
    pub one: Option<PlayerKind>,

    /// Player two, X (`human` or `computer:<0-4>`)
    #[arg(long)]
    pub two: Option<PlayerKind>,

    /// Seed for computer tie-breaks
    #[arg(long)]
    pub seed: Option<u64>,
}

impl MatchArgs {
    /// Loads the config file, if any, and applies command-line overrides.
    pub fn resolve(&self, games: Option<u32>) -> Result<MatchConfig, ConfigurationError> {
        let base = match &self.config {
            Some(path) => MatchConfig::from_file(path)?,
            None => MatchConfig::default(),
        };
        Ok(base.with_overrides(self.one, self.two, self.seed, games))
    }
}
