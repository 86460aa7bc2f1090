//! Batch computer-versus-computer play.

use anyhow::Result;
use noughts_core::{ConfigurationError, Game, GameStatus, Mark, PlayerKind};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{info, instrument};

/// Results of a batch of games.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    /// Games played.
    pub games: u32,
    /// Games won by O (player one).
    pub o_wins: u32,
    /// Games won by X (player two).
    pub x_wins: u32,
    /// Drawn games.
    pub draws: u32,
}

impl Tally {
    fn record(&mut self, status: GameStatus) {
        self.games += 1;
        match status {
            GameStatus::Won(Mark::O) => self.o_wins += 1,
            GameStatus::Won(Mark::X) => self.x_wins += 1,
            GameStatus::Drawn => self.draws += 1,
            GameStatus::InProgress { .. } => {}
        }
    }
}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} games: O wins {}, X wins {}, draws {}",
            self.games, self.o_wins, self.x_wins, self.draws
        )
    }
}

/// Plays `games` games between two computer players.
///
/// # Errors
///
/// Returns a `ConfigurationError` if either player is human.
#[instrument(skip(rng))]
pub fn simulate<R: Rng>(
    player_one: PlayerKind,
    player_two: PlayerKind,
    games: u32,
    rng: &mut R,
) -> Result<Tally> {
    if !player_one.is_computer() || !player_two.is_computer() {
        return Err(ConfigurationError::new("simulation needs two computer players").into());
    }

    let mut tally = Tally::default();
    for _ in 0..games {
        let mut game = Game::with_rng(player_one, player_two, &mut *rng);
        while !game.is_over() {
            game.request_move()?;
        }
        tally.record(game.status());
    }

    info!(%tally, "Simulation complete");
    Ok(tally)
}
