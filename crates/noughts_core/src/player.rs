//! Participants and their capabilities.

use super::board::{Board, Mark};
use super::engine::Engine;
use super::error::ConfigurationError;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::instrument;

/// Computer playing strength, 0 (weakest) to 4 (strongest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Strength(u8);

impl Strength {
    /// Strongest available tier.
    pub const MAX: Strength = Strength(4);

    /// Creates a strength, rejecting values outside 0-4.
    #[track_caller]
    pub fn new(level: u8) -> Result<Self, ConfigurationError> {
        if usize::from(level) < super::engine::MAX_DEPTHS.len() {
            Ok(Self(level))
        } else {
            Err(ConfigurationError::new(format!(
                "strength {level} is out of range (must be 0-4)"
            )))
        }
    }

    /// Returns the tier as a table index.
    pub fn level(self) -> usize {
        usize::from(self.0)
    }
}

impl TryFrom<u8> for Strength {
    type Error = ConfigurationError;

    #[track_caller]
    fn try_from(level: u8) -> Result<Self, Self::Error> {
        Self::new(level)
    }
}

impl From<Strength> for u8 {
    fn from(strength: Strength) -> Self {
        strength.0
    }
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether moves are supplied externally or computed by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PlayerKind {
    /// Moves come from the driver.
    Human,
    /// Moves come from the minimax engine.
    Computer {
        /// Search tier.
        strength: Strength,
    },
}

impl PlayerKind {
    /// Returns true for engine-driven players.
    pub fn is_computer(&self) -> bool {
        matches!(self, PlayerKind::Computer { .. })
    }
}

impl FromStr for PlayerKind {
    type Err = ConfigurationError;

    /// Parses `human` or `computer:<0-4>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        if s == "human" {
            return Ok(PlayerKind::Human);
        }
        let Some(level) = s.strip_prefix("computer:") else {
            return Err(ConfigurationError::new(format!(
                "unknown player kind '{s}' (expected 'human' or 'computer:<0-4>')"
            )));
        };
        let level = level.parse::<u8>().map_err(|e| {
            ConfigurationError::new(format!("invalid strength '{level}': {e}"))
        })?;
        Ok(PlayerKind::Computer {
            strength: Strength::new(level)?,
        })
    }
}

impl fmt::Display for PlayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerKind::Human => write!(f, "human"),
            PlayerKind::Computer { strength } => write!(f, "computer:{strength}"),
        }
    }
}

/// A participant bound to one mark for the lifetime of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    mark: Mark,
    kind: PlayerKind,
}

impl Player {
    /// Creates a player holding `mark`.
    pub fn new(mark: Mark, kind: PlayerKind) -> Self {
        Self { mark, kind }
    }

    /// Returns the player's mark.
    pub fn mark(&self) -> Mark {
        self.mark
    }

    /// Returns the player's capability tag.
    pub fn kind(&self) -> PlayerKind {
        self.kind
    }

    /// Computes a move for a computer player.
    ///
    /// Returns `None` for human players, who have no move generation, and
    /// for a full board.
    #[instrument(skip(self, board, rng), fields(mark = %self.mark, kind = %self.kind))]
    pub fn choose_move<R: Rng + ?Sized>(&self, board: &mut Board, rng: &mut R) -> Option<usize> {
        match self.kind {
            PlayerKind::Human => None,
            PlayerKind::Computer { strength } => {
                Engine::new(strength).choose_move(board, self.mark, rng)
            }
        }
    }
}
