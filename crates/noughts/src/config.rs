//! Match configuration loaded from TOML.

use derive_getters::Getters;
use noughts_core::{ConfigurationError, PlayerKind, Strength};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Who plays, and how the random source is seeded.
///
/// ```toml
/// games = 50
/// seed = 7
///
/// [player_one]
/// kind = "computer"
/// strength = 3
///
/// [player_two]
/// kind = "human"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Player one (O, moves first).
    #[serde(default = "default_player_one")]
    player_one: PlayerKind,

    /// Player two (X).
    #[serde(default = "default_player_two")]
    player_two: PlayerKind,

    /// Seed for computer tie-breaks; entropy when absent.
    #[serde(default)]
    seed: Option<u64>,

    /// Number of games for batch simulation.
    #[serde(default = "default_games")]
    games: u32,
}

#[instrument]
fn default_player_one() -> PlayerKind {
    PlayerKind::Human
}

#[instrument]
fn default_player_two() -> PlayerKind {
    PlayerKind::Computer {
        strength: Strength::MAX,
    }
}

#[instrument]
fn default_games() -> u32 {
    100
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            player_one: default_player_one(),
            player_two: default_player_two(),
            seed: None,
            games: default_games(),
        }
    }
}

impl MatchConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigurationError> {
        debug!("Loading match config from file");
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            ConfigurationError::new(format!("Failed to read config file: {}", e))
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            ConfigurationError::new(format!("Failed to parse config: {}", e))
        })?;

        info!(
            player_one = %config.player_one,
            player_two = %config.player_two,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Replaces any field for which an override is given.
    pub fn with_overrides(
        mut self,
        player_one: Option<PlayerKind>,
        player_two: Option<PlayerKind>,
        seed: Option<u64>,
        games: Option<u32>,
    ) -> Self {
        if let Some(kind) = player_one {
            self.player_one = kind;
        }
        if let Some(kind) = player_two {
            self.player_two = kind;
        }
        if seed.is_some() {
            self.seed = seed;
        }
        if let Some(games) = games {
            self.games = games;
        }
        self
    }

    /// Builds the random source for a match.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
