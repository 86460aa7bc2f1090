//! Noughts core - tic-tac-toe rules and a minimax opponent
//!
//! This crate holds the game state machine and the AI decision engine.
//! It performs no I/O; a driver supplies player selections, requests moves
//! and renders the results.
//!
//! # Architecture
//!
//! - **Board**: 9-cell grid with line-based win/draw detection
//! - **Player**: human or computer participant owning a mark
//! - **Engine**: depth-limited minimax with strength-tiered heuristics
//! - **Game**: turn order, move validation and outcomes
//!
//! # Example
//!
//! ```
//! use noughts_core::{Game, GameStatus, PlayerKind, Strength, Turn};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut game = Game::with_rng(
//!     PlayerKind::Human,
//!     PlayerKind::Computer { strength: Strength::new(4)? },
//!     StdRng::seed_from_u64(7),
//! );
//!
//! // Player one is human, so the game waits for input.
//! assert!(matches!(game.request_move()?, Turn::AwaitingInput(_)));
//! game.submit_move(4)?;
//!
//! // The computer replies within the same call.
//! match game.request_move()? {
//!     Turn::Played(result) => assert!(matches!(result.status(), GameStatus::InProgress { .. })),
//!     Turn::AwaitingInput(_) => unreachable!("computer moves are played immediately"),
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
mod engine;
mod error;
mod game;
mod player;
mod position;

pub use board::{Board, Cell, LINES, Mark};
pub use engine::{
    Engine, MAX_DEPTHS, OCCUPIED_SCORE, SCORE_THRESHOLDS, UNSEARCHED_SCORE, WIN_SCORE,
};
pub use error::{ConfigurationError, InvalidMove, MoveError};
pub use game::{Game, GameStatus, MoveResult, Turn};
pub use player::{Player, PlayerKind, Strength};
pub use position::Position;
