//! Turn-based game state machine.

use super::board::{Board, Cell, Mark};
use super::error::{InvalidMove, MoveError};
use super::player::{Player, PlayerKind};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Current status of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Game is ongoing; `next` is the mark to move.
    InProgress {
        /// Mark of the player to move.
        next: Mark,
    },
    /// Game ended in a win.
    Won(Mark),
    /// Game ended with a full board and no winner.
    Drawn,
}

impl GameStatus {
    /// Returns true once the game has been won or drawn.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameStatus::InProgress { .. })
    }
}

/// Outcome of one applied move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveResult {
    board: [Cell; 9],
    status: GameStatus,
    cell: usize,
    mark: Mark,
}

impl MoveResult {
    /// Board after the move.
    pub fn board(&self) -> &[Cell; 9] {
        &self.board
    }

    /// Status after the move.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Cell the mark was placed in, or the last cell played for a resignation.
    pub fn cell(&self) -> usize {
        self.cell
    }

    /// Mark that moved, or that resigned.
    pub fn mark(&self) -> Mark {
        self.mark
    }
}

/// What happened when the driver asked for the next move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Turn {
    /// A human holds the move; submit it with [`Game::submit_move`].
    AwaitingInput(Mark),
    /// A computer moved within the call.
    Played(MoveResult),
}

/// Tic-tac-toe game engine.
///
/// Player one holds `O` and moves first. The random source only breaks
/// ties between equally scored computer moves.
#[derive(Debug, Clone)]
pub struct Game<R = StdRng> {
    board: Board,
    players: [Player; 2],
    to_move: Mark,
    status: GameStatus,
    history: Vec<usize>,
    rng: R,
}

impl Game<StdRng> {
    /// Creates a new game with an entropy-seeded random source.
    #[instrument]
    pub fn new(player_one: PlayerKind, player_two: PlayerKind) -> Self {
        Self::with_rng(player_one, player_two, StdRng::from_entropy())
    }
}

impl<R: Rng> Game<R> {
    /// Creates a new game using `rng` for computer tie-breaks.
    #[instrument(skip(rng))]
    pub fn with_rng(player_one: PlayerKind, player_two: PlayerKind, rng: R) -> Self {
        info!("Starting new game");
        Self {
            board: Board::new(),
            players: [
                Player::new(Mark::O, player_one),
                Player::new(Mark::X, player_two),
            ],
            to_move: Mark::O,
            status: GameStatus::InProgress { next: Mark::O },
            history: Vec::new(),
            rng,
        }
    }

    /// Returns the mark of whoever is to move.
    pub fn current_mark(&self) -> Mark {
        self.to_move
    }

    /// Returns the player holding `mark`.
    pub fn player(&self, mark: Mark) -> &Player {
        &self.players[slot(mark)]
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the game status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Returns true once the game has been won or drawn.
    pub fn is_over(&self) -> bool {
        self.status.is_terminal()
    }

    /// Returns the cells played so far, in order.
    pub fn history(&self) -> &[usize] {
        &self.history
    }

    /// Checks that `index` is in range and names an empty cell.
    pub fn is_valid_move<I: TryInto<usize>>(&self, index: I) -> bool {
        cell_index(index).is_some_and(|i| self.board.is_empty(i))
    }

    /// Asks whoever holds the move to play.
    ///
    /// Computer players move within the call. Human players leave the game
    /// untouched and the driver must follow up with [`Game::submit_move`].
    ///
    /// # Errors
    ///
    /// Returns `MoveError::GameOver` if the game has ended.
    #[instrument(skip(self), fields(mark = %self.to_move))]
    pub fn request_move(&mut self) -> Result<Turn, MoveError> {
        if self.is_over() {
            return Err(MoveError::GameOver);
        }

        let player = *self.player(self.to_move);
        if !player.kind().is_computer() {
            debug!("Awaiting human input");
            return Ok(Turn::AwaitingInput(self.to_move));
        }

        // An in-progress game always has an empty cell.
        let cell = player
            .choose_move(&mut self.board, &mut self.rng)
            .ok_or(MoveError::GameOver)?;
        Ok(Turn::Played(self.apply(cell)))
    }

    /// Plays `index` for the player to move.
    ///
    /// # Errors
    ///
    /// - `MoveError::InvalidMove` if the index is outside 0-8 (checked first,
    ///   whatever the game state) or the cell is occupied.
    /// - `MoveError::GameOver` if the game has ended.
    #[instrument(skip_all, fields(mark = %self.to_move))]
    pub fn submit_move<I: TryInto<usize>>(&mut self, index: I) -> Result<MoveResult, MoveError> {
        let Some(cell) = cell_index(index) else {
            warn!("Rejected out-of-range cell");
            return Err(MoveError::InvalidMove(InvalidMove::OutOfRange));
        };

        if self.is_over() {
            warn!(cell, "Rejected move after game end");
            return Err(MoveError::GameOver);
        }

        if !self.board.is_empty(cell) {
            warn!(cell, "Rejected occupied cell");
            return Err(MoveError::InvalidMove(InvalidMove::Occupied(cell)));
        }

        Ok(self.apply(cell))
    }

    /// Concedes the game for the player to move; the opponent wins.
    ///
    /// The returned result carries the conceding mark and the last cell
    /// played (0 when no move has been made). The board is not changed.
    ///
    /// # Errors
    ///
    /// Returns `MoveError::GameOver` if the game has ended.
    #[instrument(skip(self), fields(mark = %self.to_move))]
    pub fn resign(&mut self) -> Result<MoveResult, MoveError> {
        if self.is_over() {
            warn!("Rejected resignation after game end");
            return Err(MoveError::GameOver);
        }

        let mark = self.to_move;
        self.status = GameStatus::Won(mark.opponent());
        info!(status = ?self.status, moves = self.history.len(), "Player resigned");

        Ok(MoveResult {
            board: self.board.snapshot(),
            status: self.status,
            cell: self.history.last().copied().unwrap_or(0),
            mark,
        })
    }

    /// Places the mark, then checks win before draw.
    fn apply(&mut self, cell: usize) -> MoveResult {
        let mark = self.to_move;
        self.board.set_mark_at(cell, Cell::Marked(mark));
        self.history.push(cell);

        self.status = if self.board.has_win(mark) {
            GameStatus::Won(mark)
        } else if self.board.is_full() {
            GameStatus::Drawn
        } else {
            self.to_move = mark.opponent();
            GameStatus::InProgress { next: self.to_move }
        };

        debug!(cell, %mark, status = ?self.status, "Move applied");
        if self.is_over() {
            info!(status = ?self.status, moves = self.history.len(), "Game finished");
        }

        MoveResult {
            board: self.board.snapshot(),
            status: self.status,
            cell,
            mark,
        }
    }
}

fn slot(mark: Mark) -> usize {
    match mark {
        Mark::O => 0,
        Mark::X => 1,
    }
}

fn cell_index<I: TryInto<usize>>(index: I) -> Option<usize> {
    index.try_into().ok().filter(|&i| i < Board::CELLS)
}
