//! Line-oriented console driver for interactive games.

use anyhow::Result;
use noughts_core::{Game, GameStatus, InvalidMove, Mark, MoveError, PlayerKind, Position, Turn};
use rand::Rng;
use std::io::{BufRead, Write};
use tracing::{debug, info, instrument};

/// Plays a game over any line reader and writer.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Creates a console over the given streams.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Consumes the console, returning the output stream.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Plays games back to back until the human declines another.
    ///
    /// Every game starts from an empty board with the same players and draws
    /// its tie-breaks from `rng`. Returns the status of each finished game.
    #[instrument(skip(self, rng))]
    pub fn session<G: Rng>(
        &mut self,
        player_one: PlayerKind,
        player_two: PlayerKind,
        rng: &mut G,
    ) -> Result<Vec<GameStatus>> {
        let mut results = Vec::new();
        loop {
            let mut game = Game::with_rng(player_one, player_two, &mut *rng);
            let Some(status) = self.play(&mut game)? else {
                break;
            };
            results.push(status);
            if !self.confirm("Play again? [y/N]: ")? {
                break;
            }
            writeln!(self.output)?;
        }
        info!(games = results.len(), "Session finished");
        Ok(results)
    }

    /// Runs the game to completion.
    ///
    /// Quitting resigns the game for the player to move. Returns the final
    /// status, or `None` if input ran out mid-game.
    #[instrument(skip_all)]
    pub fn play<G: Rng>(&mut self, game: &mut Game<G>) -> Result<Option<GameStatus>> {
        for mark in [Mark::O, Mark::X] {
            writeln!(self.output, "{mark}: {}", game.player(mark).kind())?;
        }
        writeln!(self.output, "\n{}\n", game.board())?;

        while !game.is_over() {
            match game.request_move()? {
                Turn::Played(result) => {
                    let position = Position::from_index(result.cell())
                        .map(|p| p.label())
                        .unwrap_or("?");
                    writeln!(self.output, "{} plays {}", result.mark(), position)?;
                    writeln!(self.output, "\n{}\n", game.board())?;
                }
                Turn::AwaitingInput(mark) => {
                    if !self.human_turn(game, mark)? {
                        info!("Input closed mid-game");
                        writeln!(self.output, "Game abandoned.")?;
                        return Ok(None);
                    }
                }
            }
        }

        let status = game.status();
        match status {
            GameStatus::Won(mark) => writeln!(self.output, "{mark} wins!")?,
            GameStatus::Drawn => writeln!(self.output, "It's a draw!")?,
            GameStatus::InProgress { .. } => {}
        }
        Ok(Some(status))
    }

    /// Prompts until a legal move is played or the player resigns.
    ///
    /// Returns false at end of input.
    fn human_turn<G: Rng>(&mut self, game: &mut Game<G>, mark: Mark) -> Result<bool> {
        loop {
            write!(self.output, "{mark} to move (1-9 or a cell name, q to resign): ")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(false);
            }
            let line = line.trim();
            if line.eq_ignore_ascii_case("q") || line.eq_ignore_ascii_case("quit") {
                game.resign()?;
                writeln!(self.output, "{mark} resigns.")?;
                return Ok(true);
            }

            let Some(position) = Position::parse(line) else {
                writeln!(
                    self.output,
                    "'{line}' is not a cell; enter 1-9 or a name like 'center'."
                )?;
                continue;
            };

            match game.submit_move(position.to_index()) {
                Ok(result) => {
                    debug!(cell = result.cell(), "Human move accepted");
                    writeln!(self.output, "\n{}\n", game.board())?;
                    return Ok(true);
                }
                Err(MoveError::InvalidMove(InvalidMove::Occupied(_))) => {
                    writeln!(self.output, "{position} is already taken. Try again.")?;
                }
                Err(e @ MoveError::InvalidMove(_)) => {
                    writeln!(self.output, "{e}. Try again.")?;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Asks a yes/no question; anything but `y` or `yes` is a no.
    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(false);
        }
        let answer = line.trim();
        Ok(matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes"))
    }
}
