//! Minimax move selection for computer players.
//!
//! Each strength tier fixes a search depth and a heuristic threshold. Within
//! the depth, positions are scored by exhaustive minimax with wins and losses
//! scaled down the deeper they occur, so quick wins and slow losses are
//! preferred. At the cutoff a static line-count heuristic takes over; the
//! threshold decides which line patterns it recognises.
//!
//! The engine borrows the caller's board and plays provisional marks onto it.
//! Every placement is retracted right after the recursive call that explores
//! it, so the board the caller sees afterwards is exactly the one passed in.

use super::board::{Board, Cell, LINES, Mark};
use super::player::Strength;
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, instrument};

/// Search depth cutoff per strength tier.
pub const MAX_DEPTHS: [u32; 5] = [0, 2, 4, 6, 10];

/// Heuristic sensitivity per strength tier; lower recognises more patterns.
pub const SCORE_THRESHOLDS: [i32; 5] = [101, 100, 6, 3, 0];

/// Raw score of a completed line for the searching side.
pub const WIN_SCORE: f64 = 100.0;

/// Score given to every empty cell when the tier does not search.
pub const UNSEARCHED_SCORE: f64 = -101.0;

/// Score given to occupied cells; never selected.
pub const OCCUPIED_SCORE: f64 = -1000.0;

const DEPTH_PENALTY: f64 = 0.05;

/// Move selector for one strength tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Engine {
    strength: Strength,
}

impl Engine {
    /// Creates an engine for the given tier.
    pub fn new(strength: Strength) -> Self {
        Self { strength }
    }

    /// Returns the tier this engine plays at.
    pub fn strength(&self) -> Strength {
        self.strength
    }

    /// Returns the search depth cutoff.
    pub fn max_depth(&self) -> u32 {
        MAX_DEPTHS[self.strength.level()]
    }

    /// Returns the heuristic threshold.
    pub fn threshold(&self) -> i32 {
        SCORE_THRESHOLDS[self.strength.level()]
    }

    /// Picks a cell for `mark`, uniformly at random among the best-scoring
    /// empty cells.
    ///
    /// Returns `None` only when the board is full.
    #[instrument(skip(self, board, rng), fields(strength = %self.strength))]
    pub fn choose_move<R: Rng + ?Sized>(
        &self,
        board: &mut Board,
        mark: Mark,
        rng: &mut R,
    ) -> Option<usize> {
        let candidates = self.best_moves(board, mark);
        let chosen = candidates.choose(rng).copied();
        debug!(?candidates, ?chosen, "Engine chose move");
        chosen
    }

    /// Returns every empty cell tied for the best score, in index order.
    pub fn best_moves(&self, board: &mut Board, mark: Mark) -> Vec<usize> {
        let scores = self.score_moves(board, mark);
        let best = scores.iter().copied().fold(UNSEARCHED_SCORE, f64::max);
        (0..Board::CELLS)
            .filter(|&i| board.is_empty(i) && scores[i] == best)
            .collect()
    }

    /// Scores every cell from `mark`'s point of view.
    ///
    /// Occupied cells get [`OCCUPIED_SCORE`]; when the tier does not search,
    /// empty cells get [`UNSEARCHED_SCORE`].
    pub fn score_moves(&self, board: &mut Board, mark: Mark) -> [f64; 9] {
        let mut scores = [OCCUPIED_SCORE; 9];
        for (i, score) in scores.iter_mut().enumerate() {
            if !board.is_empty(i) {
                continue;
            }
            // Strength 0 plays at random among empty cells: no search at all.
            if self.max_depth() == 0 {
                *score = UNSEARCHED_SCORE;
                continue;
            }
            board.set_mark_at(i, Cell::Marked(mark));
            *score = self.minimax(board, mark, mark.opponent(), false, 1);
            board.set_mark_at(i, Cell::Empty);
        }
        scores
    }

    /// Scores the position with `to_move` about to play, from `me`'s side.
    fn minimax(
        &self,
        board: &mut Board,
        me: Mark,
        to_move: Mark,
        is_max: bool,
        depth: u32,
    ) -> f64 {
        let score = adjust_for_depth(terminal_score(board, me), depth);
        if score != 0.0 || board.is_full() {
            return score;
        }

        if depth >= self.max_depth() {
            return eval_non_terminal(board, to_move, is_max, self.threshold());
        }

        let mut best = if is_max { -WIN_SCORE - 1.0 } else { WIN_SCORE + 1.0 };
        for i in 0..Board::CELLS {
            if !board.is_empty(i) {
                continue;
            }
            board.set_mark_at(i, Cell::Marked(to_move));
            let score = self.minimax(board, me, to_move.opponent(), !is_max, depth + 1);
            board.set_mark_at(i, Cell::Empty);
            best = if is_max { best.max(score) } else { best.min(score) };
        }
        best
    }
}

/// +100 if `me` holds a line, -100 if the opponent does, 0 otherwise.
fn terminal_score(board: &Board, me: Mark) -> f64 {
    if board.has_win(me) {
        WIN_SCORE
    } else if board.has_win(me.opponent()) {
        -WIN_SCORE
    } else {
        0.0
    }
}

fn adjust_for_depth(score: f64, depth: u32) -> f64 {
    score * (1.0 - DEPTH_PENALTY * f64::from(depth))
}

/// Static line-count evaluation of a position nobody has won yet.
///
/// Open lines count for `mark` (positive) or against it (negative), with the
/// sign flipped when `mark` is the minimizing side. Contested lines always
/// cost one point. Patterns above the threshold are ignored.
fn eval_non_terminal(board: &Board, mark: Mark, is_max: bool, threshold: i32) -> f64 {
    let sign = if is_max { 1 } else { -1 };
    let mut score = 0;
    for line in 0..LINES.len() {
        let own = board.count_marks(mark, line);
        let opp = board.count_marks(mark.opponent(), line);
        score += match (own, opp) {
            (0, 1) if threshold <= 3 => -3 * sign,
            (0, 2) if threshold <= 6 => -6 * sign,
            (1, 0) if threshold <= 3 => 3 * sign,
            (2, 0) if threshold <= 6 => 6 * sign,
            (1, 1) | (1, 2) | (2, 1) if threshold <= 1 => -1,
            _ => 0,
        };
    }
    f64::from(score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn engine(level: u8) -> Engine {
        Engine::new(Strength::new(level).unwrap())
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn board_from(layout: &str) -> Board {
        let mut board = Board::new();
        for (i, ch) in layout.chars().enumerate() {
            match ch {
                'O' => board.set_mark_at(i, Cell::Marked(Mark::O)),
                'X' => board.set_mark_at(i, Cell::Marked(Mark::X)),
                _ => {}
            }
        }
        board
    }

    #[test]
    fn test_depth_adjustment_prefers_fast_wins() {
        assert!(approx(adjust_for_depth(100.0, 1), 95.0));
        assert!(approx(adjust_for_depth(-100.0, 2), -90.0));
        assert_eq!(adjust_for_depth(0.0, 7), 0.0);
        assert!(adjust_for_depth(100.0, 1) > adjust_for_depth(100.0, 3));
        assert!(adjust_for_depth(-100.0, 4) > adjust_for_depth(-100.0, 2));
    }

    #[test]
    fn test_terminal_score_perspective() {
        let board = board_from("OOO......");
        assert_eq!(terminal_score(&board, Mark::O), WIN_SCORE);
        assert_eq!(terminal_score(&board, Mark::X), -WIN_SCORE);
        assert_eq!(terminal_score(&Board::new(), Mark::O), 0.0);
    }

    #[test]
    fn test_heuristic_single_marks() {
        // O alone in the top-left corner: row 0, column 0 and the main diagonal.
        let board = board_from("O........");
        assert_eq!(eval_non_terminal(&board, Mark::O, true, 3), 9.0);
        assert_eq!(eval_non_terminal(&board, Mark::O, false, 3), -9.0);
        assert_eq!(eval_non_terminal(&board, Mark::X, true, 3), -9.0);
        // Singles are ignored above threshold 3.
        assert_eq!(eval_non_terminal(&board, Mark::O, true, 6), 0.0);
    }

    #[test]
    fn test_heuristic_open_pairs() {
        let board = board_from("OO.......");
        // Row 0 holds an open pair; only pairs count at threshold 6.
        assert_eq!(eval_non_terminal(&board, Mark::O, true, 6), 6.0);
        assert_eq!(eval_non_terminal(&board, Mark::X, true, 6), -6.0);
        // Add singles on columns 0 and 1 and on the 0-4-8 diagonal.
        assert_eq!(eval_non_terminal(&board, Mark::O, true, 3), 6.0 + 3.0 * 3.0);
        assert_eq!(eval_non_terminal(&board, Mark::O, true, 100), 0.0);
    }

    #[test]
    fn test_heuristic_contested_lines() {
        // O at 0, X at 1: row 0 contested; column 0 and diagonal 0-4-8 are O
        // singles; column 1 is an X single.
        let board = board_from("OX.......");
        assert_eq!(eval_non_terminal(&board, Mark::O, true, 3), 3.0);
        assert_eq!(eval_non_terminal(&board, Mark::O, true, 0), 3.0 - 1.0);
        // Contested penalty does not flip with the side.
        assert_eq!(eval_non_terminal(&board, Mark::O, false, 0), -3.0 - 1.0);
    }

    #[test]
    fn test_heuristic_contested_one_against_two() {
        // Row 0 holds one O and two Xs; every other line is open or empty.
        let board = board_from("OXX......");
        for is_max in [true, false] {
            assert_eq!(eval_non_terminal(&board, Mark::O, is_max, 1), -1.0);
        }
        // Singles: O on column 0 and 0-4-8; X on columns 1, 2 and 2-4-6.
        assert_eq!(
            eval_non_terminal(&board, Mark::O, true, 3),
            3.0 * 2.0 - 3.0 * 3.0
        );
        assert_eq!(eval_non_terminal(&board, Mark::O, true, 0), -3.0 - 1.0);
    }

    #[test]
    fn test_heuristic_contested_two_against_one() {
        // Row 0 holds two Os and one X.
        let board = board_from("OOX......");
        for is_max in [true, false] {
            assert_eq!(eval_non_terminal(&board, Mark::O, is_max, 1), -1.0);
        }
        // Singles: O on columns 0, 1 and 0-4-8; X on column 2 and 2-4-6.
        assert_eq!(
            eval_non_terminal(&board, Mark::O, true, 3),
            3.0 * 3.0 - 3.0 * 2.0
        );
        assert_eq!(eval_non_terminal(&board, Mark::O, true, 0), 3.0 - 1.0);
    }

    #[test]
    fn test_strength_zero_skips_search() {
        let mut board = board_from("OO.XX....");
        let scores = engine(0).score_moves(&mut board, Mark::O);
        for (i, score) in scores.iter().enumerate() {
            let expected = if board.is_empty(i) { UNSEARCHED_SCORE } else { OCCUPIED_SCORE };
            assert_eq!(*score, expected);
        }
        assert_eq!(
            engine(0).best_moves(&mut board, Mark::O),
            vec![2, 5, 6, 7, 8]
        );
    }

    #[test]
    fn test_takes_immediate_win() {
        for level in 1..=4 {
            let mut board = board_from("OO.XX....");
            assert_eq!(engine(level).best_moves(&mut board, Mark::O), vec![2], "strength {level}");
        }
    }

    #[test]
    fn test_immediate_win_scores_ninety_five() {
        let mut board = board_from("OO.XX....");
        let scores = engine(2).score_moves(&mut board, Mark::O);
        assert!(approx(scores[2], 95.0));
        assert_eq!(scores[0], OCCUPIED_SCORE);
    }

    #[test]
    fn test_blocks_immediate_loss() {
        for level in 1..=4 {
            let mut board = board_from("XX.O.....");
            assert_eq!(engine(level).best_moves(&mut board, Mark::O), vec![2], "strength {level}");
        }
    }

    #[test]
    fn test_choose_move_restores_board() {
        let mut rng = StdRng::seed_from_u64(11);
        for level in 0..=4 {
            let mut board = board_from("O...X...O");
            let before = board.snapshot();
            let cell = engine(level).choose_move(&mut board, Mark::X, &mut rng);
            assert_eq!(board.snapshot(), before);
            assert!(cell.is_some_and(|i| before[i] == Cell::Empty));
        }
    }

    #[test]
    fn test_full_board_has_no_move() {
        let mut board = board_from("OXOOXXXOO");
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(engine(4).choose_move(&mut board, Mark::X, &mut rng), None);
    }
}
