//! Evaluator trait for board evaluation
//!
//! Defines a common interface for different evaluation strategies.

use crate::core::{Board, Color, Move};

/// Search values. Positive is good for the perspective player.
pub type Score = i32;

/// Certain win for the perspective player (terminal position).
pub const SCORE_WIN: Score = 1_000_000;
/// Certain loss for the perspective player (terminal position).
pub const SCORE_LOSS: Score = -SCORE_WIN;
/// Terminal draw.
pub const SCORE_DRAW: Score = 0;
/// Every heuristic value is clamped into `[-HEURISTIC_LIMIT, HEURISTIC_LIMIT]`,
/// so terminal sentinels always outrank it.
pub const HEURISTIC_LIMIT: Score = SCORE_WIN - 1;

/// Trait for evaluating board positions
pub trait Evaluator: Send + Sync {
    /// Evaluate the board from `perspective`'s point of view.
    ///
    /// `last` is the move that produced `board` and the colour that played
    /// it (`None` at a root that has not moved yet). Must be a pure function
    /// of `(board, perspective, last)`; the search caches its results under
    /// exactly that key.
    fn evaluate(&self, board: &Board, perspective: Color, last: Option<(Move, Color)>) -> Score;

    /// Get evaluator name for debugging
    fn name(&self) -> &str;
}

pub fn clamp_heuristic(score: Score) -> Score {
    score.clamp(-HEURISTIC_LIMIT, HEURISTIC_LIMIT)
}
