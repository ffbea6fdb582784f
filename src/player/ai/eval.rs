//! # Evaluation Module
//!
//! This module implements the static evaluation functions used at the search
//! frontier. Every function scores a `Board` from the point of view of a
//! given player (positive = good for that player).
//!
//! ## Scoring Strategy
//! The score is a linear combination of:
//! 1. **Material**: own discs minus opponent discs.
//! 2. **Mobility**: legal moves available to each side on this board.
//! 3. **Stability**: discs that (approximately) can no longer be flipped,
//!    see [`super::stability`].
//! 4. **Pattern**: discs in the corner 2x2 blocks and on the border.
//! 5. **Frontier**: own discs touching an empty cell, a penalty.
//! 6. **Last move**: a bonus for taking a corner and a penalty for taking an
//!    X-square, signed by who made the move that reached the board.
//!
//! The weights come from an [`EvaluationConfig`] and depend on the game phase,
//! which is derived from the number of discs on the board.

use super::config::{ComponentWeights, EvaluationConfig};
use super::evaluator::{Evaluator, Score, HEURISTIC_LIMIT};
use super::stability;
use crate::core::{Board, Color, Move, Position};
use crate::logic::{legal_moves, DIRECTIONS};

/// Own discs minus opponent discs.
pub fn material(board: &Board, perspective: Color) -> i32 {
    board.count(perspective) as i32 - board.count(perspective.opponent()) as i32
}

/// `(own, opponent)` legal-move counts, each side considered to move on the
/// same board.
pub fn mobility(board: &Board, perspective: Color) -> (i32, i32) {
    (
        legal_moves(board, perspective).len() as i32,
        legal_moves(board, perspective.opponent()).len() as i32,
    )
}

/// Cells of the 2x2 block at each corner.
fn corner_block(board: &Board) -> Vec<Position> {
    let mut cells = Vec::with_capacity(16);
    for corner in board.corners() {
        let dr = if corner.row == 0 { 1 } else { -1 };
        let dc = if corner.col == 0 { 1 } else { -1 };
        for (r, c) in [(0, 0), (0, dc), (dr, 0), (dr, dc)] {
            if let Some(p) = corner.offset(r, c, board.rows(), board.cols()) {
                cells.push(p);
            }
        }
    }
    cells
}

/// Whether `pos` is diagonally adjacent to a corner.
pub fn is_x_square(board: &Board, pos: Position) -> bool {
    board.corners().into_iter().any(|corner| {
        let dr = if corner.row == 0 { 1 } else { -1 };
        let dc = if corner.col == 0 { 1 } else { -1 };
        corner.offset(dr, dc, board.rows(), board.cols()) == Some(pos)
    })
}

/// `(corner, edge)` occupancy differences, own minus opponent.
///
/// Both counts are signed so the term is zero-sum between the two sides.
/// A plain own-disc count would reward any position with more discs near
/// the corners, whoever else sits there.
pub fn pattern(board: &Board, perspective: Color) -> (i32, i32) {
    let opponent = perspective.opponent();
    let signed = |pos: Position| match board.get(pos) {
        c if c == perspective => 1,
        c if c == opponent => -1,
        _ => 0,
    };

    let corner = corner_block(board).into_iter().map(signed).sum();
    let edge = board
        .positions()
        .filter(|&p| board.is_edge(p))
        .map(signed)
        .sum();
    (corner, edge)
}

/// Own discs with at least one empty neighbour (8 directions).
pub fn frontier(board: &Board, perspective: Color) -> i32 {
    board
        .positions()
        .filter(|&p| board.get(p) == perspective)
        .filter(|&p| {
            DIRECTIONS.iter().any(|&(dr, dc)| {
                p.offset(dr, dc, board.rows(), board.cols())
                    .map_or(false, |n| board.get(n) == Color::Empty)
            })
        })
        .count() as i32
}

/// Corner / X-square value of the move that reached `board`, positive when
/// it favours `perspective`.
pub fn last_move_value(
    board: &Board,
    perspective: Color,
    last: Option<(Move, Color)>,
    weights: &ComponentWeights,
) -> i64 {
    let Some((mv, mover)) = last else {
        return 0;
    };
    let sign: i64 = if mover == perspective { 1 } else { -1 };
    if board.is_corner(mv) {
        sign * weights.corner_move as i64
    } else if is_x_square(board, mv) {
        -sign * weights.x_square_move as i64
    } else {
        0
    }
}

/// Combines the components with `weights`. Components whose weights are all
/// zero are skipped.
pub fn weighted_score(
    board: &Board,
    perspective: Color,
    last: Option<(Move, Color)>,
    weights: &ComponentWeights,
) -> Score {
    // 大きな重みでも溢れないよう i64 で合算する
    let term = |w: i32, v: i32| w as i64 * v as i64;
    let mut score: i64 = 0;

    if weights.material != 0 {
        score += term(weights.material, material(board, perspective));
    }

    if weights.own_mobility != 0 || weights.opponent_mobility != 0 {
        let (own, other) = mobility(board, perspective);
        score += term(weights.own_mobility, own) - term(weights.opponent_mobility, other);
    }

    if weights.own_stability != 0 || weights.opponent_stability != 0 {
        let (own, other) = stability::count_stable(board, perspective);
        score += term(weights.own_stability, own) - term(weights.opponent_stability, other);
    }

    if weights.corner != 0 || weights.edge != 0 {
        let (corner, edge) = pattern(board, perspective);
        score += term(weights.corner, corner) + term(weights.edge, edge);
    }

    if weights.frontier != 0 {
        score -= term(weights.frontier, frontier(board, perspective));
    }

    if weights.corner_move != 0 || weights.x_square_move != 0 {
        score += last_move_value(board, perspective, last, weights);
    }

    score.clamp(-(HEURISTIC_LIMIT as i64), HEURISTIC_LIMIT as i64) as Score
}

/// Phase-aware linear evaluator. All the stock evaluators are instances of
/// this one with different [`EvaluationConfig`]s.
#[derive(Debug, Clone)]
pub struct WeightedEvaluator {
    name: String,
    config: EvaluationConfig,
}

impl WeightedEvaluator {
    pub fn new(name: &str, config: EvaluationConfig) -> Self {
        WeightedEvaluator {
            name: name.to_string(),
            config,
        }
    }

    pub fn material() -> Self {
        Self::new("material", EvaluationConfig::material())
    }

    pub fn config(&self) -> &EvaluationConfig {
        &self.config
    }
}

impl Evaluator for WeightedEvaluator {
    fn evaluate(&self, board: &Board, perspective: Color, last: Option<(Move, Color)>) -> Score {
        let weights = self.config.weights_for(board.disc_count());
        weighted_score(board, perspective, last, weights)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
