use super::alpha_beta::{terminal_score, SearchResult, Searcher};
use super::evaluator::{clamp_heuristic, Evaluator, Score, SCORE_LOSS, SCORE_WIN};
use crate::core::{Color, Move};
use crate::game::GameState;
use std::cell::Cell;

/// Plain minimax: the same tree, frontier and tie-break as
/// [`super::alpha_beta::AlphaBetaSearch`], without pruning or caching.
///
/// Every node is expanded, so it is only practical for small depths. It
/// serves as the reference the pruned search is checked against.
pub struct MinimaxSearch {
    evaluator: Box<dyn Evaluator>,
    nodes_evaluated: Cell<usize>,
}

impl MinimaxSearch {
    pub fn new(evaluator: Box<dyn Evaluator>) -> Self {
        Self {
            evaluator,
            nodes_evaluated: Cell::new(0),
        }
    }

    fn minimax<S: GameState>(
        &self,
        state: S,
        depth: usize,
        perspective: Color,
        depth_limit: usize,
        last: Option<(Move, Color)>,
        root: bool,
    ) -> (Score, Option<Move>) {
        self.nodes_evaluated.set(self.nodes_evaluated.get() + 1);
        let led_here = last.map(|(mv, _)| mv);

        if state.is_terminal() {
            return (terminal_score(&state, perspective), led_here);
        }

        if depth > depth_limit {
            let eval = clamp_heuristic(self.evaluator.evaluate(state.board(), perspective, last));
            return (eval, led_here);
        }

        let moves = state.legal_moves();
        if moves.is_empty() {
            let mut passed = state;
            passed.switch_turn();
            let (score, _) = self.minimax(passed, depth, perspective, depth_limit, last, false);
            return (score, led_here);
        }

        let mover = state.turn();

        if root && moves.len() == 1 {
            let mv = moves[0];
            let mut child = state;
            if let Err(err) = child.apply(mv) {
                log::error!("legal move {} rejected by the game state: {}", mv, err);
                return (SCORE_LOSS, Some(mv));
            }
            let score = if child.is_terminal() {
                terminal_score(&child, perspective)
            } else {
                clamp_heuristic(self.evaluator.evaluate(
                    child.board(),
                    perspective,
                    Some((mv, mover)),
                ))
            };
            return (score, Some(mv));
        }

        let maximizing = mover == perspective;
        let mut best_score = if maximizing { SCORE_LOSS } else { SCORE_WIN };
        let mut best_move = moves.first().copied();

        for &mv in moves.iter() {
            let mut child = state.clone();
            if let Err(err) = child.apply(mv) {
                log::error!("legal move {} rejected by the game state: {}", mv, err);
                continue;
            }
            let (score, _) = self.minimax(
                child,
                depth + 1,
                perspective,
                depth_limit,
                Some((mv, mover)),
                false,
            );

            let better = if maximizing {
                score > best_score
            } else {
                score < best_score
            };
            if better {
                best_score = score;
                best_move = Some(mv);
            }
        }

        (best_score, best_move)
    }
}

impl Searcher for MinimaxSearch {
    fn search<S: GameState>(
        &self,
        state: &S,
        perspective: Color,
        depth_limit: usize,
    ) -> SearchResult {
        self.nodes_evaluated.set(0);
        let (score, best_move) =
            self.minimax(state.clone(), 0, perspective, depth_limit, None, true);
        let nodes = self.nodes_evaluated.get();
        log::debug!(
            "minimax[{}] depth={} score={} move={:?} nodes={}",
            self.evaluator.name(),
            depth_limit,
            score,
            best_move,
            nodes
        );
        SearchResult {
            score,
            best_move,
            nodes,
        }
    }

    fn evaluator_name(&self) -> &str {
        self.evaluator.name()
    }
}
