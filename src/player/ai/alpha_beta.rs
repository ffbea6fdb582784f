use super::evaluator::{clamp_heuristic, Evaluator, Score, SCORE_DRAW, SCORE_LOSS, SCORE_WIN};
use super::tt::EvalCache;
use crate::core::{Color, Move};
use crate::game::GameState;
use crate::logic::zobrist::ZobristHasher;

use std::cell::{Cell, Ref, RefCell};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// Value of the root from the perspective player's side.
    pub score: Score,
    /// `None` only when the side to move has no legal move (or the root is
    /// already terminal).
    pub best_move: Option<Move>,
    pub nodes: usize,
}

/// A depth-limited game-tree search over any [`GameState`].
pub trait Searcher {
    fn search<S: GameState>(&self, state: &S, perspective: Color, depth_limit: usize)
        -> SearchResult;

    fn evaluator_name(&self) -> &str;
}

/// Terminal sentinel for `perspective`.
pub(crate) fn terminal_score<S: GameState>(state: &S, perspective: Color) -> Score {
    match state.winner() {
        Color::Empty => SCORE_DRAW,
        w if w == perspective => SCORE_WIN,
        _ => SCORE_LOSS,
    }
}

/// Minimax with alpha-beta pruning and a frontier evaluation cache.
///
/// Sign convention: every value is from `perspective`'s side. A node is a
/// maximising node when `perspective` is to move there, otherwise minimising.
/// Passes keep the depth, so this is the same as depth parity until a pass
/// happens.
pub struct AlphaBetaSearch {
    evaluator: Box<dyn Evaluator>,
    tt: RefCell<EvalCache>,
    nodes_evaluated: Cell<usize>,
}

impl AlphaBetaSearch {
    pub fn new(evaluator: Box<dyn Evaluator>, cache_capacity: usize) -> Self {
        Self {
            evaluator,
            tt: RefCell::new(EvalCache::new(cache_capacity)),
            nodes_evaluated: Cell::new(0),
        }
    }

    pub fn cache(&self) -> Ref<'_, EvalCache> {
        self.tt.borrow()
    }

    /// Drops every cached score, e.g. after swapping evaluator weights.
    pub fn clear_cache(&self) {
        self.tt.borrow_mut().clear();
    }

    // --- Frontier ---
    fn frontier_value<S: GameState>(
        &self,
        state: &S,
        perspective: Color,
        last: Option<(Move, Color)>,
    ) -> Score {
        let (last_move, mover) = match last {
            Some((mv, mover)) => (Some(mv), mover),
            None => (None, Color::Empty),
        };
        let key = ZobristHasher::cache_key(state.board(), last_move, mover, perspective);
        self.tt.borrow_mut().get_or_compute(key, || {
            clamp_heuristic(self.evaluator.evaluate(state.board(), perspective, last))
        })
    }

    // --- Alpha-Beta Search ---
    #[allow(clippy::too_many_arguments)]
    fn alpha_beta<S: GameState>(
        &self,
        state: S,
        depth: usize,
        mut alpha: Score,
        mut beta: Score,
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
            return (self.frontier_value(&state, perspective, last), led_here);
        }

        let moves = state.legal_moves();
        if moves.is_empty() {
            // パス: 手番だけ渡して同じ深さで続ける
            let mut passed = state;
            passed.switch_turn();
            // パス後は相手の手番なのでルート扱いしない
            let (score, _) = self.alpha_beta(
                passed,
                depth,
                alpha,
                beta,
                perspective,
                depth_limit,
                last,
                false,
            );
            return (score, led_here);
        }

        let mover = state.turn();

        if root && moves.len() == 1 {
            // 選択肢が無いので展開しない
            let mv = moves[0];
            let mut child = state;
            if let Err(err) = child.apply(mv) {
                log::error!("legal move {} rejected by the game state: {}", mv, err);
                return (SCORE_LOSS, Some(mv));
            }
            let score = if child.is_terminal() {
                terminal_score(&child, perspective)
            } else {
                self.frontier_value(&child, perspective, Some((mv, mover)))
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
            let (score, _) = self.alpha_beta(
                child,
                depth + 1,
                alpha,
                beta,
                perspective,
                depth_limit,
                Some((mv, mover)),
                false,
            );

            if maximizing {
                if score > best_score {
                    best_score = score;
                    best_move = Some(mv);
                }
                if beta <= best_score {
                    return (best_score, best_move); // Beta Cutoff
                }
                alpha = alpha.max(best_score);
            } else {
                if score < best_score {
                    best_score = score;
                    best_move = Some(mv);
                }
                if alpha >= best_score {
                    return (best_score, best_move); // Alpha Cutoff
                }
                beta = beta.min(best_score);
            }
        }

        (best_score, best_move)
    }
}

impl Searcher for AlphaBetaSearch {
    fn search<S: GameState>(
        &self,
        state: &S,
        perspective: Color,
        depth_limit: usize,
    ) -> SearchResult {
        self.nodes_evaluated.set(0);

        let (score, best_move) = self.alpha_beta(
            state.clone(),
            0,
            SCORE_LOSS,
            SCORE_WIN,
            perspective,
            depth_limit,
            None,
            true,
        );
        let nodes = self.nodes_evaluated.get();

        let tt = self.tt.borrow();
        log::debug!(
            "alpha-beta[{}] depth={} score={} move={:?} nodes={} cache={}/{} (hits={}, misses={}, evictions={})",
            self.evaluator.name(),
            depth_limit,
            score,
            best_move,
            nodes,
            tt.len(),
            tt.capacity(),
            tt.hits(),
            tt.misses(),
            tt.evictions()
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{setup_from_strings, Board, Position};
    use crate::game::Game;
    use crate::player::ai::eval::WeightedEvaluator;

    /// Counts calls so tests can see whether the frontier was reached.
    struct CountingEvaluator {
        calls: std::sync::atomic::AtomicUsize,
    }

    impl Evaluator for CountingEvaluator {
        fn evaluate(
            &self,
            board: &Board,
            perspective: Color,
            _last: Option<(Move, Color)>,
        ) -> Score {
            self.calls
                .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            board.count(perspective) as Score
        }

        fn name(&self) -> &str {
            "counting"
        }
    }

    fn material_search() -> AlphaBetaSearch {
        AlphaBetaSearch::new(Box::new(WeightedEvaluator::material()), 10_000)
    }

    #[test]
    fn test_opening_move_is_legal() {
        let game = Game::standard(8, 8).unwrap();
        let result = material_search().search(&game, Color::First, 1);
        let mv = result.best_move.unwrap();
        assert!(game.legal_moves().contains(&mv));
        assert!(result.nodes > 1);
    }

    #[test]
    fn test_terminal_root_returns_sentinel() {
        let board = setup_from_strings(&["BBBB", "BBBB", "BBBW", "BBWW"]).unwrap();
        let game = Game::new(board);
        assert!(game.is_terminal());
        let search = material_search();
        assert_eq!(
            search.search(&game, Color::First, 3),
            SearchResult {
                score: SCORE_WIN,
                best_move: None,
                nodes: 1
            }
        );
        assert_eq!(search.search(&game, Color::Second, 3).score, SCORE_LOSS);
    }

    #[test]
    fn test_takes_immediate_win() {
        // W が (0,3) に打てば黒を全部取って終局
        let board = setup_from_strings(&["WBB.", "....", "....", "...."]).unwrap();
        let game = Game::with_turn(board, Color::Second);
        let result = material_search().search(&game, Color::Second, 2);
        assert_eq!(result.best_move, Some(Position::new(0, 3)));
        assert_eq!(result.score, SCORE_WIN);
    }

    #[test]
    fn test_root_pass_returns_no_move() {
        // B は打てないが W は打てる
        let board = setup_from_strings(&["WWB.", "....", "....", "...."]).unwrap();
        let game = Game::new(board);
        assert!(game.legal_moves().is_empty());
        assert!(!game.is_terminal());
        let result = material_search().search(&game, Color::First, 2);
        assert_eq!(result.best_move, None);
    }

    #[test]
    fn test_single_root_move_is_not_expanded() {
        let board = setup_from_strings(&["BW..", "....", "....", "...."]).unwrap();
        let game = Game::new(board);
        assert_eq!(game.legal_moves(), vec![Position::new(0, 2)]);

        let counting = CountingEvaluator {
            calls: std::sync::atomic::AtomicUsize::new(0),
        };
        let search = AlphaBetaSearch::new(Box::new(counting), 16);
        let result = search.search(&game, Color::First, 6);
        assert_eq!(result.best_move, Some(Position::new(0, 2)));
        assert_eq!(result.nodes, 1);
    }

    #[test]
    fn test_cache_is_populated_and_reused() {
        let game = Game::standard(6, 6).unwrap();
        let search = material_search();
        let first = search.search(&game, Color::First, 2);
        let misses = search.cache().misses();
        assert!(search.cache().len() > 0);

        let second = search.search(&game, Color::First, 2);
        assert_eq!(first.score, second.score);
        assert_eq!(first.best_move, second.best_move);
        // 2 回目はすべてキャッシュヒット
        assert_eq!(search.cache().misses(), misses);

        search.clear_cache();
        assert!(search.cache().is_empty());
    }
}
