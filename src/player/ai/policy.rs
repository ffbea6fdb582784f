use super::alpha_beta::{AlphaBetaSearch, SearchResult, Searcher};
use super::config::AIConfig;
use super::eval::WeightedEvaluator;
use super::evaluator::Evaluator;
use super::greedy::GreedyPolicy;
use super::minimax::MinimaxSearch;
use super::random::RandomPolicy;
use crate::core::Move;
use crate::game::{Game, GameState};
use crate::player::Policy;
use serde::{Deserialize, Serialize};

/// Binds one searcher (and through it one evaluator) to a fixed depth limit.
pub struct SearchPolicy<E: Searcher> {
    name: String,
    searcher: E,
    depth_limit: usize,
}

impl<E: Searcher> SearchPolicy<E> {
    pub fn new(name: &str, searcher: E, depth_limit: usize) -> Self {
        Self {
            name: name.to_string(),
            searcher,
            depth_limit,
        }
    }

    pub fn searcher(&self) -> &E {
        &self.searcher
    }

    pub fn depth_limit(&self) -> usize {
        self.depth_limit
    }

    /// Full search result for the side to move.
    pub fn analyze(&self, state: &Game) -> SearchResult {
        self.searcher
            .search(state, state.turn(), self.depth_limit)
    }
}

impl SearchPolicy<AlphaBetaSearch> {
    pub fn alpha_beta(
        name: &str,
        evaluator: Box<dyn Evaluator>,
        depth_limit: usize,
        cache_capacity: usize,
    ) -> Self {
        Self::new(
            name,
            AlphaBetaSearch::new(evaluator, cache_capacity),
            depth_limit,
        )
    }
}

impl<E: Searcher> Policy for SearchPolicy<E> {
    fn select_move(&self, state: &Game) -> Option<Move> {
        let moves = state.legal_moves();
        match moves.len() {
            0 => None,
            1 => Some(moves[0]),
            _ => {
                let result = self.analyze(state);
                match result.best_move {
                    Some(mv) if moves.contains(&mv) => Some(mv),
                    other => {
                        log::warn!(
                            "{}: search returned {:?}, falling back to first legal move",
                            self.name,
                            other
                        );
                        moves.first().copied()
                    }
                }
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// The stock policies, selectable from the CLI and the tournament harness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum PolicyKind {
    /// Uniformly random legal move.
    Random,
    /// Most discs flipped this turn.
    Greedy,
    /// Alpha-beta on disc difference.
    Material,
    /// Alpha-beta on stability and mobility.
    Strategist,
    /// Alpha-beta on phase-weighted mobility, corners/edges and material.
    Phased,
    /// Alpha-beta on stability, mobility and frontier, rewarding corner moves
    /// and punishing X-square moves.
    Shady,
    /// Unpruned minimax on disc difference.
    Minimax,
}

impl PolicyKind {
    pub fn label(self) -> &'static str {
        match self {
            PolicyKind::Random => "random",
            PolicyKind::Greedy => "greedy",
            PolicyKind::Material => "material",
            PolicyKind::Strategist => "strategist",
            PolicyKind::Phased => "phased",
            PolicyKind::Shady => "shady",
            PolicyKind::Minimax => "minimax",
        }
    }

    /// Builds a fresh policy (with its own empty cache).
    pub fn build(self, config: &AIConfig) -> Box<dyn Policy> {
        let depth = config.search.depth_limit;
        let capacity = config.search.cache_capacity;
        let name = self.label();
        match self {
            PolicyKind::Random => Box::new(RandomPolicy::new(name)),
            PolicyKind::Greedy => Box::new(GreedyPolicy::new(name)),
            PolicyKind::Material => Box::new(SearchPolicy::alpha_beta(
                name,
                Box::new(WeightedEvaluator::material()),
                depth,
                capacity,
            )),
            PolicyKind::Strategist => Box::new(SearchPolicy::alpha_beta(
                name,
                Box::new(WeightedEvaluator::new(name, config.strategist)),
                depth,
                capacity,
            )),
            PolicyKind::Phased => Box::new(SearchPolicy::alpha_beta(
                name,
                Box::new(WeightedEvaluator::new(name, config.phased)),
                depth,
                capacity,
            )),
            PolicyKind::Shady => Box::new(SearchPolicy::alpha_beta(
                name,
                Box::new(WeightedEvaluator::new(name, config.shady)),
                depth,
                capacity,
            )),
            PolicyKind::Minimax => Box::new(SearchPolicy::new(
                name,
                MinimaxSearch::new(Box::new(WeightedEvaluator::material())),
                depth,
            )),
        }
    }
}

impl std::fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
