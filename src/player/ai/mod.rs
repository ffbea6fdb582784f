pub mod alpha_beta;
pub mod config;
pub mod eval;
pub mod evaluator;
pub mod greedy;
pub mod minimax;
pub mod policy;
pub mod random;
pub mod stability;
pub mod tt;

pub use alpha_beta::{AlphaBetaSearch, SearchResult, Searcher};
pub use config::{AIConfig, ComponentWeights, EvaluationConfig, SearchConfig};
pub use eval::WeightedEvaluator;
pub use evaluator::{Evaluator, Score, SCORE_DRAW, SCORE_LOSS, SCORE_WIN};
pub use greedy::GreedyPolicy;
pub use minimax::MinimaxSearch;
pub use policy::{PolicyKind, SearchPolicy};
pub use random::RandomPolicy;
