use othello_strategist::core::{setup_from_strings, Board, Color, Move, Position};
use othello_strategist::game::{Game, GameState};
use othello_strategist::logic::flip_count;
use othello_strategist::player::ai::{
    AIConfig, AlphaBetaSearch, Evaluator, MinimaxSearch, PolicyKind, Score, SearchPolicy,
    Searcher, WeightedEvaluator, SCORE_LOSS, SCORE_WIN,
};
use othello_strategist::player::Policy;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Always returns the same value.
struct Constant(Score);

impl Evaluator for Constant {
    fn evaluate(&self, _board: &Board, _perspective: Color, _last: Option<(Move, Color)>) -> Score {
        self.0
    }

    fn name(&self) -> &str {
        "constant"
    }
}

/// Random playout from the standard opening, stopped after `plies` moves or
/// at the end of the game.
fn random_position(rng: &mut StdRng, rows: usize, cols: usize, plies: usize) -> Game {
    let mut game = Game::standard(rows, cols).unwrap();
    for _ in 0..plies {
        if game.is_terminal() {
            break;
        }
        let moves = game.legal_moves();
        match moves.choose(rng) {
            Some(&mv) => game.apply(mv).unwrap(),
            None => game.switch_turn(),
        }
    }
    game
}

fn evaluators() -> Vec<(Box<dyn Evaluator>, Box<dyn Evaluator>)> {
    let config = AIConfig::default();
    vec![
        (
            Box::new(WeightedEvaluator::material()),
            Box::new(WeightedEvaluator::material()),
        ),
        (
            Box::new(WeightedEvaluator::new("strategist", config.strategist)),
            Box::new(WeightedEvaluator::new("strategist", config.strategist)),
        ),
        (
            Box::new(WeightedEvaluator::new("phased", config.phased)),
            Box::new(WeightedEvaluator::new("phased", config.phased)),
        ),
        (
            Box::new(WeightedEvaluator::new("shady", config.shady)),
            Box::new(WeightedEvaluator::new("shady", config.shady)),
        ),
    ]
}

#[test]
fn test_pruning_matches_minimax() {
    let mut rng = StdRng::seed_from_u64(20240601);
    for (pruned_eval, full_eval) in evaluators() {
        let pruned = AlphaBetaSearch::new(pruned_eval, 50_000);
        let full = MinimaxSearch::new(full_eval);

        for _ in 0..12 {
            let plies = rng.gen_range(0..20);
            let game = random_position(&mut rng, 6, 6, plies);
            for depth_limit in 0..3 {
                for perspective in [game.turn(), game.turn().opponent()] {
                    let a = pruned.search(&game, perspective, depth_limit);
                    let b = full.search(&game, perspective, depth_limit);
                    assert_eq!(
                        (a.score, a.best_move),
                        (b.score, b.best_move),
                        "{} at depth {} for {}:\n{}",
                        pruned.evaluator_name(),
                        depth_limit,
                        perspective,
                        game.board()
                    );
                    assert!(a.nodes <= b.nodes);
                }
            }
        }
    }
}

#[test]
fn test_pruning_matches_minimax_on_small_boards() {
    let mut rng = StdRng::seed_from_u64(7);
    let pruned = AlphaBetaSearch::new(Box::new(WeightedEvaluator::material()), 1_000);
    let full = MinimaxSearch::new(Box::new(WeightedEvaluator::material()));
    for _ in 0..20 {
        let plies = rng.gen_range(0..10);
        let game = random_position(&mut rng, 4, 4, plies);
        // 4x4 なら終局まで読み切れる
        let a = pruned.search(&game, game.turn(), 12);
        let b = full.search(&game, game.turn(), 12);
        assert_eq!((a.score, a.best_move), (b.score, b.best_move));
    }
}

#[test]
fn test_single_move_short_circuit() {
    let board = setup_from_strings(&["BW..", "....", "....", "...."]).unwrap();
    let game = Game::new(board);
    assert_eq!(game.legal_moves().len(), 1);

    for depth_limit in [0, 1, 5, 40] {
        let policy = SearchPolicy::alpha_beta(
            "material",
            Box::new(WeightedEvaluator::material()),
            depth_limit,
            64,
        );
        assert_eq!(policy.select_move(&game), Some(Position::new(0, 2)));

        let result = policy.analyze(&game);
        assert_eq!(result.best_move, Some(Position::new(0, 2)));
        assert_eq!(result.nodes, 1);
    }
}

#[test]
fn test_terminal_win_beats_any_heuristic() {
    assert!(SCORE_WIN > 1000);
    assert!(SCORE_LOSS < -1000);

    // (3,0) では終わらないが (3,1) で黒の勝ちが確定する
    let board = setup_from_strings(&["WWWB", "WBBB", "WWBB", "..BB"]).unwrap();
    let game = Game::new(board);
    assert_eq!(
        game.legal_moves(),
        vec![Position::new(3, 0), Position::new(3, 1)]
    );

    for value in [1000, -1000] {
        let search = AlphaBetaSearch::new(Box::new(Constant(value)), 64);
        let result = search.search(&game, Color::First, 0);
        assert_eq!(result.best_move, Some(Position::new(3, 1)));
        assert_eq!(result.score, SCORE_WIN);
    }
}

#[test]
fn test_terminal_loss_is_avoided() {
    // (0,1) は即負け
    let board = setup_from_strings(&["B..W", "BWWW", "BBWW", "BWWW"]).unwrap();
    let game = Game::new(board);
    assert_eq!(
        game.legal_moves(),
        vec![Position::new(0, 1), Position::new(0, 2)]
    );

    let search = AlphaBetaSearch::new(Box::new(Constant(-1000)), 64);
    let result = search.search(&game, Color::First, 0);
    assert_eq!(result.best_move, Some(Position::new(0, 2)));
    assert!(result.score > SCORE_LOSS);
}

#[test]
fn test_opening_at_depth_one() {
    let game = Game::standard(8, 8).unwrap();
    let openings = [
        Position::new(2, 3),
        Position::new(3, 2),
        Position::new(4, 5),
        Position::new(5, 4),
    ];
    let config = AIConfig {
        search: othello_strategist::player::ai::SearchConfig {
            depth_limit: 1,
            cache_capacity: 10_000,
        },
        ..AIConfig::default()
    };

    for kind in [
        PolicyKind::Material,
        PolicyKind::Strategist,
        PolicyKind::Phased,
        PolicyKind::Shady,
    ] {
        let mv = kind.build(&config).select_move(&game).unwrap();
        assert!(openings.contains(&mv), "{} opened with {}", kind, mv);
        assert_eq!(flip_count(game.board(), mv, Color::First), 1);
    }
}

#[test]
fn test_search_is_deterministic() {
    let game = Game::standard(8, 8).unwrap();
    let config = AIConfig::default();

    let first = AlphaBetaSearch::new(
        Box::new(WeightedEvaluator::new("phased", config.phased)),
        200_000,
    );
    let a = first.search(&game, Color::First, 4);
    // 同じインスタンス (キャッシュあり) でも別インスタンスでも同じ結果
    let b = first.search(&game, Color::First, 4);
    let second = AlphaBetaSearch::new(
        Box::new(WeightedEvaluator::new("phased", config.phased)),
        200_000,
    );
    let c = second.search(&game, Color::First, 4);

    assert_eq!((a.score, a.best_move), (b.score, b.best_move));
    assert_eq!((a.score, a.best_move), (c.score, c.best_move));
    assert!(a.best_move.is_some());
}

#[test]
fn test_small_cache_does_not_change_result() {
    let mut rng = StdRng::seed_from_u64(99);
    let game = random_position(&mut rng, 6, 6, 4);
    let big = AlphaBetaSearch::new(Box::new(WeightedEvaluator::material()), 100_000);
    let tiny = AlphaBetaSearch::new(Box::new(WeightedEvaluator::material()), 2);

    let a = big.search(&game, game.turn(), 3);
    let b = tiny.search(&game, game.turn(), 3);
    assert_eq!((a.score, a.best_move), (b.score, b.best_move));
    assert!(tiny.cache().len() <= 2);
    assert!(tiny.cache().evictions() > 0);
}

#[test]
fn test_forced_pass() {
    // 黒は打てないが白は (0,3) に打てる
    let board = setup_from_strings(&["WWB.", "....", "....", "...."]).unwrap();
    let game = Game::new(board);
    assert!(game.legal_moves().is_empty());
    assert!(!game.is_terminal());

    let search = AlphaBetaSearch::new(Box::new(WeightedEvaluator::material()), 64);
    let result = search.search(&game, Color::First, 2);
    assert_eq!(result.best_move, None);
    // 白が (0,3) で黒石を全部取って終局
    assert_eq!(result.score, SCORE_LOSS);

    let policy = PolicyKind::Phased.build(&AIConfig::default());
    assert_eq!(policy.select_move(&game), None);

    let mut passed = game.clone();
    passed.switch_turn();
    assert_eq!(passed.legal_moves(), vec![Position::new(0, 3)]);
}

#[test]
fn test_opponent_single_reply_after_pass_is_searched() {
    // 黒はパス, 白の唯一の手 (0,1) の後に黒が (0,3) で盤を埋めて 7-9 で負け
    let board = setup_from_strings(&["W.B.", "BBBW", "BBWW", "BWWW"]).unwrap();
    let game = Game::new(board);
    assert!(game.legal_moves().is_empty());
    let mut passed = game.clone();
    passed.switch_turn();
    assert_eq!(passed.legal_moves(), vec![Position::new(0, 1)]);

    for depth_limit in [2, 5] {
        let pruned = AlphaBetaSearch::new(Box::new(WeightedEvaluator::material()), 64);
        let full = MinimaxSearch::new(Box::new(WeightedEvaluator::material()));
        for result in [
            pruned.search(&game, Color::First, depth_limit),
            full.search(&game, Color::First, depth_limit),
        ] {
            assert_eq!(result.best_move, None);
            assert_eq!(result.score, SCORE_LOSS);
        }
    }
}
