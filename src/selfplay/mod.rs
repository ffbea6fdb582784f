use crate::core::{Color, Move};
use crate::game::{Game, GameRecord, GameState};
use crate::logic::MoveError;
use crate::player::ai::{AIConfig, PolicyKind};
use crate::player::Policy;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

pub struct TournamentConfig {
    pub num_games: usize,
    pub rows: usize,
    pub cols: usize,
    /// 評価対象
    pub contender: PolicyKind,
    pub opponent: PolicyKind,
    pub ai_config: AIConfig,
    pub save_records: Option<PathBuf>,
    pub parallel: bool,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        TournamentConfig {
            num_games: 10,
            rows: 8,
            cols: 8,
            contender: PolicyKind::Strategist,
            opponent: PolicyKind::Random,
            ai_config: AIConfig::default(),
            save_records: None,
            parallel: true,
        }
    }
}

/// One game seen from the contender's side.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameResult {
    pub game_num: usize,
    pub contender_color: Color,
    pub winner: Color,
    pub contender_score: usize,
    pub opponent_score: usize,
    /// Discs placed by both sides.
    pub length: usize,
    pub contender_moves: usize,
    pub corner_captures: usize,
    pub contender_invalid: usize,
    pub opponent_invalid: usize,
    /// Wall time spent in the contender's `select_move`, in microseconds.
    pub think_us: u64,
    pub decisions: usize,
}

impl GameResult {
    pub fn score_difference(&self) -> i64 {
        self.contender_score as i64 - self.opponent_score as i64
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TournamentStats {
    pub contender: String,
    pub opponent: String,
    pub rows: usize,
    pub cols: usize,
    pub total_games: usize,
    pub wins: usize,
    pub losses: usize,
    pub draws: usize,
    pub invalid_moves: usize,
    pub opponent_invalid_moves: usize,
    pub avg_score_difference: f64,
    pub avg_pieces: f64,
    pub avg_game_length: f64,
    pub avg_moves_per_game: f64,
    pub corner_capture_rate: f64,
    pub avg_move_time_ms: f64,
    pub games: Vec<GameResult>,
}

impl TournamentStats {
    pub fn new(contender: &str, opponent: &str, rows: usize, cols: usize) -> Self {
        TournamentStats {
            contender: contender.to_string(),
            opponent: opponent.to_string(),
            rows,
            cols,
            ..Default::default()
        }
    }

    pub fn add_result(&mut self, result: GameResult) {
        self.total_games += 1;
        if result.winner == result.contender_color {
            self.wins += 1;
        } else if result.winner == Color::Empty {
            self.draws += 1;
        } else {
            self.losses += 1;
        }
        self.invalid_moves += result.contender_invalid;
        self.opponent_invalid_moves += result.opponent_invalid;
        self.games.push(result);
        self.recalculate_averages();
    }

    fn recalculate_averages(&mut self) {
        if self.games.is_empty() {
            return;
        }
        let n = self.games.len() as f64;
        let score_diff: i64 = self.games.iter().map(|g| g.score_difference()).sum();
        let pieces: usize = self.games.iter().map(|g| g.contender_score).sum();
        let length: usize = self.games.iter().map(|g| g.length).sum();
        let moves: usize = self.games.iter().map(|g| g.contender_moves).sum();
        let corners: usize = self.games.iter().map(|g| g.corner_captures).sum();
        let think_us: u64 = self.games.iter().map(|g| g.think_us).sum();
        let decisions: usize = self.games.iter().map(|g| g.decisions).sum();

        self.avg_score_difference = score_diff as f64 / n;
        self.avg_pieces = pieces as f64 / n;
        self.avg_game_length = length as f64 / n;
        self.avg_moves_per_game = moves as f64 / n;
        self.corner_capture_rate = ratio(corners, moves);
        self.avg_move_time_ms = if decisions == 0 {
            0.0
        } else {
            think_us as f64 / decisions as f64 / 1000.0
        };
    }

    pub fn win_rate(&self) -> f64 {
        ratio(self.wins, self.total_games)
    }

    pub fn draw_rate(&self) -> f64 {
        ratio(self.draws, self.total_games)
    }

    pub fn loss_rate(&self) -> f64 {
        ratio(self.losses, self.total_games)
    }

    pub fn invalid_move_rate(&self) -> f64 {
        ratio(self.invalid_moves, self.total_games)
    }
}

fn ratio(n: usize, d: usize) -> f64 {
    if d == 0 {
        0.0
    } else {
        n as f64 / d as f64
    }
}

/// Colour of the contender in game `game_num` (1-based). Odd games: First.
pub fn contender_color(game_num: usize) -> Color {
    if game_num % 2 == 1 {
        Color::First
    } else {
        Color::Second
    }
}

pub fn run_tournament(config: &TournamentConfig) -> anyhow::Result<TournamentStats> {
    // 盤サイズはここで検証しておく
    Game::standard(config.rows, config.cols)?;
    if let Some(dir) = &config.save_records {
        std::fs::create_dir_all(dir)?;
    }

    log::info!(
        "tournament: {} vs {} on {}x{}, {} games ({})",
        config.contender,
        config.opponent,
        config.rows,
        config.cols,
        config.num_games,
        if config.parallel { "parallel" } else { "sequential" }
    );

    let finished = AtomicUsize::new(0);
    let run_one = |game_num: usize| -> anyhow::Result<GameResult> {
        // ポリシー (とキャッシュ) はゲームごとに作る
        let contender = config.contender.build(&config.ai_config);
        let opponent = config.opponent.build(&config.ai_config);
        let (result, record) = play_game(
            game_num,
            contender.as_ref(),
            opponent.as_ref(),
            contender_color(game_num),
            config.rows,
            config.cols,
        )?;
        if let Some(dir) = &config.save_records {
            let path = record.save(dir, game_num)?;
            log::debug!("record saved to {}", path.display());
        }
        let done = finished.fetch_add(1, Ordering::Relaxed) + 1;
        log::info!(
            "game {}/{} done: winner={} score {}-{} ({} discs placed)",
            done,
            config.num_games,
            result.winner,
            result.contender_score,
            result.opponent_score,
            result.length
        );
        Ok(result)
    };

    let results: Vec<GameResult> = if config.parallel {
        (1..=config.num_games)
            .into_par_iter()
            .map(run_one)
            .collect::<anyhow::Result<_>>()?
    } else {
        (1..=config.num_games)
            .map(run_one)
            .collect::<anyhow::Result<_>>()?
    };

    let mut stats = TournamentStats::new(
        config.contender.label(),
        config.opponent.label(),
        config.rows,
        config.cols,
    );
    for result in results {
        stats.add_result(result);
    }
    Ok(stats)
}

/// Plays one game from the standard opening.
///
/// A move the rules reject, or `None` while legal moves exist, forfeits the
/// turn: it is counted against the side that made it and the turn passes.
pub fn play_game(
    game_num: usize,
    contender: &dyn Policy,
    opponent: &dyn Policy,
    contender_color: Color,
    rows: usize,
    cols: usize,
) -> anyhow::Result<(GameResult, GameRecord)> {
    let mut game = Game::standard(rows, cols)?;
    let (first, second) = if contender_color == Color::First {
        (contender, opponent)
    } else {
        (opponent, contender)
    };
    let mut record = GameRecord::new(rows, cols, first.name(), second.name());
    let mut result = GameResult {
        game_num,
        contender_color,
        ..Default::default()
    };

    // 反則が続いても終わるように
    let max_turns = rows * cols * 4;
    let mut turns = 0;

    while !game.is_terminal() {
        if turns >= max_turns {
            log::warn!(
                "game {}: stopped after {} turns without reaching the end",
                game_num,
                turns
            );
            break;
        }
        turns += 1;

        let mover = game.turn();
        let is_contender = mover == contender_color;
        let policy = if is_contender { contender } else { opponent };
        let legal = game.legal_moves();

        let start = Instant::now();
        let choice = policy.select_move(&game);
        if is_contender {
            result.think_us += start.elapsed().as_micros() as u64;
            result.decisions += 1;
        }

        match play_turn(&mut game, choice, &legal) {
            Ok(Some(mv)) => {
                record.push(Some(mv));
                result.length += 1;
                if is_contender {
                    result.contender_moves += 1;
                    if game.board().is_corner(mv) {
                        result.corner_captures += 1;
                    }
                }
            }
            Ok(None) => record.push(None),
            Err(err) => {
                log::warn!("game {}: {} forfeits a turn: {}", game_num, policy.name(), err);
                if is_contender {
                    result.contender_invalid += 1;
                } else {
                    result.opponent_invalid += 1;
                }
                game.switch_turn();
                record.push(None);
            }
        }
    }

    record.finish(&game);
    let (first_score, second_score) = game.scores();
    let (own, other) = if contender_color == Color::First {
        (first_score, second_score)
    } else {
        (second_score, first_score)
    };
    result.contender_score = own;
    result.opponent_score = other;
    result.winner = game.winner();
    Ok((result, record))
}

/// `Ok(None)` is a legitimate pass.
fn play_turn(
    game: &mut Game,
    choice: Option<Move>,
    legal: &[Move],
) -> Result<Option<Move>, MoveError> {
    match choice {
        Some(mv) => {
            game.apply(mv)?;
            Ok(Some(mv))
        }
        None if legal.is_empty() => {
            game.switch_turn();
            Ok(None)
        }
        None => Err(MoveError::InvalidMoveType(
            "pass while legal moves exist".to_string(),
        )),
    }
}

pub fn print_report(stats: &TournamentStats) {
    println!(
        "\n=== {} vs {} ({}x{}) ===",
        stats.contender, stats.opponent, stats.rows, stats.cols
    );
    println!("Total games played: {}", stats.total_games);

    println!("\nPerformance:");
    println!("Win rate: {:.2}%", stats.win_rate() * 100.0);
    println!("Draw rate: {:.2}%", stats.draw_rate() * 100.0);
    println!("Loss rate: {:.2}%", stats.loss_rate() * 100.0);
    println!("Invalid move rate: {:.2}%", stats.invalid_move_rate() * 100.0);
    if stats.opponent_invalid_moves > 0 {
        println!("Opponent invalid moves: {}", stats.opponent_invalid_moves);
    }

    println!("\nGame statistics:");
    println!("Average score difference: {:.2}", stats.avg_score_difference);
    println!("Average pieces per game: {:.2}", stats.avg_pieces);
    println!("Average game length: {:.2}", stats.avg_game_length);
    println!("Average moves per game: {:.2}", stats.avg_moves_per_game);

    println!("\nStrategy:");
    println!("Corner capture rate: {:.2}%", stats.corner_capture_rate * 100.0);
    println!("Average move time: {:.3} ms", stats.avg_move_time_ms);
}
