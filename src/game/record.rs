use super::{Game, GameState};
use crate::core::{BoardError, Color, Move};
use crate::logic::MoveError;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecordError {
    #[error(transparent)]
    Board(#[from] BoardError),

    #[error("move #{index} cannot be replayed: {source}")]
    IllegalMove { index: usize, source: MoveError },
}

/// 棋譜: 標準初期配置から打たれた手の列。`None` はパス (または反則による手番移動)。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub rows: usize,
    pub cols: usize,
    pub first: String,
    pub second: String,
    pub moves: Vec<Option<Move>>,
    pub first_score: usize,
    pub second_score: usize,
    pub winner: Color,
}

impl GameRecord {
    pub fn new(rows: usize, cols: usize, first: &str, second: &str) -> Self {
        GameRecord {
            rows,
            cols,
            first: first.to_string(),
            second: second.to_string(),
            moves: Vec::new(),
            first_score: 0,
            second_score: 0,
            winner: Color::Empty,
        }
    }

    pub fn push(&mut self, mv: Option<Move>) {
        self.moves.push(mv);
    }

    /// Stores the final scores and winner of `game`.
    pub fn finish(&mut self, game: &Game) {
        let (first, second) = game.scores();
        self.first_score = first;
        self.second_score = second;
        self.winner = game.winner();
    }

    fn play_through<F: FnMut(&Game)>(&self, mut visit: F) -> Result<Game, RecordError> {
        let mut game = Game::standard(self.rows, self.cols)?;
        visit(&game);
        for (index, mv) in self.moves.iter().enumerate() {
            match mv {
                Some(mv) => game
                    .apply(*mv)
                    .map_err(|source| RecordError::IllegalMove { index, source })?,
                None => game.switch_turn(),
            }
            visit(&game);
        }
        Ok(game)
    }

    /// Every position of the game, starting from the opening.
    pub fn positions(&self) -> Result<Vec<Game>, RecordError> {
        let mut positions = Vec::with_capacity(self.moves.len() + 1);
        self.play_through(|g| positions.push(g.clone()))?;
        Ok(positions)
    }

    /// Final position of the game.
    pub fn replay(&self) -> Result<Game, RecordError> {
        self.play_through(|_| {})
    }

    pub fn save(&self, dir: &Path, game_num: usize) -> anyhow::Result<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let filename = dir.join(format!(
            "game_{:04}_{}.json",
            game_num,
            chrono::Local::now().format("%Y%m%d_%H%M%S")
        ));
        let file = File::create(&filename)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(filename)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let file = File::open(path)?;
        let record = serde_json::from_reader(file)?;
        Ok(record)
    }
}
