use super::types::{Color, Position};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub const MIN_DIMENSION: usize = 4;
pub const MAX_DIMENSION: usize = 16;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("board dimensions {rows}x{cols} out of range (4..=16)")]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("row {row} has {got} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        got: usize,
    },

    #[error("invalid cell character '{character}' at ({row}, {col})")]
    InvalidCell { character: char, row: usize, col: usize },

    #[error("board has {got} cells, expected {expected}")]
    CellCount { expected: usize, got: usize },
}

/// 盤面
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawBoard")]
pub struct Board {
    rows: usize,
    cols: usize,
    /// row-major のセル (JSON では "BW.." 形式の文字列)
    #[serde(with = "crate::core::serialization")]
    cells: Vec<Color>,
}

/// JSON から読んだままの盤面。`Board` に変換するときに寸法を検証する。
#[derive(Deserialize)]
struct RawBoard {
    rows: usize,
    cols: usize,
    #[serde(deserialize_with = "crate::core::serialization::deserialize")]
    cells: Vec<Color>,
}

impl TryFrom<RawBoard> for Board {
    type Error = BoardError;

    fn try_from(raw: RawBoard) -> Result<Self, Self::Error> {
        let mut board = Board::new(raw.rows, raw.cols)?;
        if raw.cells.len() != board.cells.len() {
            return Err(BoardError::CellCount {
                expected: board.cells.len(),
                got: raw.cells.len(),
            });
        }
        board.cells = raw.cells;
        Ok(board)
    }
}

impl Board {
    pub fn new(rows: usize, cols: usize) -> Result<Self, BoardError> {
        if !(MIN_DIMENSION..=MAX_DIMENSION).contains(&rows)
            || !(MIN_DIMENSION..=MAX_DIMENSION).contains(&cols)
        {
            return Err(BoardError::InvalidDimensions { rows, cols });
        }
        Ok(Board {
            rows,
            cols,
            cells: vec![Color::Empty; rows * cols],
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    pub fn get(&self, pos: Position) -> Color {
        self.cells[pos.row * self.cols + pos.col]
    }

    pub fn set(&mut self, pos: Position, color: Color) {
        let idx = pos.row * self.cols + pos.col;
        self.cells[idx] = color;
    }

    pub fn cells(&self) -> &[Color] {
        &self.cells
    }

    pub fn count(&self, color: Color) -> usize {
        self.cells.iter().filter(|&&c| c == color).count()
    }

    /// Number of occupied cells.
    pub fn disc_count(&self) -> usize {
        self.cells.len() - self.count(Color::Empty)
    }

    pub fn is_full(&self) -> bool {
        !self.cells.contains(&Color::Empty)
    }

    /// Row-major iteration over every position.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.rows).flat_map(move |r| (0..self.cols).map(move |c| Position::new(r, c)))
    }

    /// Top-left, top-right, bottom-left, bottom-right.
    pub fn corners(&self) -> [Position; 4] {
        let (r, c) = (self.rows - 1, self.cols - 1);
        [
            Position::new(0, 0),
            Position::new(0, c),
            Position::new(r, 0),
            Position::new(r, c),
        ]
    }

    pub fn is_corner(&self, pos: Position) -> bool {
        self.corners().contains(&pos)
    }

    pub fn is_edge(&self, pos: Position) -> bool {
        pos.row == 0 || pos.col == 0 || pos.row == self.rows - 1 || pos.col == self.cols - 1
    }

    /// One string per row, `B`/`W`/`.`.
    pub fn to_rows(&self) -> Vec<String> {
        self.cells
            .chunks(self.cols)
            .map(|row| row.iter().map(|c| c.to_char()).collect())
            .collect()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "  ")?;
        for c in 0..self.cols {
            write!(f, " {:x}", c)?;
        }
        writeln!(f)?;
        for (r, row) in self.to_rows().iter().enumerate() {
            write!(f, "{:>2}", r)?;
            for ch in row.chars() {
                write!(f, " {}", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
