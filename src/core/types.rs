use serde::{Deserialize, Serialize};
use std::fmt;

/// 石の色 / 手番
///
/// `Empty` is a cell occupant only; it never owns a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Color {
    First,  // 黒 (先手)
    Second, // 白 (後手)
    #[default]
    Empty,
}

impl Color {
    pub fn opponent(self) -> Color {
        match self {
            Color::First => Color::Second,
            Color::Second => Color::First,
            Color::Empty => Color::Empty,
        }
    }

    pub fn is_player(self) -> bool {
        self != Color::Empty
    }

    pub fn to_char(self) -> char {
        match self {
            Color::First => 'B',
            Color::Second => 'W',
            Color::Empty => '.',
        }
    }

    pub fn from_char(c: char) -> Option<Color> {
        match c {
            'B' | 'b' | 'X' | 'x' => Some(Color::First),
            'W' | 'w' | 'O' | 'o' => Some(Color::Second),
            '.' | '-' => Some(Color::Empty),
            _ => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Color::First => write!(f, "First"),
            Color::Second => write!(f, "Second"),
            Color::Empty => write!(f, "Empty"),
        }
    }
}

/// 盤面座標 (0-indexed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }

    /// Steps one cell in direction `(dr, dc)`, or `None` when leaving a
    /// `rows × cols` grid.
    pub fn offset(self, dr: isize, dc: isize, rows: usize, cols: usize) -> Option<Position> {
        let r = self.row as isize + dr;
        let c = self.col as isize + dc;
        if r < 0 || c < 0 || r >= rows as isize || c >= cols as isize {
            return None;
        }
        Some(Position::new(r as usize, c as usize))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A placement for the side to move. `Option<Move>::None` stands for a pass.
pub type Move = Position;
