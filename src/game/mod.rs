//! # Game State
//!
//! `GameState` is the only view of the rules the search engine and the
//! evaluators get. `Game` is the concrete Othello implementation on top of
//! [`crate::logic`].
//!
//! The engine explores every hypothetical move on its own `Clone` of the
//! state, so implementations must have value semantics: a clone shares
//! nothing mutable with its source.

pub mod record;

use crate::core::{standard_setup, Board, BoardError, Color, Move};
use crate::logic::{self, MoveError};
use serde::{Deserialize, Serialize};

pub use record::{GameRecord, RecordError};

pub trait GameState: Clone {
    /// Moves for the side to move, in a fixed (row-major) order. Empty when
    /// the side to move has to pass.
    fn legal_moves(&self) -> Vec<Move>;

    /// Plays `mv` for the side to move, flips captured discs and hands the
    /// turn to the opponent.
    fn apply(&mut self, mv: Move) -> Result<(), MoveError>;

    /// Forced pass.
    fn switch_turn(&mut self);

    fn turn(&self) -> Color;

    fn is_terminal(&self) -> bool;

    /// Winning colour, `Color::Empty` for a draw. Only meaningful once
    /// `is_terminal()` holds.
    fn winner(&self) -> Color;

    /// `(First の石数, Second の石数)`
    fn scores(&self) -> (usize, usize);

    fn board(&self) -> &Board;
}

/// 盤面 + 手番
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub board: Board,
    pub current_player: Color,
}

impl Game {
    pub fn new(board: Board) -> Self {
        Game {
            board,
            current_player: Color::First,
        }
    }

    /// Standard four-disc opening on a `rows × cols` board, First to move.
    pub fn standard(rows: usize, cols: usize) -> Result<Self, BoardError> {
        Ok(Game::new(standard_setup(rows, cols)?))
    }

    pub fn with_turn(board: Board, turn: Color) -> Self {
        Game {
            board,
            current_player: turn,
        }
    }
}

impl GameState for Game {
    fn legal_moves(&self) -> Vec<Move> {
        logic::legal_moves(&self.board, self.current_player)
    }

    fn apply(&mut self, mv: Move) -> Result<(), MoveError> {
        logic::apply_move(&mut self.board, mv, self.current_player)?;
        self.current_player = self.current_player.opponent();
        Ok(())
    }

    fn switch_turn(&mut self) {
        self.current_player = self.current_player.opponent();
    }

    fn turn(&self) -> Color {
        self.current_player
    }

    fn is_terminal(&self) -> bool {
        logic::is_game_over(&self.board)
    }

    fn winner(&self) -> Color {
        logic::winner(&self.board)
    }

    fn scores(&self) -> (usize, usize) {
        logic::scores(&self.board)
    }

    fn board(&self) -> &Board {
        &self.board
    }
}
