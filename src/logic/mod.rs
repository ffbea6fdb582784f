pub mod zobrist;

use crate::core::{Board, Color, Move, Position};
use thiserror::Error;

/// 8 方向
pub const DIRECTIONS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Rejections raised when a move cannot be applied.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MoveError {
    /// The cell is occupied or the placement brackets nothing.
    #[error("invalid move {0}")]
    InvalidMove(Position),

    /// The move is not a placement on this board (off-grid, or missing).
    #[error("invalid move type: {0}")]
    InvalidMoveType(String),
}

/// `from` から `(dr, dc)` 方向に挟める相手の石の数 (挟めなければ 0)
fn flips_in_direction(board: &Board, from: Position, dr: isize, dc: isize, player: Color) -> usize {
    let opponent = player.opponent();
    let mut run = 0;
    let mut curr = from;
    while let Some(next) = curr.offset(dr, dc, board.rows(), board.cols()) {
        let cell = board.get(next);
        if cell == opponent {
            run += 1;
            curr = next;
        } else if cell == player {
            return run;
        } else {
            return 0;
        }
    }
    0
}

/// Number of discs `player` would flip by placing at `pos` (0 means illegal).
pub fn flip_count(board: &Board, pos: Position, player: Color) -> usize {
    if !board.contains(pos) || board.get(pos) != Color::Empty || !player.is_player() {
        return 0;
    }
    DIRECTIONS
        .iter()
        .map(|&(dr, dc)| flips_in_direction(board, pos, dr, dc, player))
        .sum()
}

pub fn is_legal(board: &Board, pos: Position, player: Color) -> bool {
    if !board.contains(pos) || board.get(pos) != Color::Empty || !player.is_player() {
        return false;
    }
    DIRECTIONS
        .iter()
        .any(|&(dr, dc)| flips_in_direction(board, pos, dr, dc, player) > 0)
}

/// 合法手生成 (row-major 順)
pub fn legal_moves(board: &Board, player: Color) -> Vec<Move> {
    board
        .positions()
        .filter(|&pos| is_legal(board, pos, player))
        .collect()
}

pub fn has_legal_move(board: &Board, player: Color) -> bool {
    board.positions().any(|pos| is_legal(board, pos, player))
}

/// 石を置いて挟んだ石を裏返す。裏返した数を返す。
pub fn apply_move(board: &mut Board, mv: Move, player: Color) -> Result<usize, MoveError> {
    if !board.contains(mv) {
        return Err(MoveError::InvalidMoveType(format!(
            "{} is outside the {}x{} board",
            mv,
            board.rows(),
            board.cols()
        )));
    }
    if !player.is_player() {
        return Err(MoveError::InvalidMoveType(format!(
            "no side to move for {}",
            mv
        )));
    }
    if board.get(mv) != Color::Empty {
        return Err(MoveError::InvalidMove(mv));
    }

    let mut flipped = 0;
    for &(dr, dc) in DIRECTIONS.iter() {
        let run = flips_in_direction(board, mv, dr, dc, player);
        let mut curr = mv;
        for _ in 0..run {
            // run > 0 guarantees the cells exist
            if let Some(next) = curr.offset(dr, dc, board.rows(), board.cols()) {
                board.set(next, player);
                curr = next;
            }
        }
        flipped += run;
    }
    if flipped == 0 {
        return Err(MoveError::InvalidMove(mv));
    }
    board.set(mv, player);
    Ok(flipped)
}

/// 終局判定 (どちらも打てない)
pub fn is_game_over(board: &Board) -> bool {
    !has_legal_move(board, Color::First) && !has_legal_move(board, Color::Second)
}

/// `(First の石数, Second の石数)`
pub fn scores(board: &Board) -> (usize, usize) {
    (board.count(Color::First), board.count(Color::Second))
}

/// 石数の多い方。同数なら `Color::Empty`。
pub fn winner(board: &Board) -> Color {
    let (first, second) = scores(board);
    match first.cmp(&second) {
        std::cmp::Ordering::Greater => Color::First,
        std::cmp::Ordering::Less => Color::Second,
        std::cmp::Ordering::Equal => Color::Empty,
    }
}
