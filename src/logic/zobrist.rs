use crate::core::board::MAX_DIMENSION;
use crate::core::{Board, Color, Move};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::OnceLock;

const CELLS: usize = MAX_DIMENSION * MAX_DIMENSION;
const COLORS: usize = 2;
// 固定シードにしてプロセス間でもキーを再現可能にする
const SEED: u64 = 0x0DE1_1057_4A7E_51A5;

// Zobrist Hash用の乱数テーブル
struct ZobristTable {
    discs: [[u64; COLORS]; CELLS],
    last_move: [u64; CELLS],
    mover: [u64; COLORS],
    perspective: [u64; COLORS],
}

static ZOBRIST_TABLE: OnceLock<ZobristTable> = OnceLock::new();

fn get_zobrist_table() -> &'static ZobristTable {
    ZOBRIST_TABLE.get_or_init(|| {
        let mut rng = StdRng::seed_from_u64(SEED);
        let mut table = ZobristTable {
            discs: [[0; COLORS]; CELLS],
            last_move: [0; CELLS],
            mover: [0; COLORS],
            perspective: [0; COLORS],
        };

        for cell in table.discs.iter_mut() {
            for v in cell.iter_mut() {
                *v = rng.gen();
            }
        }
        for v in table.last_move.iter_mut() {
            *v = rng.gen();
        }
        for v in table.mover.iter_mut().chain(table.perspective.iter_mut()) {
            *v = rng.gen();
        }

        table
    })
}

fn color_index(color: Color) -> Option<usize> {
    match color {
        Color::First => Some(0),
        Color::Second => Some(1),
        Color::Empty => None,
    }
}

// 盤面サイズが違っても同じマスが同じ乱数を使うよう MAX_DIMENSION 幅で添字を取る
fn cell_index(pos: Move) -> usize {
    pos.row * MAX_DIMENSION + pos.col
}

/// Evaluation cache key: board contents, the move that produced them, who
/// played it, and whose point of view the score is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub board_hash: u64,
    pub last_move: Option<Move>,
    pub mover: Color,
    pub perspective: Color,
}

pub struct ZobristHasher;

impl ZobristHasher {
    pub fn hash_board(board: &Board) -> u64 {
        let table = get_zobrist_table();
        let mut hash = ((board.rows() as u64) << 32) | board.cols() as u64;

        for pos in board.positions() {
            if let Some(c) = color_index(board.get(pos)) {
                hash ^= table.discs[cell_index(pos)][c];
            }
        }
        hash
    }

    pub fn cache_key(
        board: &Board,
        last_move: Option<Move>,
        mover: Color,
        perspective: Color,
    ) -> CacheKey {
        let table = get_zobrist_table();
        let mut hash = Self::hash_board(board);
        if let Some(mv) = last_move {
            hash ^= table.last_move[cell_index(mv)];
        }
        if let Some(c) = color_index(mover) {
            hash ^= table.mover[c];
        }
        if let Some(c) = color_index(perspective) {
            hash ^= table.perspective[c];
        }
        CacheKey {
            board_hash: hash,
            last_move,
            mover,
            perspective,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{standard_setup, Position};
    use crate::logic::apply_move;

    #[test]
    fn test_same_board_same_key() {
        let a = standard_setup(8, 8).unwrap();
        let b = standard_setup(8, 8).unwrap();
        let mv = Some(Position::new(2, 3));
        assert_eq!(
            ZobristHasher::cache_key(&a, mv, Color::First, Color::First),
            ZobristHasher::cache_key(&b, mv, Color::First, Color::First)
        );
    }

    #[test]
    fn test_key_separates_move_mover_and_board() {
        let board = standard_setup(8, 8).unwrap();
        let mv = Some(Position::new(2, 3));
        let base = ZobristHasher::cache_key(&board, mv, Color::First, Color::First);
        assert_ne!(
            base,
            ZobristHasher::cache_key(&board, mv, Color::Second, Color::First)
        );
        assert_ne!(
            base,
            ZobristHasher::cache_key(&board, Some(Position::new(3, 2)), Color::First, Color::First)
        );

        let mut moved = board.clone();
        apply_move(&mut moved, Position::new(2, 3), Color::First).unwrap();
        assert_ne!(
            ZobristHasher::hash_board(&board),
            ZobristHasher::hash_board(&moved)
        );
    }

    #[test]
    fn test_dimensions_are_hashed() {
        let a = Board::new(8, 8).unwrap();
        let b = Board::new(8, 10).unwrap();
        assert_ne!(ZobristHasher::hash_board(&a), ZobristHasher::hash_board(&b));
    }
}
