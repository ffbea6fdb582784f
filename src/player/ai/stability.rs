//! Disc stability (approximate).
//!
//! A disc is *stable* when no sequence of legal moves can flip it again. This
//! module does not compute that exactly. It uses two cheap passes:
//!
//! 1. **Seed**: every occupied corner is stable for its owner. From each
//!    corner we walk along its two border directions while the cells keep the
//!    corner owner's colour, marking them stable.
//! 2. **Closure**: a single row-major sweep over the remaining occupied cells.
//!    A cell becomes stable when, on each of the horizontal, vertical and main
//!    diagonal axes, at least one neighbour is either off the board or an
//!    already-stable disc of the same owner. Cells marked during the sweep count
//!    for cells visited later in the same sweep.
//!
//! The result can misclassify discs in both directions on some positions. It
//! is a heuristic input, not a rules fact.

use crate::core::{Board, Color, Position};

/// Per-cell stability mask, row-major, true where the disc is considered stable.
pub struct StabilityMap {
    cols: usize,
    stable: Vec<bool>,
}

impl StabilityMap {
    pub fn is_stable(&self, pos: Position) -> bool {
        self.stable[pos.row * self.cols + pos.col]
    }
}

// 角ごとの 2 方向 (辺に沿って内側へ)
fn corner_directions(corner: Position) -> [(isize, isize); 2] {
    let dr = if corner.row == 0 { 1 } else { -1 };
    let dc = if corner.col == 0 { 1 } else { -1 };
    [(0, dc), (dr, 0)]
}

/// Runs both passes over `board`.
pub fn compute(board: &Board) -> StabilityMap {
    let (rows, cols) = (board.rows(), board.cols());
    let mut map = StabilityMap {
        cols,
        stable: vec![false; rows * cols],
    };
    let idx = |p: Position| p.row * cols + p.col;

    // 1. 角から辺に沿って伝播
    for corner in board.corners() {
        let owner = board.get(corner);
        if owner == Color::Empty {
            continue;
        }
        map.stable[idx(corner)] = true;
        for (dr, dc) in corner_directions(corner) {
            let mut curr = corner;
            while let Some(next) = curr.offset(dr, dc, rows, cols) {
                if board.get(next) != owner {
                    break;
                }
                map.stable[idx(next)] = true;
                curr = next;
            }
        }
    }

    // 2. 横・縦・斜めの 3 軸すべてで安定な隣接石 (または盤端) があれば安定
    const AXES: [[(isize, isize); 2]; 3] = [
        [(0, -1), (0, 1)],
        [(-1, 0), (1, 0)],
        [(-1, -1), (1, 1)],
    ];
    for pos in board.positions() {
        let owner = board.get(pos);
        if owner == Color::Empty || board.is_corner(pos) || map.stable[idx(pos)] {
            continue;
        }
        let anchored = AXES.iter().all(|axis| {
            axis.iter().any(|&(dr, dc)| match pos.offset(dr, dc, rows, cols) {
                None => true,
                Some(n) => board.get(n) == owner && map.stable[idx(n)],
            })
        });
        if anchored {
            map.stable[idx(pos)] = true;
        }
    }

    map
}

/// `(perspective の安定石数, 相手の安定石数)`
pub fn count_stable(board: &Board, perspective: Color) -> (i32, i32) {
    let map = compute(board);
    let opponent = perspective.opponent();
    let mut own = 0;
    let mut other = 0;
    for pos in board.positions() {
        if !map.is_stable(pos) {
            continue;
        }
        match board.get(pos) {
            c if c == perspective => own += 1,
            c if c == opponent => other += 1,
            _ => {}
        }
    }
    (own, other)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::setup_from_strings;

    #[test]
    fn test_full_line_from_corner_is_stable() {
        let board = setup_from_strings(&[
            "BBBBBBBB",
            "........",
            "........",
            "...WB...",
            "...BW...",
            "........",
            "........",
            "........",
        ])
        .unwrap();
        let map = compute(&board);
        for c in 0..8 {
            assert!(map.is_stable(Position::new(0, c)), "col {} not stable", c);
        }
        assert_eq!(count_stable(&board, Color::First).0, 8);
    }

    #[test]
    fn test_corner_walk_stops_at_gap() {
        let board = setup_from_strings(&[
            "WWW.W...",
            "W.......",
            "........",
            "...WB...",
            "...BW...",
            "........",
            "........",
            "........",
        ])
        .unwrap();
        let map = compute(&board);
        assert!(map.is_stable(Position::new(0, 0)));
        assert!(map.is_stable(Position::new(0, 2)));
        assert!(map.is_stable(Position::new(1, 0)));
        // (0,3) が空いているので (0,4) には届かない
        assert!(!map.is_stable(Position::new(0, 4)));
    }

    #[test]
    fn test_isolated_disc_is_not_stable() {
        let board = setup_from_strings(&[
            "........",
            "........",
            "........",
            "...B....",
            "........",
            "........",
            "........",
            "........",
        ])
        .unwrap();
        assert!(!compute(&board).is_stable(Position::new(3, 3)));
        assert_eq!(count_stable(&board, Color::First), (0, 0));
    }

    #[test]
    fn test_closure_extends_from_anchored_neighbours() {
        // (1,1) は左・上・左上がすべて安定な黒石
        let board = setup_from_strings(&[
            "BBB.....",
            "BB......",
            "B.......",
            "........",
            "........",
            "........",
            "........",
            "........",
        ])
        .unwrap();
        let map = compute(&board);
        assert!(map.is_stable(Position::new(1, 1)));
    }

    #[test]
    fn test_counts_both_owners() {
        let board = setup_from_strings(&["B..W", "....", "....", "W..B"]).unwrap();
        assert_eq!(count_stable(&board, Color::First), (2, 2));
        assert_eq!(count_stable(&board, Color::Second), (2, 2));
    }
}
