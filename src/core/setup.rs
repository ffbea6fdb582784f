use crate::core::{Board, BoardError, Color, Position};

/// 標準の初期配置 (中央 4 マス)
///
/// For an `r × c` board the centre block is `(r/2-1, c/2-1) = W`,
/// `(r/2-1, c/2) = B`, `(r/2, c/2-1) = B`, `(r/2, c/2) = W`.
pub fn standard_setup(rows: usize, cols: usize) -> Result<Board, BoardError> {
    let mut board = Board::new(rows, cols)?;
    let (r, c) = (rows / 2, cols / 2);
    board.set(Position::new(r - 1, c - 1), Color::Second);
    board.set(Position::new(r - 1, c), Color::First);
    board.set(Position::new(r, c - 1), Color::First);
    board.set(Position::new(r, c), Color::Second);
    Ok(board)
}

/// 文字列配列から盤面を初期化する
///
/// Each row is a string of `B`, `W` or `.` (whitespace ignored), so both
/// `"B.W."` and `"B . W ."` are accepted.
pub fn setup_from_strings(setup: &[&str]) -> Result<Board, BoardError> {
    let rows: Vec<Vec<char>> = setup
        .iter()
        .map(|row| row.chars().filter(|c| !c.is_whitespace()).collect())
        .collect();
    let height = rows.len();
    let width = rows.first().map_or(0, |r| r.len());
    let mut board = Board::new(height, width)?;

    for (r, row) in rows.iter().enumerate() {
        if row.len() != width {
            return Err(BoardError::RaggedRow {
                row: r,
                expected: width,
                got: row.len(),
            });
        }
        for (c, &ch) in row.iter().enumerate() {
            let color = Color::from_char(ch).ok_or(BoardError::InvalidCell {
                character: ch,
                row: r,
                col: c,
            })?;
            board.set(Position::new(r, c), color);
        }
    }
    Ok(board)
}
