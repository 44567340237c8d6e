//! Conversion between [`Board`] and the integer grid exchanged with callers:
//! row-major, row 0 on top, 0 empty, 1 player one, 2 player two.

use super::board::{Board, Cell};
use crate::error::BoardError;

impl Board {
    /// Build a board from a caller grid, checking it is exactly
    /// `rows` x `cols` and holds only 0, 1 or 2.
    pub fn from_grid(grid: &[Vec<i64>], rows: usize, cols: usize) -> Result<Board, BoardError> {
        if grid.len() != rows || grid.iter().any(|line| line.len() != cols) {
            return Err(BoardError::InvalidBoardShape {
                expected_rows: rows,
                expected_cols: cols,
                rows: grid.len(),
                cols: grid.iter().map(Vec::len).collect(),
            });
        }

        let mut board = Board::with_size(rows, cols);
        for (row, line) in grid.iter().enumerate() {
            for (col, &value) in line.iter().enumerate() {
                let cell = Cell::from_code(value)
                    .ok_or(BoardError::InvalidCellValue { row, col, value })?;
                board.set(row, col, cell);
            }
        }
        Ok(board)
    }

    pub fn to_grid(&self) -> Vec<Vec<i64>> {
        (0..self.rows())
            .map(|row| (0..self.cols()).map(|col| self.get(row, col).code()).collect())
            .collect()
    }
}
