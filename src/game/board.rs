use std::ops::{Deref, DerefMut};

use serde::{Deserialize, Serialize};

use super::player::Player;
use super::win;
use crate::error::MoveError;

pub const ROWS: usize = 6;
pub const COLS: usize = 7;
pub const WINNING_LENGTH: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    PlayerOne,
    PlayerTwo,
}

impl Cell {
    /// Wire code used by the move request grid: 0 empty, 1 / 2 per player.
    pub fn code(self) -> i64 {
        match self {
            Cell::Empty => 0,
            Cell::PlayerOne => 1,
            Cell::PlayerTwo => 2,
        }
    }

    pub fn from_code(code: i64) -> Option<Cell> {
        match code {
            0 => Some(Cell::Empty),
            1 => Some(Cell::PlayerOne),
            2 => Some(Cell::PlayerTwo),
            _ => None,
        }
    }
}

/// Grid dimensions and line length, loadable from the `[board]` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub rows: usize,
    pub cols: usize,
    pub win_length: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            rows: ROWS,
            cols: COLS,
            win_length: WINNING_LENGTH,
        }
    }
}

/// Row-major grid. Row 0 is the top, row `rows - 1` the bottom; pieces
/// settle on the lowest empty row of a column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty 6x7 board
    pub fn new() -> Self {
        Self::with_size(ROWS, COLS)
    }

    pub fn with_size(rows: usize, cols: usize) -> Self {
        Board {
            rows,
            cols,
            cells: vec![Cell::Empty; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Get the cell at a specific position
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row * self.cols + col]
    }

    pub(super) fn set(&mut self, row: usize, col: usize, cell: Cell) {
        self.cells[row * self.cols + col] = cell;
    }

    /// True iff `col` is on the board and its top cell is empty.
    pub fn is_legal(&self, col: usize) -> bool {
        col < self.cols && self.get(0, col) == Cell::Empty
    }

    /// Check if a column is full (out-of-range columns count as full)
    pub fn is_column_full(&self, col: usize) -> bool {
        !self.is_legal(col)
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        (0..self.cols).all(|col| self.is_column_full(col))
    }

    /// Columns that can still take a piece, in ascending order.
    pub fn legal_columns(&self) -> Vec<usize> {
        (0..self.cols).filter(|&col| self.is_legal(col)).collect()
    }

    /// Lowest empty row of `col`, or `None` when the column is full or off
    /// the board.
    pub fn drop_row(&self, col: usize) -> Option<usize> {
        if col >= self.cols {
            return None;
        }
        (0..self.rows)
            .rev()
            .find(|&row| self.get(row, col) == Cell::Empty)
    }

    /// Put `player`'s piece on an empty cell.
    pub fn place(&mut self, row: usize, col: usize, player: Player) {
        debug_assert_eq!(
            self.get(row, col),
            Cell::Empty,
            "place on occupied cell ({row}, {col})"
        );
        self.set(row, col, player.to_cell());
    }

    /// Clear a cell filled by a matching `place`.
    pub fn undo(&mut self, row: usize, col: usize) {
        debug_assert_ne!(
            self.get(row, col),
            Cell::Empty,
            "undo on empty cell ({row}, {col})"
        );
        self.set(row, col, Cell::Empty);
    }

    /// Drop `player`'s piece into `col` for the lifetime of the returned
    /// guard. The piece is removed again when the guard is dropped, on every
    /// exit path. Returns `None` for a full or out-of-range column.
    pub fn place_scoped(&mut self, col: usize, player: Player) -> Option<Placement<'_>> {
        let row = self.drop_row(col)?;
        self.place(row, col, player);
        Some(Placement {
            board: self,
            row,
            col,
        })
    }

    /// Drop a piece in a column, returns the row where it landed
    pub fn drop_piece(&mut self, col: usize, player: Player) -> Result<usize, MoveError> {
        if col >= self.cols {
            return Err(MoveError::InvalidColumn(col));
        }
        let row = self.drop_row(col).ok_or(MoveError::ColumnFull(col))?;
        self.place(row, col, player);
        Ok(row)
    }

    /// Check if the piece at (row, col) completes a line of `win_length`
    pub fn check_win(&self, row: usize, col: usize, win_length: usize) -> bool {
        match Player::from_cell(self.get(row, col)) {
            Some(player) => win::is_winning_move(self, row, col, player, win_length),
            None => false,
        }
    }

    /// No column holds a piece above an empty cell.
    pub fn is_settled(&self) -> bool {
        (0..self.cols).all(|col| {
            (1..self.rows).all(|row| {
                self.get(row - 1, col) == Cell::Empty || self.get(row, col) != Cell::Empty
            })
        })
    }

    pub fn piece_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != Cell::Empty).count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// A piece placed through [`Board::place_scoped`]; undone on drop.
pub struct Placement<'a> {
    board: &'a mut Board,
    row: usize,
    col: usize,
}

impl Placement<'_> {
    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }
}

impl Deref for Placement<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        &*self.board
    }
}

impl DerefMut for Placement<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        &mut *self.board
    }
}

impl Drop for Placement<'_> {
    fn drop(&mut self) {
        self.board.undo(self.row, self.col);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        for row in 0..ROWS {
            for col in 0..COLS {
                assert_eq!(board.get(row, col), Cell::Empty);
            }
        }
        assert_eq!(board.piece_count(), 0);
    }

    #[test]
    fn test_drop_piece() {
        let mut board = Board::new();

        let row = board.drop_piece(3, Player::One).unwrap();
        assert_eq!(row, 5);
        assert_eq!(board.get(5, 3), Cell::PlayerOne);

        let row = board.drop_piece(3, Player::Two).unwrap();
        assert_eq!(row, 4);
        assert_eq!(board.get(4, 3), Cell::PlayerTwo);
    }

    #[test]
    fn test_column_full() {
        let mut board = Board::new();
        for _ in 0..ROWS {
            board.drop_piece(0, Player::One).unwrap();
        }

        assert!(board.is_column_full(0));
        assert_eq!(board.drop_row(0), None);
        assert_eq!(board.drop_piece(0, Player::Two), Err(MoveError::ColumnFull(0)));
    }

    #[test]
    fn test_invalid_column() {
        let mut board = Board::new();
        assert!(!board.is_legal(7));
        assert_eq!(board.drop_row(7), None);
        assert_eq!(board.drop_piece(7, Player::One), Err(MoveError::InvalidColumn(7)));
    }

    #[test]
    fn test_legality_tracks_top_cell() {
        let mut board = Board::new();
        for filled in 1..=ROWS {
            let row = board.drop_row(2).unwrap();
            board.place(row, 2, Player::Two);
            // Only the last piece occupies row 0.
            assert_eq!(board.is_legal(2), filled < ROWS);
            assert_eq!(board.is_legal(2), board.get(0, 2) == Cell::Empty);
        }
    }

    #[test]
    fn test_place_undo_restores_board() {
        let mut board = Board::new();
        board.drop_piece(1, Player::One).unwrap();
        board.drop_piece(4, Player::Two).unwrap();
        let before = board.clone();

        for col in 0..COLS {
            let row = board.drop_row(col).unwrap();
            board.place(row, col, Player::Two);
            assert_ne!(board, before);
            board.undo(row, col);
            assert_eq!(board, before);
        }
    }

    #[test]
    fn test_scoped_placement_undoes_on_drop() {
        let mut board = Board::new();
        board.drop_piece(3, Player::One).unwrap();
        let before = board.clone();

        {
            let placed = board.place_scoped(3, Player::Two).unwrap();
            assert_eq!(placed.row(), 4);
            assert_eq!(placed.col(), 3);
            assert_eq!(placed.get(4, 3), Cell::PlayerTwo);
        }
        assert_eq!(board, before);
    }

    #[test]
    fn test_scoped_placement_nests() {
        let mut board = Board::new();
        {
            let mut outer = board.place_scoped(0, Player::One).unwrap();
            {
                let inner = outer.place_scoped(0, Player::Two).unwrap();
                assert_eq!(inner.row(), 4);
                assert_eq!(inner.piece_count(), 2);
            }
            assert_eq!(outer.piece_count(), 1);
        }
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_scoped_placement_rejects_full_column() {
        let mut board = Board::new();
        for _ in 0..ROWS {
            board.drop_piece(6, Player::One).unwrap();
        }
        assert!(board.place_scoped(6, Player::Two).is_none());
        assert!(board.place_scoped(9, Player::Two).is_none());
    }

    #[test]
    fn test_full_board() {
        let mut board = Board::new();
        for col in 0..COLS {
            for _ in 0..ROWS {
                board.drop_piece(col, Player::One).unwrap();
            }
        }
        assert!(board.is_full());
        assert!(board.legal_columns().is_empty());
    }

    #[test]
    fn test_check_win_uses_cell_owner() {
        let mut board = Board::new();
        for col in 0..4 {
            board.drop_piece(col, Player::One).unwrap();
        }
        assert!(board.check_win(5, 2, WINNING_LENGTH));
        assert!(!board.check_win(4, 2, WINNING_LENGTH));
    }

    #[test]
    fn test_settled_detects_floating_piece() {
        let mut board = Board::new();
        board.drop_piece(0, Player::One).unwrap();
        assert!(board.is_settled());

        board.set(2, 4, Cell::PlayerTwo);
        assert!(!board.is_settled());
    }

    #[test]
    fn test_custom_size() {
        let board = Board::with_size(4, 5);
        assert_eq!(board.rows(), 4);
        assert_eq!(board.cols(), 5);
        assert_eq!(board.drop_row(4), Some(3));
        assert_eq!(board.legal_columns(), vec![0, 1, 2, 3, 4]);
    }
}
