//! Line detection around the most recently placed piece.

use super::board::Board;
use super::player::Player;

/// The four line orientations. Each covers both opposing half-directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
    /// Bottom-left to top-right (`/`).
    Rising,
    /// Top-left to bottom-right (`\`).
    Falling,
}

impl Axis {
    pub const ALL: [Axis; 4] = [Axis::Horizontal, Axis::Vertical, Axis::Falling, Axis::Rising];

    /// (row, col) step of the positive half-direction. Rows grow downward.
    fn step(self) -> (isize, isize) {
        match self {
            Axis::Horizontal => (0, 1),
            Axis::Vertical => (1, 0),
            Axis::Falling => (1, 1),
            Axis::Rising => (1, -1),
        }
    }
}

/// Whether the piece `player` just placed at (row, col) completes a run of at
/// least `win_length` along any axis.
///
/// Only lines through (row, col) are inspected, so this is meaningful right
/// after a placement and not as a general board query.
pub fn is_winning_move(
    board: &Board,
    row: usize,
    col: usize,
    player: Player,
    win_length: usize,
) -> bool {
    winning_axis(board, row, col, player, win_length).is_some()
}

/// First axis on which the placement at (row, col) reaches `win_length`.
pub fn winning_axis(
    board: &Board,
    row: usize,
    col: usize,
    player: Player,
    win_length: usize,
) -> Option<Axis> {
    Axis::ALL.into_iter().find(|&axis| {
        let (dr, dc) = axis.step();
        let run = 1
            + count_consecutive(board, row, col, dr, dc, player)
            + count_consecutive(board, row, col, -dr, -dc, player);
        run >= win_length
    })
}

/// Same-player cells strictly beyond (row, col) walking in (dr, dc).
fn count_consecutive(
    board: &Board,
    row: usize,
    col: usize,
    dr: isize,
    dc: isize,
    player: Player,
) -> usize {
    let cell = player.to_cell();
    let mut count = 0;
    let mut r = row as isize + dr;
    let mut c = col as isize + dc;
    while r >= 0
        && c >= 0
        && (r as usize) < board.rows()
        && (c as usize) < board.cols()
        && board.get(r as usize, c as usize) == cell
    {
        count += 1;
        r += dr;
        c += dc;
    }
    count
}
