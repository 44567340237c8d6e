//! Core drop-four rules: board representation with in-place place/undo,
//! line detection, player types, and the interactive game state machine.

mod board;
mod grid;
mod player;
mod state;
pub mod win;

pub use board::{Board, BoardConfig, Cell, Placement, COLS, ROWS, WINNING_LENGTH};
pub use player::Player;
pub use state::{GameOutcome, GameState};
pub use win::{is_winning_move, Axis};
