use super::board::{Board, BoardConfig};
use super::player::Player;
use crate::error::MoveError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Winner(Player),
    Draw,
}

/// A game in progress: board, side to move, and outcome once decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    current_player: Player,
    outcome: Option<GameOutcome>,
    win_length: usize,
}

impl GameState {
    /// Create initial 6x7 game state; player one starts
    pub fn initial() -> Self {
        Self::with_config(&BoardConfig::default())
    }

    pub fn with_config(config: &BoardConfig) -> Self {
        GameState {
            board: Board::with_size(config.rows, config.cols),
            current_player: Player::One,
            outcome: None,
            win_length: config.win_length,
        }
    }

    /// Resume from an arbitrary position with `to_move` on turn. The outcome
    /// is left open; only later moves are checked for lines.
    pub fn from_board(board: Board, to_move: Player, win_length: usize) -> Self {
        let outcome = board.is_full().then_some(GameOutcome::Draw);
        GameState {
            board,
            current_player: to_move,
            outcome,
            win_length,
        }
    }

    /// Get current player
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn win_length(&self) -> usize {
        self.win_length
    }

    /// Get game outcome if game is over
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    /// Check if game is over
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    /// Get list of legal columns (not full)
    pub fn legal_actions(&self) -> Vec<usize> {
        if self.is_terminal() {
            return Vec::new();
        }
        self.board.legal_columns()
    }

    /// Apply a move and return new state (immutable)
    pub fn apply_move(&self, column: usize) -> Result<GameState, MoveError> {
        let mut next = self.clone();
        next.apply_move_mut(column)?;
        Ok(next)
    }

    /// Apply move mutably (for UI efficiency)
    pub fn apply_move_mut(&mut self, column: usize) -> Result<(), MoveError> {
        if self.is_terminal() {
            return Err(MoveError::GameOver);
        }

        let row = self.board.drop_piece(column, self.current_player)?;

        if self.board.check_win(row, column, self.win_length) {
            self.outcome = Some(GameOutcome::Winner(self.current_player));
        } else if self.board.is_full() {
            self.outcome = Some(GameOutcome::Draw);
        }

        self.current_player = self.current_player.other();

        Ok(())
    }
}
