use crate::game::GameState;

use super::selector::{MoveSelector, SearchConfig};

/// Anything that can choose a column for the side to move.
pub trait Agent {
    /// Select a legal column for `state.current_player()`, or `None` when the
    /// game is over or no column is open.
    fn select_action(&mut self, state: &GameState) -> Option<usize>;

    /// Return the agent's display name.
    fn name(&self) -> &str;
}

/// Alpha-beta search agent. Plays whichever side is on turn.
pub struct MinimaxAgent {
    selector: MoveSelector,
}

impl MinimaxAgent {
    pub fn new(config: SearchConfig, win_length: usize) -> Self {
        MinimaxAgent {
            selector: MoveSelector::new(config, win_length),
        }
    }

    pub fn selector(&self) -> &MoveSelector {
        &self.selector
    }
}

impl Agent for MinimaxAgent {
    fn select_action(&mut self, state: &GameState) -> Option<usize> {
        if state.is_terminal() {
            return None;
        }
        let mut board = state.board().clone();
        self.selector
            .for_player(state.current_player())
            .select(&mut board)
            .ok()
    }

    fn name(&self) -> &str {
        "Minimax"
    }
}
