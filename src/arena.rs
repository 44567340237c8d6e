//! Head-to-head evaluation of the search agent against a random baseline.

use tracing::debug;

use crate::ai::{Agent, MinimaxAgent, RandomAgent};
use crate::config::AppConfig;
use crate::error::MoveError;
use crate::game::{GameOutcome, GameState, Player};

/// Tally of finished games from the search agent's point of view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArenaReport {
    pub games: usize,
    pub wins: usize,
    pub losses: usize,
    pub draws: usize,
}

impl ArenaReport {
    pub fn win_rate(&self) -> f32 {
        if self.games == 0 {
            return 0.0;
        }
        self.wins as f32 / self.games as f32
    }

    fn record(&mut self, outcome: GameOutcome, agent_side: Player) {
        self.games += 1;
        match outcome {
            GameOutcome::Winner(p) if p == agent_side => self.wins += 1,
            GameOutcome::Winner(_) => self.losses += 1,
            GameOutcome::Draw => self.draws += 1,
        }
    }
}

/// Play one game to the end. `one` moves first.
pub fn play_game(
    initial: GameState,
    one: &mut dyn Agent,
    two: &mut dyn Agent,
) -> Result<GameOutcome, MoveError> {
    let mut state = initial;
    while !state.is_terminal() {
        let mover: &mut dyn Agent = match state.current_player() {
            Player::One => &mut *one,
            Player::Two => &mut *two,
        };
        let column = mover.select_action(&state).ok_or(MoveError::GameOver)?;
        state.apply_move_mut(column)?;
    }
    state.outcome().ok_or(MoveError::GameOver)
}

/// Minimax against a seeded random agent for `games` games, alternating who
/// moves first. Game `i` uses seed `seed + i` for the random side.
pub fn run(config: &AppConfig, games: usize, seed: u64) -> Result<ArenaReport, MoveError> {
    let mut minimax = MinimaxAgent::new(config.search, config.board.win_length);
    let mut report = ArenaReport::default();

    for game in 0..games {
        let mut random = RandomAgent::with_seed(seed.wrapping_add(game as u64));
        let agent_side = if game % 2 == 0 { Player::One } else { Player::Two };
        let initial = GameState::with_config(&config.board);
        let outcome = match agent_side {
            Player::One => play_game(initial, &mut minimax, &mut random)?,
            Player::Two => play_game(initial, &mut random, &mut minimax)?,
        };
        debug!(game, ?agent_side, ?outcome, "arena game finished");
        report.record(outcome, agent_side);
    }

    Ok(report)
}
