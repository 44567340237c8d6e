use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};

use crate::ai::{Agent, MinimaxAgent};
use crate::config::AppConfig;
use crate::error::MoveError;
use crate::game::{GameOutcome, GameState, Player};

/// Side the person at the keyboard plays.
pub const HUMAN: Player = Player::One;

/// Human against the search agent, with a running score across games.
pub struct App {
    config: AppConfig,
    game_state: GameState,
    computer: MinimaxAgent,
    selected_column: usize,
    scores: [u32; 2],
    should_quit: bool,
    message: Option<String>,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        let computer = MinimaxAgent::new(config.search, config.board.win_length);
        App {
            game_state: GameState::with_config(&config.board),
            selected_column: config.board.cols / 2,
            config,
            computer,
            scores: [0, 0],
            should_quit: false,
            message: None,
        }
    }

    pub fn game_state(&self) -> &GameState {
        &self.game_state
    }

    pub fn scores(&self) -> [u32; 2] {
        self.scores
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
        }
        Ok(())
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    /// Handle key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        self.message = None;

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left => {
                self.selected_column = self.selected_column.saturating_sub(1);
            }
            KeyCode::Right => {
                if self.selected_column + 1 < self.game_state.board().cols() {
                    self.selected_column += 1;
                }
            }
            KeyCode::Char(c @ '1'..='9') => {
                let col = c as usize - '1' as usize;
                if col < self.game_state.board().cols() {
                    self.selected_column = col;
                    self.drop_piece();
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.drop_piece();
            }
            KeyCode::Char('r') => {
                self.restart();
                self.message = Some("New game started!".to_string());
            }
            _ => {}
        }
    }

    /// Clear the board; scores carry over.
    pub fn restart(&mut self) {
        self.game_state = GameState::with_config(&self.config.board);
        self.selected_column = self.config.board.cols / 2;
    }

    /// Drop the human's piece in the selected column, then let the computer
    /// answer if the game is still open.
    fn drop_piece(&mut self) {
        if self.game_state.is_terminal() {
            self.message = Some("Game over! Press 'r' to restart.".to_string());
            return;
        }

        if let Err(err) = self.game_state.apply_move_mut(self.selected_column) {
            self.message = Some(
                match err {
                    MoveError::ColumnFull(_) => "Column is full!",
                    MoveError::InvalidColumn(_) => "Invalid column!",
                    MoveError::GameOver => "Game is over!",
                }
                .to_string(),
            );
            return;
        }
        if self.finish_if_over() {
            return;
        }

        match self.computer.select_action(&self.game_state) {
            Some(col) => {
                if let Err(err) = self.game_state.apply_move_mut(col) {
                    self.message = Some(format!("Computer move failed: {err}"));
                    return;
                }
                self.message = Some(format!("Computer played column {}", col + 1));
            }
            None => {
                self.message = Some("Computer has no move.".to_string());
                return;
            }
        }
        self.finish_if_over();
    }

    /// Record the result if the last move ended the game.
    fn finish_if_over(&mut self) -> bool {
        let Some(outcome) = self.game_state.outcome() else {
            return false;
        };
        self.message = Some(match outcome {
            GameOutcome::Winner(player) => {
                self.scores[player.index()] += 1;
                if player == HUMAN {
                    "You win! Press 'r' to play again.".to_string()
                } else {
                    "Computer wins! Press 'r' to play again.".to_string()
                }
            }
            GameOutcome::Draw => "It's a draw!".to_string(),
        });
        true
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        super::game_view::render(
            frame,
            &self.game_state,
            self.selected_column,
            &self.message,
            self.scores,
        );
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}
