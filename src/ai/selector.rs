use std::thread;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::search::{Searcher, NEG_INF, POS_INF, WIN_SCORE};
use crate::error::SearchError;
use crate::game::{is_winning_move, Board, Player};

/// Plies searched below each root move.
pub const SEARCH_DEPTH: u32 = 4;

/// Search settings, loadable from the `[search]` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub depth: u32,
    /// Side the engine moves for; scores are from its point of view.
    pub maximizer: Player,
    /// Score root columns on separate threads, each with its own board copy
    /// and a fresh window. Results are identical to the sequential loop.
    pub parallel_root: bool,
    /// Score a root move that completes a line as a win without recursing.
    pub root_win_check: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            depth: SEARCH_DEPTH,
            maximizer: Player::Two,
            parallel_root: false,
            root_win_check: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnScore {
    pub column: usize,
    pub score: i32,
}

/// Outcome of scoring every legal root column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RootScores {
    pub scores: Vec<ColumnScore>,
    pub nodes: u64,
}

impl RootScores {
    /// First column with the strictly greatest score, scanning left to right.
    pub fn best(&self) -> Option<ColumnScore> {
        let mut best: Option<ColumnScore> = None;
        for &candidate in &self.scores {
            if best.map_or(true, |b| candidate.score > b.score) {
                best = Some(candidate);
            }
        }
        best
    }
}

/// Picks a column for the maximizer by searching every legal root move.
#[derive(Debug, Clone)]
pub struct MoveSelector {
    config: SearchConfig,
    win_length: usize,
}

impl MoveSelector {
    pub fn new(config: SearchConfig, win_length: usize) -> Self {
        MoveSelector { config, win_length }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Same settings, searching for `player` instead.
    pub fn for_player(&self, player: Player) -> Self {
        let mut config = self.config;
        config.maximizer = player;
        MoveSelector::new(config, self.win_length)
    }

    /// Best column for the maximizer, or `BoardFull` if nothing is legal.
    /// The board is left exactly as it was passed in.
    pub fn select(&self, board: &mut Board) -> Result<usize, SearchError> {
        let root = self.score_columns(board);
        let best = root.best().ok_or(SearchError::BoardFull)?;
        debug!(
            column = best.column,
            score = best.score,
            nodes = root.nodes,
            "selected column"
        );
        Ok(best.column)
    }

    /// Score each legal column in ascending order.
    pub fn score_columns(&self, board: &mut Board) -> RootScores {
        let root = if self.config.parallel_root {
            self.score_columns_parallel(board)
        } else {
            self.score_columns_sequential(board)
        };
        for cs in &root.scores {
            debug!(column = cs.column, score = cs.score, "scored root column");
        }
        root
    }

    fn score_columns_sequential(&self, board: &mut Board) -> RootScores {
        let mut searcher = Searcher::new(self.config.maximizer, self.win_length);
        let scores = (0..board.cols())
            .filter_map(|column| {
                self.score_root_move(board, column, &mut searcher)
                    .map(|score| ColumnScore { column, score })
            })
            .collect();
        RootScores {
            scores,
            nodes: searcher.nodes(),
        }
    }

    fn score_columns_parallel(&self, board: &Board) -> RootScores {
        let columns = board.legal_columns();
        let results: Vec<(ColumnScore, u64)> = thread::scope(|scope| {
            let handles: Vec<_> = columns
                .into_iter()
                .map(|column| {
                    let mut local = board.clone();
                    scope.spawn(move || {
                        let mut searcher = Searcher::new(self.config.maximizer, self.win_length);
                        let score = self
                            .score_root_move(&mut local, column, &mut searcher)
                            .unwrap_or(0);
                        (ColumnScore { column, score }, searcher.nodes())
                    })
                })
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().unwrap_or_else(|e| std::panic::resume_unwind(e)))
                .collect()
        });

        RootScores {
            nodes: results.iter().map(|(_, n)| n).sum(),
            scores: results.into_iter().map(|(cs, _)| cs).collect(),
        }
    }

    /// `None` when `column` cannot take a piece.
    fn score_root_move(
        &self,
        board: &mut Board,
        column: usize,
        searcher: &mut Searcher,
    ) -> Option<i32> {
        let me = self.config.maximizer;
        let mut placed = board.place_scoped(column, me)?;
        if self.config.root_win_check
            && is_winning_move(&placed, placed.row(), column, me, self.win_length)
        {
            return Some(WIN_SCORE);
        }
        Some(searcher.evaluate(&mut placed, self.config.depth, false, NEG_INF, POS_INF))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Cell, COLS, ROWS, WINNING_LENGTH};

    fn selector() -> MoveSelector {
        MoveSelector::new(SearchConfig::default(), WINNING_LENGTH)
    }

    fn board_with(pieces: &[(usize, usize, Player)]) -> Board {
        let mut board = Board::new();
        for &(row, col, player) in pieces {
            board.place(row, col, player);
        }
        assert!(board.is_settled());
        board
    }

    #[test]
    fn empty_board_picks_first_column() {
        let mut board = Board::new();
        let root = selector().score_columns(&mut board);
        assert_eq!(root.scores.len(), COLS);
        assert!(root.scores.iter().all(|cs| cs.score == 0));
        assert_eq!(selector().select(&mut board), Ok(0));
        assert_eq!(board, Board::new());
    }

    #[test]
    fn takes_immediate_horizontal_win() {
        let mut board = board_with(&[
            (5, 0, Player::Two),
            (5, 1, Player::Two),
            (5, 2, Player::Two),
            (5, 6, Player::One),
            (4, 6, Player::One),
            (5, 5, Player::One),
        ]);
        let root = selector().score_columns(&mut board);
        assert_eq!(
            root.best(),
            Some(ColumnScore {
                column: 3,
                score: WIN_SCORE
            })
        );
        assert_eq!(selector().select(&mut board), Ok(3));
    }

    #[test]
    fn unchecked_root_loses_sight_of_blocked_win() {
        // Same position as above. Without the root check the completed line
        // is only noticed if a later piece extends it, and blocking column 4
        // prevents that, so every column ties at 0.
        let mut board = board_with(&[
            (5, 0, Player::Two),
            (5, 1, Player::Two),
            (5, 2, Player::Two),
            (5, 6, Player::One),
            (4, 6, Player::One),
            (5, 5, Player::One),
        ]);
        let config = SearchConfig {
            root_win_check: false,
            ..SearchConfig::default()
        };
        let root = MoveSelector::new(config, WINNING_LENGTH).score_columns(&mut board);
        assert!(root.scores.iter().all(|cs| cs.score == 0));
        assert_eq!(root.best().map(|cs| cs.column), Some(0));
    }

    #[test]
    fn blocks_single_threat() {
        let mut board = board_with(&[
            (5, 0, Player::One),
            (5, 1, Player::One),
            (5, 2, Player::One),
            (4, 0, Player::Two),
            (4, 1, Player::Two),
        ]);
        let root = selector().score_columns(&mut board);
        for cs in &root.scores {
            if cs.column == 3 {
                assert_eq!(cs.score, 0);
            } else {
                assert_eq!(cs.score, -WIN_SCORE, "column {}", cs.column);
            }
        }
        assert_eq!(selector().select(&mut board), Ok(3));
    }

    #[test]
    fn full_board_has_no_move() {
        let mut board = Board::new();
        for col in 0..COLS {
            for _ in 0..ROWS {
                board.drop_piece(col, Player::One).unwrap();
            }
        }
        assert_eq!(selector().select(&mut board), Err(SearchError::BoardFull));
        assert!(selector().score_columns(&mut board).scores.is_empty());
    }

    #[test]
    fn skips_full_columns() {
        let mut board = Board::new();
        for _ in 0..ROWS {
            board.drop_piece(0, Player::One).unwrap();
        }
        let root = selector().score_columns(&mut board);
        let columns: Vec<usize> = root.scores.iter().map(|cs| cs.column).collect();
        assert_eq!(columns, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(selector().select(&mut board), Ok(1));
    }

    #[test]
    fn selection_is_deterministic() {
        let mut board = board_with(&[
            (5, 3, Player::One),
            (4, 3, Player::Two),
            (5, 4, Player::One),
        ]);
        let first = selector().select(&mut board);
        for _ in 0..5 {
            assert_eq!(selector().select(&mut board), first);
        }
    }

    #[test]
    fn parallel_root_matches_sequential() {
        let mut board = board_with(&[
            (5, 0, Player::One),
            (5, 1, Player::One),
            (5, 2, Player::One),
            (4, 0, Player::Two),
            (4, 1, Player::Two),
        ]);
        let parallel = MoveSelector::new(
            SearchConfig {
                parallel_root: true,
                ..SearchConfig::default()
            },
            WINNING_LENGTH,
        );
        let seq = selector().score_columns(&mut board);
        let par = parallel.score_columns(&mut board);
        assert_eq!(seq.scores, par.scores);
        assert_eq!(parallel.select(&mut board), Ok(3));
    }

    #[test]
    fn searches_for_configured_side() {
        // Player one to move with its own winning drop available.
        let mut board = board_with(&[
            (5, 0, Player::One),
            (5, 1, Player::One),
            (5, 2, Player::One),
            (4, 0, Player::Two),
            (4, 1, Player::Two),
        ]);
        let for_one = selector().for_player(Player::One);
        assert_eq!(for_one.config().maximizer, Player::One);
        assert_eq!(for_one.select(&mut board), Ok(3));
        assert_eq!(board.get(5, 3), Cell::Empty);
    }

    #[test]
    fn best_keeps_first_of_equal_scores() {
        let root = RootScores {
            scores: vec![
                ColumnScore { column: 2, score: 0 },
                ColumnScore { column: 4, score: WIN_SCORE },
                ColumnScore { column: 5, score: WIN_SCORE },
            ],
            nodes: 0,
        };
        assert_eq!(root.best().map(|cs| cs.column), Some(4));
        assert_eq!(RootScores::default().best(), None);
    }
}
