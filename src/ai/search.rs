use crate::game::{is_winning_move, Board, Player};

/// Score of a position where the maximizer has just completed a line.
pub const WIN_SCORE: i32 = 1000;

/// Open alpha-beta window bounds.
pub const NEG_INF: i32 = i32::MIN;
pub const POS_INF: i32 = i32::MAX;

/// Depth-limited minimax with alpha-beta pruning over a board that is
/// mutated in place and restored on the way back up.
///
/// Only completed lines score: the maximizer completing one is `WIN_SCORE`,
/// the minimizer completing one is `-WIN_SCORE`, and both depth exhaustion
/// and a full board are 0.
#[derive(Debug, Clone)]
pub struct Searcher {
    maximizer: Player,
    win_length: usize,
    nodes: u64,
}

impl Searcher {
    pub fn new(maximizer: Player, win_length: usize) -> Self {
        Searcher {
            maximizer,
            win_length,
            nodes: 0,
        }
    }

    /// Nodes visited since construction.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Evaluate `board` with `depth` plies left. `maximizing` selects the
    /// side to move: the maximizer when true, its opponent otherwise.
    /// Columns are tried in ascending order; a placement that completes a
    /// line ends the node at once without looking at its siblings.
    pub fn evaluate(
        &mut self,
        board: &mut Board,
        depth: u32,
        maximizing: bool,
        mut alpha: i32,
        mut beta: i32,
    ) -> i32 {
        self.nodes += 1;
        if depth == 0 {
            return 0;
        }

        let mover = if maximizing {
            self.maximizer
        } else {
            self.maximizer.other()
        };
        let mut best: Option<i32> = None;

        for col in 0..board.cols() {
            let Some(mut placed) = board.place_scoped(col, mover) else {
                continue;
            };

            if is_winning_move(&placed, placed.row(), col, mover, self.win_length) {
                return if maximizing { WIN_SCORE } else { -WIN_SCORE };
            }

            let score = self.evaluate(&mut placed, depth - 1, !maximizing, alpha, beta);
            drop(placed);

            if maximizing {
                let value = best.map_or(score, |b| b.max(score));
                best = Some(value);
                alpha = alpha.max(value);
            } else {
                let value = best.map_or(score, |b| b.min(score));
                best = Some(value);
                beta = beta.min(value);
            }

            if beta <= alpha {
                break;
            }
        }

        // No legal column: the board is full.
        best.unwrap_or(0)
    }
}
