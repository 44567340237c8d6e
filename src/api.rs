//! Request and response shapes for asking the engine for a move, plus the
//! entry point every transport goes through.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::ai::MoveSelector;
use crate::config::AppConfig;
use crate::error::{BoardError, SearchError};
use crate::game::Board;

/// `{"board": [[0, 0, ...], ...]}`: row-major, row 0 on top, 0 empty,
/// 1 player one, 2 player two.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    pub board: Vec<Vec<i64>>,
}

/// `{"column": n}`, or `{"column": null}` when the board is full.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveResponse {
    pub column: Option<usize>,
}

/// Validate the request grid against the configured board and pick the
/// engine's column.
pub fn compute_move(request: &MoveRequest, config: &AppConfig) -> Result<MoveResponse, BoardError> {
    let mut board = Board::from_grid(&request.board, config.board.rows, config.board.cols)
        .inspect_err(|err| warn!(%err, "rejected move request"))?;

    if !board.is_settled() {
        warn!("request board has pieces above empty cells");
    }

    let selector = MoveSelector::new(config.search, config.board.win_length);
    let column = match selector.select(&mut board) {
        Ok(column) => Some(column),
        Err(SearchError::BoardFull) => None,
    };

    info!(
        column = ?column,
        pieces = board.piece_count(),
        depth = config.search.depth,
        "computed move"
    );
    Ok(MoveResponse { column })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(json: &str) -> MoveRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn empty_board_answers_first_column() {
        let req = request(
            r#"{"board": [
                [0,0,0,0,0,0,0],
                [0,0,0,0,0,0,0],
                [0,0,0,0,0,0,0],
                [0,0,0,0,0,0,0],
                [0,0,0,0,0,0,0],
                [0,0,0,0,0,0,0]
            ]}"#,
        );
        let resp = compute_move(&req, &AppConfig::default()).unwrap();
        assert_eq!(resp, MoveResponse { column: Some(0) });
        assert_eq!(serde_json::to_string(&resp).unwrap(), r#"{"column":0}"#);
    }

    #[test]
    fn completes_own_line() {
        let req = request(
            r#"{"board": [
                [0,0,0,0,0,0,0],
                [0,0,0,0,0,0,0],
                [0,0,0,0,0,0,0],
                [0,0,0,0,0,0,0],
                [0,0,0,0,0,0,1],
                [2,2,2,0,0,1,1]
            ]}"#,
        );
        let resp = compute_move(&req, &AppConfig::default()).unwrap();
        assert_eq!(resp.column, Some(3));
    }

    #[test]
    fn blocks_opponent_line() {
        let req = request(
            r#"{"board": [
                [0,0,0,0,0,0,0],
                [0,0,0,0,0,0,0],
                [0,0,0,0,0,0,0],
                [0,0,0,0,0,0,0],
                [2,2,0,0,0,0,0],
                [1,1,1,0,0,0,0]
            ]}"#,
        );
        let resp = compute_move(&req, &AppConfig::default()).unwrap();
        assert_eq!(resp.column, Some(3));
    }

    #[test]
    fn full_board_answers_null() {
        // Column-wise alternation in pairs never lines up four.
        let rows = [
            "[2,1,2,1,2,1,2]",
            "[2,1,2,1,2,1,1]",
            "[2,1,2,1,2,1,2]",
            "[1,2,1,2,1,2,1]",
            "[1,2,1,2,1,2,2]",
            "[1,2,1,2,1,2,1]",
        ];
        let req = request(&format!(r#"{{"board": [{}]}}"#, rows.join(",")));
        let resp = compute_move(&req, &AppConfig::default()).unwrap();
        assert_eq!(resp, MoveResponse { column: None });
        assert_eq!(serde_json::to_string(&resp).unwrap(), r#"{"column":null}"#);
    }

    #[test]
    fn rejects_wrong_shape() {
        let req = request(r#"{"board": [[0,0,0],[0,0,0]]}"#);
        assert!(matches!(
            compute_move(&req, &AppConfig::default()),
            Err(BoardError::InvalidBoardShape { rows: 2, .. })
        ));
    }

    #[test]
    fn rejects_bad_cell_value() {
        let mut grid = vec![vec![0; 7]; 6];
        grid[0][3] = 7;
        let req = MoveRequest { board: grid };
        assert_eq!(
            compute_move(&req, &AppConfig::default()),
            Err(BoardError::InvalidCellValue {
                row: 0,
                col: 3,
                value: 7
            })
        );
    }

    #[test]
    fn honours_configured_dimensions() {
        let mut config = AppConfig::default();
        config.board.rows = 4;
        config.board.cols = 5;
        config.board.win_length = 3;

        let six_by_seven = MoveRequest {
            board: vec![vec![0; 7]; 6],
        };
        assert!(compute_move(&six_by_seven, &config).is_err());

        let mut grid = vec![vec![0; 5]; 4];
        grid[3][1] = 2;
        grid[3][2] = 2;
        grid[3][4] = 1;
        grid[2][4] = 1;
        let resp = compute_move(&MoveRequest { board: grid }, &config).unwrap();
        assert_eq!(resp.column, Some(0));
    }
}
