use std::path::PathBuf;

/// Rejections of an externally supplied grid, raised before any search runs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("board must be {expected_rows}x{expected_cols}, got {rows} rows with column counts {cols:?}")]
    InvalidBoardShape {
        expected_rows: usize,
        expected_cols: usize,
        rows: usize,
        cols: Vec<usize>,
    },

    #[error("cell ({row}, {col}) holds {value}, expected 0, 1 or 2")]
    InvalidCellValue { row: usize, col: usize, value: i64 },
}

/// Errors from applying a player's move to a board or game.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column {0} is off the board")]
    InvalidColumn(usize),

    #[error("column {0} is full")]
    ColumnFull(usize),

    #[error("game is already over")]
    GameOver,
}

/// Errors from the move selector.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("no legal column: the board is full")]
    BoardFull,
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
