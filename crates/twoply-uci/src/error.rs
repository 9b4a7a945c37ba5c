//! UCI protocol errors.

use twoply_core::PositionError;
use twoply_engine::{ConfigError, SearchError};

/// Errors that can occur during UCI protocol handling.
#[derive(Debug, thiserror::Error)]
pub enum UciError {
    /// The `position` command is missing `startpos` or `fen` keyword.
    #[error("malformed position command: missing startpos or fen keyword")]
    MalformedPosition,

    /// Failed to parse a FEN string.
    #[error("invalid FEN: {fen}")]
    InvalidFen {
        /// The FEN string that failed to parse.
        fen: String,
    },

    /// A move in the `position` command is malformed or illegal.
    #[error("invalid move: {uci_move}")]
    InvalidMove {
        /// The UCI move string that was rejected.
        uci_move: String,
    },

    /// A `go` parameter that takes a value was the last token.
    #[error("missing value for go parameter {param}")]
    MissingGoValue { param: String },

    /// A `go` parameter value could not be parsed.
    #[error("invalid value for go parameter {param}: {value}")]
    InvalidGoValue { param: String, value: String },

    /// `setoption` without `name ... value ...`.
    #[error("malformed setoption command")]
    MalformedSetOption,

    /// `setoption` for an option this engine does not expose.
    #[error("unknown option: {name}")]
    UnknownOption { name: String },

    /// An option value outside its combo list.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The search failed for a reason other than a finished game.
    #[error("search failed: {0}")]
    Search(#[from] SearchError),

    /// The position view failed while walking the move tree.
    #[error("position error: {0}")]
    Position(#[from] PositionError),

    /// An I/O error occurred on the protocol streams.
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}
