//! Error types for position setup and move application.

/// Errors raised by [`Position`](crate::Position).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PositionError {
    /// The FEN string was rejected by the rules engine.
    #[error("invalid FEN \"{fen}\": {reason}")]
    InvalidFen {
        /// The offending FEN string.
        fen: String,
        /// Why the rules engine rejected it.
        reason: String,
    },
    /// A move string could not be parsed as coordinate notation.
    #[error("unparseable move: \"{text}\"")]
    InvalidMove {
        /// The text that failed to parse.
        text: String,
    },
    /// A well-formed move is not legal in the current position.
    #[error("illegal move {mv} in position {fen}")]
    IllegalMove {
        /// The move, in UCI notation.
        mv: String,
        /// FEN of the position it was tried in.
        fen: String,
    },
    /// `undo` was called with no applied move left on the history stack.
    #[error("undo requested but no move has been applied")]
    NothingToUndo,
}
