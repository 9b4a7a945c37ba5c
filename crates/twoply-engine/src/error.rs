//! Search errors.

use twoply_core::{Outcome, PositionError};

/// Errors returned by [`Searcher`](crate::Searcher).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// The root position has no legal moves, so there is nothing to choose.
    #[error("no legal moves in root position ({outcome})")]
    NoLegalMoves {
        /// How the game ended.
        outcome: Outcome,
    },
    /// The maximum depth leaves no room for the engine's own move to be scored.
    #[error("search depth {depth} is too shallow, need at least {min}", min = crate::config::MIN_DEPTH)]
    DepthTooShallow {
        /// The requested maximum depth.
        depth: u8,
    },
    /// The position view failed to apply or undo a move.
    #[error("position view: {0}")]
    Position(#[from] PositionError),
}

#[cfg(test)]
mod tests {
    use super::SearchError;
    use twoply_core::{Color, Outcome, PositionError};

    #[test]
    fn depth_error_display() {
        let err = SearchError::DepthTooShallow { depth: 1 };
        assert_eq!(format!("{err}"), "search depth 1 is too shallow, need at least 2");
    }

    #[test]
    fn no_moves_display_names_outcome() {
        let err = SearchError::NoLegalMoves {
            outcome: Outcome::Checkmate { winner: Color::White },
        };
        assert_eq!(
            format!("{err}"),
            "no legal moves in root position (checkmate, white wins)"
        );
    }

    #[test]
    fn search_error_from_position_error() {
        let err: SearchError = PositionError::NothingToUndo.into();
        assert!(matches!(err, SearchError::Position(PositionError::NothingToUndo)));
    }
}
