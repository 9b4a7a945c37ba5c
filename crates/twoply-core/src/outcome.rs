//! Terminal game states.

use std::fmt;

use cozy_chess::Color;

/// How a game ended when the side to move has no legal moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The side to move is in check with no legal reply.
    Checkmate {
        /// The side that delivered mate.
        winner: Color,
    },
    /// The side to move is not in check but has no legal move.
    Stalemate,
}

impl Outcome {
    /// The winning side, or `None` for a draw.
    pub fn winner(self) -> Option<Color> {
        match self {
            Outcome::Checkmate { winner } => Some(winner),
            Outcome::Stalemate => None,
        }
    }

    /// PGN-style result string.
    pub fn result(self) -> &'static str {
        match self.winner() {
            Some(Color::White) => "1-0",
            Some(Color::Black) => "0-1",
            None => "1/2-1/2",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.winner() {
            Some(Color::White) => write!(f, "checkmate, white wins"),
            Some(Color::Black) => write!(f, "checkmate, black wins"),
            None => write!(f, "stalemate"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Outcome;
    use cozy_chess::Color;

    #[test]
    fn stalemate_has_no_winner() {
        assert_eq!(Outcome::Stalemate.winner(), None);
        assert_eq!(Outcome::Stalemate.result(), "1/2-1/2");
    }

    #[test]
    fn checkmate_reports_winner() {
        let outcome = Outcome::Checkmate { winner: Color::Black };
        assert_eq!(outcome.winner(), Some(Color::Black));
        assert_eq!(outcome.result(), "0-1");
        assert_eq!(format!("{outcome}"), "checkmate, black wins");
    }
}
