//! The position view: a board that is advanced and rewound in place.

use std::fmt;
use std::str::FromStr;

use cozy_chess::{Board, Color, File, Move, Piece, Rank, Square};

use crate::error::PositionError;
use crate::outcome::Outcome;

/// FEN of the standard starting position.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// A chess position with apply/undo semantics.
///
/// Each applied move pushes the board it was played from onto a history
/// stack, so [`undo`](Position::undo) restores the previous state exactly:
/// side to move, castling rights, en passant square and clocks included.
#[derive(Clone, PartialEq, Eq)]
pub struct Position {
    /// The current board.
    board: Board,
    /// Boards before each applied move, paired with the move played.
    history: Vec<(Board, Move)>,
}

impl Position {
    /// Return the standard starting position.
    pub fn starting_position() -> Position {
        Position::from_board(Board::default())
    }

    /// Wrap an existing board with an empty history.
    pub fn from_board(board: Board) -> Position {
        Position {
            board,
            history: Vec::new(),
        }
    }

    /// Parse a position from a FEN string.
    pub fn from_fen(fen: &str) -> Result<Position, PositionError> {
        let board = Board::from_fen(fen.trim(), false).map_err(|err| PositionError::InvalidFen {
            fen: fen.to_string(),
            reason: format!("{err:?}"),
        })?;
        Ok(Position::from_board(board))
    }

    /// The current board.
    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// FEN of the current board.
    pub fn fen(&self) -> String {
        self.board.to_string()
    }

    /// The side to move.
    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.board.side_to_move()
    }

    /// All legal moves, in the order the rules engine generates them.
    pub fn legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::new();
        self.board.generate_moves(|piece_moves| {
            moves.extend(piece_moves);
            false
        });
        moves
    }

    /// Return `true` if the side to move has at least one legal move.
    ///
    /// Stops generating at the first piece that has a move.
    pub fn has_legal_moves(&self) -> bool {
        self.board
            .generate_moves(|piece_moves| piece_moves.into_iter().next().is_some())
    }

    /// The piece and its owner on `square`, if any.
    pub fn piece_at(&self, square: Square) -> Option<(Piece, Color)> {
        let piece = self.board.piece_on(square)?;
        let color = self.board.color_on(square)?;
        Some((piece, color))
    }

    /// Return `true` if the side to move is in check.
    pub fn in_check(&self) -> bool {
        !self.board.checkers().is_empty()
    }

    /// The game outcome if the side to move has no legal moves.
    pub fn outcome(&self) -> Option<Outcome> {
        if self.has_legal_moves() {
            return None;
        }
        if self.in_check() {
            Some(Outcome::Checkmate {
                winner: !self.side_to_move(),
            })
        } else {
            Some(Outcome::Stalemate)
        }
    }

    /// Number of moves applied since the position was set up.
    #[inline]
    pub fn ply(&self) -> usize {
        self.history.len()
    }

    /// Apply a legal move in place.
    ///
    /// # Errors
    ///
    /// Returns [`PositionError::IllegalMove`] and leaves the position untouched
    /// if `mv` is not legal here.
    pub fn apply(&mut self, mv: Move) -> Result<(), PositionError> {
        if !self.board.is_legal(mv) {
            return Err(PositionError::IllegalMove {
                mv: self.to_uci(mv),
                fen: self.fen(),
            });
        }
        let previous = self.board.clone();
        self.board.play_unchecked(mv);
        self.history.push((previous, mv));
        Ok(())
    }

    /// Undo the most recently applied move and return it.
    ///
    /// # Errors
    ///
    /// Returns [`PositionError::NothingToUndo`] if no move has been applied.
    pub fn undo(&mut self) -> Result<Move, PositionError> {
        let (previous, mv) = self.history.pop().ok_or(PositionError::NothingToUndo)?;
        self.board = previous;
        Ok(mv)
    }

    /// Return a pretty-printable wrapper for this position.
    pub fn pretty(&self) -> PrettyPosition<'_> {
        PrettyPosition(self)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::starting_position()
    }
}

impl FromStr for Position {
    type Err = PositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::from_fen(s)
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Position(\"{}\", ply {})", self.board, self.ply())
    }
}

/// Wrapper for pretty-printing a position as an 8x8 grid.
pub struct PrettyPosition<'a>(&'a Position);

fn piece_char(piece: Piece, color: Color) -> char {
    let c = match piece {
        Piece::Pawn => 'p',
        Piece::Knight => 'n',
        Piece::Bishop => 'b',
        Piece::Rook => 'r',
        Piece::Queen => 'q',
        Piece::King => 'k',
    };
    match color {
        Color::White => c.to_ascii_uppercase(),
        Color::Black => c,
    }
}

impl fmt::Display for PrettyPosition<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let position = self.0;
        for (rank_idx, &rank) in Rank::ALL.iter().enumerate().rev() {
            write!(f, "{}  ", rank_idx + 1)?;
            for (file_idx, &file) in File::ALL.iter().enumerate() {
                let c = position
                    .piece_at(Square::new(file, rank))
                    .map_or('.', |(piece, color)| piece_char(piece, color));
                if file_idx < 7 {
                    write!(f, "{c} ")?;
                } else {
                    write!(f, "{c}")?;
                }
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHECKMATED_FEN: &str = "7k/6Q1/5K2/8/8/8/8/8 b - - 0 1";
    const STALEMATE_FEN: &str = "k7/2K5/1Q6/8/8/8/8/8 b - - 0 1";

    #[test]
    fn starting_position_has_twenty_moves() {
        let position = Position::starting_position();
        assert_eq!(position.legal_moves().len(), 20);
        assert!(position.has_legal_moves());
        assert_eq!(position.outcome(), None);
    }

    #[test]
    fn starting_fen_matches_default() {
        let parsed: Position = STARTING_FEN.parse().unwrap();
        assert_eq!(parsed, Position::starting_position());
        assert_eq!(parsed.fen(), STARTING_FEN);
    }

    #[test]
    fn piece_at_reports_kind_and_owner() {
        let position = Position::starting_position();
        assert_eq!(position.piece_at(Square::E1), Some((Piece::King, Color::White)));
        assert_eq!(position.piece_at(Square::D8), Some((Piece::Queen, Color::Black)));
        assert_eq!(position.piece_at(Square::E4), None);
    }

    #[test]
    fn apply_then_undo_restores_position() {
        let mut position = Position::starting_position();
        let before = position.clone();
        let mv = position.parse_uci("e2e4").unwrap();
        position.apply(mv).unwrap();
        assert_eq!(position.side_to_move(), Color::Black);
        assert_eq!(position.ply(), 1);

        assert_eq!(position.undo().unwrap(), mv);
        assert_eq!(position, before);
    }

    #[test]
    fn undo_without_apply_fails() {
        let mut position = Position::starting_position();
        assert_eq!(position.undo(), Err(PositionError::NothingToUndo));
    }

    #[test]
    fn illegal_move_is_rejected_without_change() {
        let mut position = Position::starting_position();
        let before = position.clone();
        let mv = Move {
            from: Square::E2,
            to: Square::E5,
            promotion: None,
        };
        let err = position.apply(mv).unwrap_err();
        assert!(matches!(err, PositionError::IllegalMove { .. }));
        assert_eq!(position, before);
    }

    #[test]
    fn checkmate_outcome() {
        let position = Position::from_fen(CHECKMATED_FEN).unwrap();
        assert!(position.legal_moves().is_empty());
        assert!(position.in_check());
        assert_eq!(
            position.outcome(),
            Some(Outcome::Checkmate { winner: Color::White })
        );
    }

    #[test]
    fn stalemate_outcome() {
        let position = Position::from_fen(STALEMATE_FEN).unwrap();
        assert!(!position.has_legal_moves());
        assert!(!position.in_check());
        assert_eq!(position.outcome(), Some(Outcome::Stalemate));
    }

    #[test]
    fn invalid_fen_is_rejected() {
        let err = Position::from_fen("not a fen").unwrap_err();
        assert!(matches!(err, PositionError::InvalidFen { .. }));
    }

    #[test]
    fn pretty_print() {
        let position = Position::starting_position();
        let output = format!("{}", position.pretty());
        assert!(output.contains("r n b q k b n r"));
        assert!(output.contains("R N B Q K B N R"));
        assert!(output.contains("a b c d e f g h"));
    }
}
