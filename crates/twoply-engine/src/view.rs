//! The interface the search consumes from a rules provider.

use std::fmt;

use twoply_core::{Color, Move, Outcome, Piece, Position, PositionError, Square};

/// A single shared, mutable position that the search advances and rewinds.
///
/// Implementors own legality: the search only ever applies moves returned
/// by [`legal_moves`](PositionView::legal_moves), and always pairs each
/// [`apply`](PositionView::apply) with exactly one [`undo`](PositionView::undo).
pub trait PositionView {
    /// Move token produced by this view.
    type Move: Copy + Eq + fmt::Debug;

    /// The side to move.
    fn side_to_move(&self) -> Color;

    /// Legal moves from the current position, in generation order.
    fn legal_moves(&self) -> Vec<Self::Move>;

    /// Return `true` if the side to move has any legal move.
    fn has_legal_moves(&self) -> bool {
        !self.legal_moves().is_empty()
    }

    /// The piece and its owner on `square`, if any.
    fn piece_at(&self, square: Square) -> Option<(Piece, Color)>;

    /// Checkmate or stalemate, if the side to move has no legal moves.
    fn outcome(&self) -> Option<Outcome>;

    /// Advance the position by `mv`.
    fn apply(&mut self, mv: Self::Move) -> Result<(), PositionError>;

    /// Rewind the most recently applied move.
    fn undo(&mut self) -> Result<Self::Move, PositionError>;
}

impl PositionView for Position {
    type Move = Move;

    #[inline]
    fn side_to_move(&self) -> Color {
        Position::side_to_move(self)
    }

    fn legal_moves(&self) -> Vec<Move> {
        Position::legal_moves(self)
    }

    fn has_legal_moves(&self) -> bool {
        Position::has_legal_moves(self)
    }

    #[inline]
    fn piece_at(&self, square: Square) -> Option<(Piece, Color)> {
        Position::piece_at(self, square)
    }

    fn outcome(&self) -> Option<Outcome> {
        Position::outcome(self)
    }

    fn apply(&mut self, mv: Move) -> Result<(), PositionError> {
        Position::apply(self, mv)
    }

    fn undo(&mut self) -> Result<Move, PositionError> {
        Position::undo(self)
    }
}
