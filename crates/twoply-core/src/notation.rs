//! UCI coordinate notation.
//!
//! The rules engine encodes castling as the king capturing its own rook
//! (`e1h1`); UCI GUIs expect the king's two-square step (`e1g1`). These
//! helpers convert at the boundary.

use cozy_chess::{File, Move, Piece, Square};

use crate::error::PositionError;
use crate::position::Position;

impl Position {
    /// Parse a UCI move string (`e2e4`, `e7e8q`, `e1g1`) and check it is legal.
    ///
    /// # Errors
    ///
    /// [`PositionError::InvalidMove`] if the text is not coordinate notation,
    /// [`PositionError::IllegalMove`] if it is not legal in this position.
    pub fn parse_uci(&self, text: &str) -> Result<Move, PositionError> {
        let mut mv: Move = text.parse().map_err(|_| PositionError::InvalidMove {
            text: text.to_string(),
        })?;

        let board = self.board();
        let us = board.side_to_move();
        let is_king = board.piece_on(mv.from) == Some(Piece::King)
            && board.color_on(mv.from) == Some(us);
        if is_king && mv.from.file() == File::E {
            let rook_file = match mv.to.file() {
                File::G => Some(File::H),
                File::C => Some(File::A),
                _ => None,
            };
            if let Some(rook_file) = rook_file
                && mv.to.rank() == mv.from.rank()
            {
                mv.to = Square::new(rook_file, mv.from.rank());
            }
        }

        if !board.is_legal(mv) {
            return Err(PositionError::IllegalMove {
                mv: text.to_string(),
                fen: self.fen(),
            });
        }
        Ok(mv)
    }

    /// Format a move from this position in UCI notation.
    pub fn to_uci(&self, mv: Move) -> String {
        let board = self.board();
        let us = board.side_to_move();
        let is_castle = board.piece_on(mv.from) == Some(Piece::King)
            && board.color_on(mv.to) == Some(us);
        if is_castle {
            let king_file = if (mv.to.file() as u8) > (mv.from.file() as u8) {
                File::G
            } else {
                File::C
            };
            let to = Square::new(king_file, mv.from.rank());
            return format!("{}{}", mv.from, to);
        }
        mv.to_string()
    }
}
