//! Position view over the `cozy-chess` rules engine: legal moves, piece
//! queries, game outcome, and in-place apply/undo.

mod error;
mod notation;
mod outcome;
mod perft;
mod position;

pub use cozy_chess::{Board, Color, File, Move, Piece, Rank, Square};
pub use error::PositionError;
pub use outcome::Outcome;
pub use perft::{divide, perft};
pub use position::{Position, PrettyPosition, STARTING_FEN};
