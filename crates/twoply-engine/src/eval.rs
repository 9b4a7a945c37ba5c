//! Leaf evaluation: material balance, mate/stalemate, and a random tie-break.
//!
//! Scores are from the engine's point of view against a fixed reference
//! side: the reference side's material counts negative, everyone else's
//! positive, and the reference side running out of moves scores
//! [`MATE_SCORE`].

use rand::Rng;
use twoply_core::{Color, Piece, Square};

use crate::view::PositionView;

/// Magnitude of the terminal term. Dominates any reachable material sum.
pub const MATE_SCORE: f64 = 999.0;

/// Material weight of a piece.
///
/// | Piece  | weight |
/// |--------|--------|
/// | Pawn   | 1.0    |
/// | Knight | 3.2    |
/// | Bishop | 3.33   |
/// | Rook   | 5.1    |
/// | Queen  | 8.8    |
/// | King   | 0      |
pub const fn piece_weight(piece: Piece) -> f64 {
    match piece {
        Piece::Pawn => 1.0,
        Piece::Knight => 3.2,
        Piece::Bishop => 3.33,
        Piece::Rook => 5.1,
        Piece::Queen => 8.8,
        Piece::King => 0.0,
    }
}

/// Scores a leaf position.
///
/// The search calls this only at the depth limit or on a position with no
/// legal moves.
pub trait Evaluate<P: PositionView> {
    fn evaluate(&mut self, position: &P) -> f64;
}

/// Material-and-mate evaluator with a uniform `[0, 1)` jitter term.
pub struct Evaluator<R> {
    reference: Color,
    rng: R,
}

impl<R: Rng> Evaluator<R> {
    /// Create an evaluator scoring against `reference`, drawing jitter from `rng`.
    pub fn new(reference: Color, rng: R) -> Self {
        Self { reference, rng }
    }
}

impl<P: PositionView, R: Rng> Evaluate<P> for Evaluator<R> {
    fn evaluate(&mut self, position: &P) -> f64 {
        material(position, self.reference)
            + terminal(position, self.reference)
            + self.rng.gen_range(0.0..1.0)
    }
}

/// Sum of piece weights over all 64 squares, negated for the reference side.
pub fn material<P: PositionView>(position: &P, reference: Color) -> f64 {
    let mut score = 0.0;
    for square in Square::ALL {
        if let Some((piece, color)) = position.piece_at(square) {
            let weight = piece_weight(piece);
            if color == reference {
                score -= weight;
            } else {
                score += weight;
            }
        }
    }
    score
}

/// `+MATE_SCORE` when the reference side is to move with no legal moves,
/// `-MATE_SCORE` when the other side is, zero otherwise.
///
/// Stalemate scores the same as checkmate.
pub fn terminal<P: PositionView>(position: &P, reference: Color) -> f64 {
    if position.has_legal_moves() {
        0.0
    } else if position.side_to_move() == reference {
        MATE_SCORE
    } else {
        -MATE_SCORE
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use twoply_core::{Color, Piece, Position};

    use super::*;

    const EPS: f64 = 1e-9;
    const NO_BLACK_QUEEN_FEN: &str = "rnb1kbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
    const BLACK_MATED_FEN: &str = "7k/6Q1/5K2/8/8/8/8/8 b - - 0 1";
    const BLACK_STALEMATED_FEN: &str = "k7/2K5/1Q6/8/8/8/8/8 b - - 0 1";

    #[test]
    fn starting_position_material_is_balanced() {
        let position = Position::starting_position();
        assert!(material(&position, Color::White).abs() < EPS);
        assert!(material(&position, Color::Black).abs() < EPS);
    }

    #[test]
    fn reference_material_counts_against() {
        let position = Position::from_fen(NO_BLACK_QUEEN_FEN).unwrap();
        // Black is the reference side and is down a queen.
        assert!((material(&position, Color::Black) - 8.8).abs() < EPS);
        assert!((material(&position, Color::White) + 8.8).abs() < EPS);
    }

    #[test]
    fn king_weighs_nothing() {
        assert_eq!(piece_weight(Piece::King), 0.0);
        let position = Position::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        assert!(material(&position, Color::White).abs() < EPS);
    }

    #[test]
    fn terminal_term_signs() {
        let mated = Position::from_fen(BLACK_MATED_FEN).unwrap();
        assert_eq!(terminal(&mated, Color::Black), MATE_SCORE);
        assert_eq!(terminal(&mated, Color::White), -MATE_SCORE);

        let stalemated = Position::from_fen(BLACK_STALEMATED_FEN).unwrap();
        assert_eq!(terminal(&stalemated, Color::Black), MATE_SCORE);

        assert_eq!(terminal(&Position::starting_position(), Color::White), 0.0);
    }

    #[test]
    fn jitter_is_in_unit_interval() {
        let position = Position::from_fen(NO_BLACK_QUEEN_FEN).unwrap();
        let mut evaluator = Evaluator::new(Color::Black, StdRng::seed_from_u64(7));
        for _ in 0..200 {
            let jitter = evaluator.evaluate(&position) - 8.8;
            assert!((-EPS..1.0).contains(&jitter), "jitter {jitter} out of range");
        }
    }

    #[test]
    fn seeded_evaluators_agree() {
        let position = Position::starting_position();
        let mut a = Evaluator::new(Color::Black, StdRng::seed_from_u64(11));
        let mut b = Evaluator::new(Color::Black, StdRng::seed_from_u64(11));
        for _ in 0..10 {
            assert_eq!(a.evaluate(&position), b.evaluate(&position));
        }
    }

    #[test]
    fn terminal_dominates_any_material() {
        // Nine queens plus the remaining officers is the most one side can own.
        let max_side = 9.0 * 8.8 + 2.0 * 5.1 + 2.0 * 3.33 + 2.0 * 3.2;
        let mated = Position::from_fen(BLACK_MATED_FEN).unwrap();
        let mut evaluator = Evaluator::new(Color::Black, StdRng::seed_from_u64(3));
        let score = evaluator.evaluate(&mated);
        assert!(score - material(&mated, Color::Black) >= MATE_SCORE);
        assert!(score > 2.0 * max_side + 1.0);
    }
}
