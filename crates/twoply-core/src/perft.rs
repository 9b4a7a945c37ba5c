//! Perft (performance test) over in-place apply/undo.
//!
//! Walks the legal-move tree through [`Position::apply`] and
//! [`Position::undo`], so a correct count also shows the history stack
//! restores every position it advances.

use tracing::debug;

use crate::error::PositionError;
use crate::position::Position;

/// Count the number of leaf nodes at the given depth.
///
/// Depth 0 returns 1 (the current position). Depth 1 returns the number
/// of legal moves without applying them.
pub fn perft(position: &mut Position, depth: usize) -> Result<u64, PositionError> {
    if depth == 0 {
        return Ok(1);
    }

    let moves = position.legal_moves();

    if depth == 1 {
        return Ok(moves.len() as u64);
    }

    let mut nodes = 0u64;
    for mv in moves {
        position.apply(mv)?;
        let count = perft(position, depth - 1);
        position.undo()?;
        nodes += count?;
    }
    Ok(nodes)
}

/// Run perft with per-move breakdown (useful for debugging).
///
/// Returns `(uci_move, node_count)` pairs sorted alphabetically.
pub fn divide(position: &mut Position, depth: usize) -> Result<Vec<(String, u64)>, PositionError> {
    let mut results = Vec::new();
    for mv in position.legal_moves() {
        let uci = position.to_uci(mv);
        position.apply(mv)?;
        let count = if depth <= 1 { Ok(1) } else { perft(position, depth - 1) };
        position.undo()?;
        let count = count?;
        debug!(mv = %uci, nodes = count, "divide");
        results.push((uci, count));
    }
    results.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(results)
}
