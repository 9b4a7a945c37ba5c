//! Fixed-depth minimax move selection.
//!
//! Depth counts plies from the search origin: depth 1 is the engine's own
//! move and maximizes, depth 2 is the reply and minimizes, and so on. The
//! evaluator is consulted once `depth == max_depth` or when a position has
//! no legal moves.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};
use twoply_core::Outcome;

use crate::config::{MIN_DEPTH, Pruning, SearchConfig};
use crate::error::SearchError;
use crate::eval::{Evaluate, Evaluator};
use crate::guard::MoveGuard;
use crate::view::PositionView;

/// Result of a completed search.
#[derive(Debug, Clone)]
pub struct SearchResult<M> {
    /// Best root move.
    pub best_move: M,
    /// Score of the subtree under `best_move`.
    pub score: f64,
    /// Nodes entered, root included.
    pub nodes: u64,
    /// Evaluator calls.
    pub leaves: u64,
    /// Sibling loops cut short.
    pub cutoffs: u64,
    /// Maximum depth searched.
    pub depth: u8,
}

/// Chooses moves for the side to move.
///
/// Holds only configuration and the jitter source; every call searches
/// from scratch.
pub struct Searcher<R = StdRng> {
    config: SearchConfig,
    rng: R,
}

impl Searcher<StdRng> {
    /// Create a searcher seeded from system entropy.
    pub fn new(config: SearchConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create a searcher with reproducible jitter.
    pub fn seeded(config: SearchConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Searcher<R> {
    /// Create a searcher drawing jitter from `rng`.
    pub fn with_rng(config: SearchConfig, rng: R) -> Self {
        Self { config, rng }
    }

    /// Current configuration.
    pub fn config(&self) -> SearchConfig {
        self.config
    }

    /// Switch the cutoff rule for subsequent searches.
    pub fn set_pruning(&mut self, pruning: Pruning) {
        self.config.pruning = pruning;
    }

    /// Return the chosen move for the side to move.
    ///
    /// # Errors
    ///
    /// [`SearchError::DepthTooShallow`] if `max_depth < 2`,
    /// [`SearchError::NoLegalMoves`] if the position is already over, and
    /// [`SearchError::Position`] if the view fails to apply or undo a move.
    pub fn choose_move<P: PositionView>(
        &mut self,
        position: &mut P,
        max_depth: u8,
    ) -> Result<P::Move, SearchError> {
        self.search(position, max_depth).map(|result| result.best_move)
    }

    /// Like [`choose_move`](Self::choose_move), returning score and counters too.
    ///
    /// The evaluator's reference side is the side *not* to move at the root:
    /// its material counts against the engine and its running out of moves
    /// is the best outcome.
    pub fn search<P: PositionView>(
        &mut self,
        position: &mut P,
        max_depth: u8,
    ) -> Result<SearchResult<P::Move>, SearchError> {
        let reference = !position.side_to_move();
        let mut evaluator = Evaluator::new(reference, &mut self.rng);
        search_with(position, max_depth, self.config.pruning, &mut evaluator)
    }
}

impl Default for Searcher<StdRng> {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

impl<R> std::fmt::Debug for Searcher<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Searcher")
            .field("config", &self.config)
            .finish()
    }
}

/// Search state threaded through the recursion.
struct SearchContext<'a, E> {
    evaluator: &'a mut E,
    max_depth: u8,
    nodes: u64,
    leaves: u64,
    cutoffs: u64,
}

impl<E> SearchContext<'_, E> {
    fn leaf<P: PositionView>(&mut self, position: &P) -> f64
    where
        E: Evaluate<P>,
    {
        self.leaves += 1;
        self.evaluator.evaluate(position)
    }
}

/// Run the root ply with a caller-supplied evaluator.
///
/// The position is restored to its entry state before this returns, on
/// success and on error alike.
pub fn search_with<P, E>(
    position: &mut P,
    max_depth: u8,
    pruning: Pruning,
    evaluator: &mut E,
) -> Result<SearchResult<P::Move>, SearchError>
where
    P: PositionView,
    E: Evaluate<P>,
{
    if max_depth < MIN_DEPTH {
        return Err(SearchError::DepthTooShallow { depth: max_depth });
    }

    let moves = position.legal_moves();
    if moves.is_empty() {
        let outcome = position.outcome().unwrap_or(Outcome::Stalemate);
        return Err(SearchError::NoLegalMoves { outcome });
    }

    let mut ctx = SearchContext {
        evaluator,
        max_depth,
        nodes: 1,
        leaves: 0,
        cutoffs: 0,
    };

    // Kept if every move scores -inf, which only a custom evaluator can produce.
    let mut best_move = moves[0];
    let mut best_score = f64::NEG_INFINITY;

    for &mv in &moves {
        let mut child = MoveGuard::apply(position, mv)?;
        let score = match pruning {
            Pruning::SingleBound => evaluate_subtree(&mut *child, Some(best_score), 2, &mut ctx)?,
            Pruning::AlphaBeta => alpha_beta(&mut *child, best_score, f64::INFINITY, 2, &mut ctx)?,
        };
        child.undo()?;
        trace!(mv = ?mv, score, "root move scored");

        if score > best_score {
            best_score = score;
            best_move = mv;
        }
    }

    debug!(
        best_move = ?best_move,
        score = best_score,
        max_depth,
        %pruning,
        nodes = ctx.nodes,
        leaves = ctx.leaves,
        cutoffs = ctx.cutoffs,
        "search complete"
    );

    Ok(SearchResult {
        best_move,
        score: best_score,
        nodes: ctx.nodes,
        leaves: ctx.leaves,
        cutoffs: ctx.cutoffs,
        depth: max_depth,
    })
}

/// Score the subtree below the current position, `depth >= 2`.
///
/// `cutoff` is the parent's running best. A minimizing ply stops as soon as
/// a child scores below it, a maximizing ply as soon as a child scores
/// above it. The test uses the child's raw value, not the running best.
fn evaluate_subtree<P, E>(
    position: &mut P,
    cutoff: Option<f64>,
    depth: u8,
    ctx: &mut SearchContext<'_, E>,
) -> Result<f64, SearchError>
where
    P: PositionView,
    E: Evaluate<P>,
{
    ctx.nodes += 1;

    if depth >= ctx.max_depth {
        return Ok(ctx.leaf(&*position));
    }

    let moves = position.legal_moves();
    if moves.is_empty() {
        return Ok(ctx.leaf(&*position));
    }

    let maximizing = depth % 2 == 1;
    let mut best = if maximizing {
        f64::NEG_INFINITY
    } else {
        f64::INFINITY
    };

    for mv in moves {
        let mut child = MoveGuard::apply(position, mv)?;
        let value = evaluate_subtree(&mut *child, Some(best), depth + 1, ctx)?;
        child.undo()?;

        if (maximizing && value > best) || (!maximizing && value < best) {
            best = value;
        }

        let crossed = cutoff.is_some_and(|c| if maximizing { value > c } else { value < c });
        if crossed {
            ctx.cutoffs += 1;
            break;
        }
    }

    Ok(best)
}

/// Two-bound alpha-beta over the same depth parity, `depth >= 2`.
fn alpha_beta<P, E>(
    position: &mut P,
    mut alpha: f64,
    mut beta: f64,
    depth: u8,
    ctx: &mut SearchContext<'_, E>,
) -> Result<f64, SearchError>
where
    P: PositionView,
    E: Evaluate<P>,
{
    ctx.nodes += 1;

    if depth >= ctx.max_depth {
        return Ok(ctx.leaf(&*position));
    }

    let moves = position.legal_moves();
    if moves.is_empty() {
        return Ok(ctx.leaf(&*position));
    }

    let maximizing = depth % 2 == 1;
    let mut best = if maximizing {
        f64::NEG_INFINITY
    } else {
        f64::INFINITY
    };

    for mv in moves {
        let mut child = MoveGuard::apply(position, mv)?;
        let value = alpha_beta(&mut *child, alpha, beta, depth + 1, ctx)?;
        child.undo()?;

        if maximizing {
            best = best.max(value);
            alpha = alpha.max(value);
        } else {
            best = best.min(value);
            beta = beta.min(value);
        }

        if alpha >= beta {
            ctx.cutoffs += 1;
            break;
        }
    }

    Ok(best)
}
