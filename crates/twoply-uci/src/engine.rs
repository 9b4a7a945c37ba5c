//! Synchronous UCI engine loop.

use std::io::{BufRead, Write};
use std::time::Instant;

use tracing::{debug, info, warn};

use twoply_core::{Position, divide};
use twoply_engine::{Level, MIN_DEPTH, Pruning, SearchConfig, SearchError, Searcher};

use crate::command::{Command, GoParams, UciOption, parse_command};
use crate::error::UciError;

/// Snapshot of the knobs adjustable via `setoption`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EngineConfig {
    /// Difficulty, used as the search depth when `go` has no `depth`.
    pub level: Level,
    /// Cutoff rule below the root, as held by the searcher.
    pub pruning: Pruning,
}

/// The UCI engine, holding the current position and the searcher.
///
/// Commands are handled one at a time on the calling thread; `go` blocks
/// until the fixed-depth search completes.
pub struct UciEngine {
    position: Position,
    searcher: Searcher,
    level: Level,
}

impl UciEngine {
    /// Create a new engine with the starting position and entropy-seeded jitter.
    pub fn new() -> Self {
        Self::with_searcher(Searcher::new(SearchConfig::default()))
    }

    /// Create an engine whose evaluation jitter is reproducible.
    pub fn seeded(seed: u64) -> Self {
        Self::with_searcher(Searcher::seeded(SearchConfig::default(), seed))
    }

    fn with_searcher(searcher: Searcher) -> Self {
        Self {
            position: Position::starting_position(),
            searcher,
            level: Level::default(),
        }
    }

    /// The position the next `go` will search.
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Current option values.
    pub fn config(&self) -> EngineConfig {
        EngineConfig {
            level: self.level,
            pruning: self.searcher.config().pruning,
        }
    }

    /// Run the UCI loop until `quit` or end of input.
    ///
    /// Malformed commands are logged and skipped. I/O failures and search
    /// failures other than a finished game end the loop with an error.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<(), UciError> {
        for line in input.lines() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            debug!(cmd = %trimmed, "received UCI command");

            match parse_command(trimmed) {
                Ok(Command::Quit) => break,
                Ok(cmd) => self.dispatch(cmd, out)?,
                Err(e) => warn!(error = %e, "UCI parse error"),
            }
            out.flush()?;
        }

        info!("twoply shutting down");
        Ok(())
    }

    fn dispatch<W: Write>(&mut self, cmd: Command, out: &mut W) -> Result<(), UciError> {
        match cmd {
            Command::Uci => self.handle_uci(out)?,
            Command::IsReady => writeln!(out, "readyok")?,
            Command::UciNewGame => self.position = Position::starting_position(),
            Command::Position(position) => self.position = position,
            Command::Go(params) => self.handle_go(params, out)?,
            Command::SetOption(option) => self.handle_setoption(option),
            Command::Display => self.handle_display(out)?,
            Command::Unknown(_) | Command::Quit => {}
        }
        Ok(())
    }

    fn handle_uci<W: Write>(&self, out: &mut W) -> Result<(), UciError> {
        let levels: String = Level::ALL.iter().map(|l| format!(" var {l}")).collect();
        writeln!(out, "id name twoply")?;
        writeln!(out, "id author the twoply developers")?;
        writeln!(
            out,
            "option name Level type combo default {}{levels}",
            Level::default()
        )?;
        writeln!(
            out,
            "option name Pruning type combo default {} var {} var {}",
            Pruning::default(),
            Pruning::SingleBound,
            Pruning::AlphaBeta
        )?;
        writeln!(out, "uciok")?;
        Ok(())
    }

    fn handle_setoption(&mut self, option: UciOption) {
        match option {
            UciOption::Level(level) => {
                self.level = level;
                info!(%level, depth = level.max_depth(), "level set");
            }
            UciOption::Pruning(pruning) => {
                self.searcher.set_pruning(pruning);
                info!(%pruning, "pruning set");
            }
        }
    }

    fn handle_go<W: Write>(&mut self, params: GoParams, out: &mut W) -> Result<(), UciError> {
        if let Some(depth) = params.perft {
            return self.handle_perft(depth, out);
        }

        let mut depth = params.depth.unwrap_or(self.level.max_depth());
        if depth < MIN_DEPTH {
            warn!(depth, min = MIN_DEPTH, "go depth too shallow, raising");
            depth = MIN_DEPTH;
        }

        let start = Instant::now();
        match self.searcher.search(&mut self.position, depth) {
            Ok(result) => {
                let elapsed_ms = start.elapsed().as_millis();
                let best = self.position.to_uci(result.best_move);
                let cp = (result.score * 100.0).round() as i64;
                writeln!(
                    out,
                    "info depth {depth} score cp {cp} nodes {} time {elapsed_ms} pv {best}",
                    result.nodes
                )?;
                writeln!(out, "bestmove {best}")?;
            }
            Err(SearchError::NoLegalMoves { outcome }) => {
                info!(%outcome, "go on a finished game");
                writeln!(out, "info string {outcome}")?;
                writeln!(out, "bestmove 0000")?;
            }
            Err(err) => return Err(err.into()),
        }
        Ok(())
    }

    fn handle_perft<W: Write>(&mut self, depth: usize, out: &mut W) -> Result<(), UciError> {
        let start = Instant::now();
        let breakdown = divide(&mut self.position, depth)?;
        let total: u64 = breakdown.iter().map(|(_, nodes)| nodes).sum();
        for (mv, nodes) in &breakdown {
            writeln!(out, "{mv}: {nodes}")?;
        }
        writeln!(out)?;
        writeln!(out, "Nodes searched: {total}")?;
        info!(depth, total, elapsed_ms = start.elapsed().as_millis() as u64, "perft complete");
        Ok(())
    }

    fn handle_display<W: Write>(&self, out: &mut W) -> Result<(), UciError> {
        writeln!(out, "{}", self.position.pretty())?;
        writeln!(out)?;
        writeln!(out, "Fen: {}", self.position.fen())?;
        if let Some(outcome) = self.position.outcome() {
            writeln!(out, "Outcome: {outcome} ({})", outcome.result())?;
        }
        Ok(())
    }
}

impl Default for UciEngine {
    fn default() -> Self {
        Self::new()
    }
}
