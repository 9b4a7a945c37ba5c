//! UCI command parsing.

use tracing::warn;
use twoply_core::Position;
use twoply_engine::{Level, Pruning};

use crate::error::UciError;

/// Parameters for the `go` command.
///
/// Only `depth` affects the fixed-depth search; clock parameters are
/// accepted and skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoParams {
    /// Search to this many plies instead of the configured level.
    pub depth: Option<u8>,
    /// Count leaf nodes to this depth per root move instead of searching.
    pub perft: Option<usize>,
}

/// An option set through `setoption`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UciOption {
    /// `setoption name Level value <Noob|Expert|Pro>`
    Level(Level),
    /// `setoption name Pruning value <SingleBound|AlphaBeta>`
    Pruning(Pruning),
}

/// A parsed UCI command.
#[derive(Debug)]
pub enum Command {
    /// `uci` -- identify the engine.
    Uci,
    /// `isready` -- synchronization ping.
    IsReady,
    /// `ucinewgame` -- reset to the starting position.
    UciNewGame,
    /// `position` -- a position with any listed moves already applied.
    Position(Position),
    /// `go` -- search the current position.
    Go(GoParams),
    /// `setoption` -- change an engine option.
    SetOption(UciOption),
    /// `d` -- print the current position.
    Display,
    /// `quit` -- exit the engine.
    Quit,
    /// Unrecognized command (ignored, as UCI requires).
    Unknown(String),
}

/// Parse a single line of UCI input into a [`Command`].
pub fn parse_command(line: &str) -> Result<Command, UciError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some((&head, rest)) = tokens.split_first() else {
        return Ok(Command::Unknown(String::new()));
    };

    match head {
        "uci" => Ok(Command::Uci),
        "isready" => Ok(Command::IsReady),
        "ucinewgame" => Ok(Command::UciNewGame),
        "quit" => Ok(Command::Quit),
        "d" => Ok(Command::Display),
        "position" => parse_position(rest),
        "go" => parse_go(rest),
        "setoption" => parse_setoption(rest),
        _ => Ok(Command::Unknown(head.to_string())),
    }
}

/// Parse the `position` command arguments.
///
/// Supports:
/// - `position startpos [moves e2e4 d7d5 ...]`
/// - `position fen <fen-string> [moves e2e4 d7d5 ...]`
///
/// The FEN may omit its two clock fields.
fn parse_position(tokens: &[&str]) -> Result<Command, UciError> {
    let (mut position, rest) = match tokens.first() {
        Some(&"startpos") => (Position::starting_position(), &tokens[1..]),
        Some(&"fen") => {
            let fields = tokens[1..].iter().take_while(|&&t| t != "moves").count();
            let fen = match fields {
                6 => tokens[1..7].join(" "),
                // Clocks omitted: halfmove 0, fullmove 1.
                4 => format!("{} 0 1", tokens[1..5].join(" ")),
                5 => format!("{} 1", tokens[1..6].join(" ")),
                _ => {
                    return Err(UciError::InvalidFen {
                        fen: tokens[1..].join(" "),
                    });
                }
            };
            let position =
                Position::from_fen(&fen).map_err(|_| UciError::InvalidFen { fen: fen.clone() })?;
            (position, &tokens[1 + fields..])
        }
        _ => return Err(UciError::MalformedPosition),
    };

    if let Some((&"moves", moves)) = rest.split_first() {
        for &uci_move in moves {
            let invalid = |_| UciError::InvalidMove {
                uci_move: uci_move.to_string(),
            };
            let mv = position.parse_uci(uci_move).map_err(invalid)?;
            position.apply(mv).map_err(invalid)?;
        }
    }

    Ok(Command::Position(position))
}

/// Parse the `go` command arguments.
///
/// Never fails: every `go` must be answered with a `bestmove`, so a bad
/// value is logged and the parameter ignored. A depth above 255 is clamped.
/// Clock and limit parameters carry a value and are skipped with it.
fn parse_go(tokens: &[&str]) -> Result<Command, UciError> {
    let mut params = GoParams::default();

    let mut i = 0;
    while i < tokens.len() {
        match tokens[i] {
            "depth" => {
                params.depth = go_value::<u64>(tokens.get(i + 1), "depth")
                    .map(|depth| u8::try_from(depth).unwrap_or(u8::MAX));
                i += 2;
            }
            "perft" => {
                params.perft = go_value(tokens.get(i + 1), "perft");
                i += 2;
            }
            "wtime" | "btime" | "winc" | "binc" | "movestogo" | "movetime" | "nodes" => {
                let _ = go_value::<u64>(tokens.get(i + 1), tokens[i]);
                i += 2;
            }
            _ => {
                // Unknown token -- skip per UCI convention
                i += 1;
            }
        }
    }

    Ok(Command::Go(params))
}

/// A `go` parameter value, or `None` with a warning if it is missing or bad.
fn go_value<T: std::str::FromStr>(token: Option<&&str>, param: &str) -> Option<T> {
    match parse_int(token, param) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(error = %e, "ignoring go parameter");
            None
        }
    }
}

/// Parse `setoption name <name> value <value>`.
///
/// Option names and values are matched case-insensitively.
fn parse_setoption(tokens: &[&str]) -> Result<Command, UciError> {
    let name_at = tokens.iter().position(|&t| t == "name");
    let value_at = tokens.iter().position(|&t| t == "value");
    let (Some(name_at), Some(value_at)) = (name_at, value_at) else {
        return Err(UciError::MalformedSetOption);
    };
    if value_at <= name_at + 1 || value_at + 1 >= tokens.len() {
        return Err(UciError::MalformedSetOption);
    }

    let name = tokens[name_at + 1..value_at].join(" ");
    let value = tokens[value_at + 1..].join(" ");
    let option = match name.to_ascii_lowercase().as_str() {
        "level" => UciOption::Level(value.parse()?),
        "pruning" => UciOption::Pruning(value.parse()?),
        _ => return Err(UciError::UnknownOption { name }),
    };
    Ok(Command::SetOption(option))
}

/// Parse an integer value from a token.
fn parse_int<T: std::str::FromStr>(token: Option<&&str>, param: &str) -> Result<T, UciError> {
    let value = token.ok_or_else(|| UciError::MissingGoValue {
        param: param.to_string(),
    })?;
    value.parse().map_err(|_| UciError::InvalidGoValue {
        param: param.to_string(),
        value: value.to_string(),
    })
}
