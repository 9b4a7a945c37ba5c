//! Search configuration: pruning rule and difficulty levels.

use std::fmt;
use std::str::FromStr;

/// Smallest maximum depth that still scores the engine's own move.
pub const MIN_DEPTH: u8 = 2;

/// How sibling exploration is cut short.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Pruning {
    /// Each node receives only its parent's running best and stops iterating
    /// as soon as a child's value crosses it. This is the engine's historical
    /// behaviour and decides which moves get chosen.
    #[default]
    SingleBound,
    /// Canonical two-bound alpha-beta. Explores a different set of nodes and
    /// can pick a different move among near-equal candidates.
    AlphaBeta,
}

impl Pruning {
    /// UCI option value for this rule.
    pub fn name(self) -> &'static str {
        match self {
            Pruning::SingleBound => "SingleBound",
            Pruning::AlphaBeta => "AlphaBeta",
        }
    }
}

impl fmt::Display for Pruning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Pruning {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "singlebound" => Ok(Pruning::SingleBound),
            "alphabeta" => Ok(Pruning::AlphaBeta),
            _ => Err(ConfigError::UnknownPruning {
                value: s.to_string(),
            }),
        }
    }
}

/// Difficulty presets, each a fixed maximum search depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Level {
    #[default]
    Noob,
    Expert,
    Pro,
}

impl Level {
    /// All levels, weakest first.
    pub const ALL: [Level; 3] = [Level::Noob, Level::Expert, Level::Pro];

    /// Maximum search depth in plies, counting the root call as depth 1.
    pub const fn max_depth(self) -> u8 {
        match self {
            Level::Noob => 3,
            Level::Expert => 4,
            Level::Pro => 5,
        }
    }

    /// UCI option value for this level.
    pub fn name(self) -> &'static str {
        match self {
            Level::Noob => "Noob",
            Level::Expert => "Expert",
            Level::Pro => "Pro",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Level {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Level::ALL
            .into_iter()
            .find(|level| level.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ConfigError::UnknownLevel {
                value: s.to_string(),
            })
    }
}

/// Knobs that stay fixed across searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchConfig {
    /// Cutoff rule used below the root.
    pub pruning: Pruning,
}

/// Errors from parsing configuration values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown level: \"{value}\"")]
    UnknownLevel { value: String },
    #[error("unknown pruning rule: \"{value}\"")]
    UnknownPruning { value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_map_to_depths() {
        assert_eq!(Level::Noob.max_depth(), 3);
        assert_eq!(Level::Expert.max_depth(), 4);
        assert_eq!(Level::Pro.max_depth(), 5);
        assert!(Level::ALL.iter().all(|l| l.max_depth() >= MIN_DEPTH));
    }

    #[test]
    fn level_parses_case_insensitively() {
        assert_eq!("expert".parse::<Level>(), Ok(Level::Expert));
        assert_eq!("PRO".parse::<Level>(), Ok(Level::Pro));
        assert!(matches!(
            "grandmaster".parse::<Level>(),
            Err(ConfigError::UnknownLevel { .. })
        ));
    }

    #[test]
    fn pruning_defaults_to_single_bound() {
        assert_eq!(SearchConfig::default().pruning, Pruning::SingleBound);
        assert_eq!("AlphaBeta".parse::<Pruning>(), Ok(Pruning::AlphaBeta));
        assert_eq!(Pruning::SingleBound.to_string(), "SingleBound");
    }
}
