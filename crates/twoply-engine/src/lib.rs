//! Fixed-depth minimax move selection with a material-and-mate evaluator.

pub mod config;
pub mod error;
pub mod eval;
pub mod guard;
pub mod search;
pub mod view;

pub use config::{ConfigError, Level, MIN_DEPTH, Pruning, SearchConfig};
pub use error::SearchError;
pub use eval::{Evaluate, Evaluator, MATE_SCORE};
pub use guard::MoveGuard;
pub use search::{SearchResult, Searcher, search_with};
pub use view::PositionView;
