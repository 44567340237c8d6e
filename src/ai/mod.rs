//! Move selection: the alpha-beta searcher, the root-level selector, and the
//! agents that wrap them for play.

mod agent;
mod random;
pub mod search;
pub mod selector;

pub use agent::{Agent, MinimaxAgent};
pub use random::RandomAgent;
pub use search::{Searcher, WIN_SCORE};
pub use selector::{ColumnScore, MoveSelector, RootScores, SearchConfig, SEARCH_DEPTH};
