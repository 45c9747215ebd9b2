pub mod engine;
pub mod logic;

pub use engine::alphabeta::{AlphaBetaOutcome, AlphaBetaPlayer};
pub use engine::clock::{Deadline, TimeBudget, Unlimited};
pub use engine::config::{ConfigError, EngineConfig, SearchConfig};
pub use engine::eval::{Heuristic, ScoreFn};
pub use engine::minimax::MinimaxPlayer;
pub use engine::{SearchOutcome, SearchStats, SearchTimeout, Searcher};
pub use logic::board::{Board, BoardError, Player};
pub use logic::{GameState, Position};
