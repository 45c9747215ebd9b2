use crate::engine::clock::TimeBudget;
use crate::engine::config::SearchConfig;
use crate::engine::eval::ScoreFn;
use crate::logic::{GameState, Position};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod alphabeta;
pub mod clock;
pub mod config;
pub mod eval;
pub mod minimax;

/// Raised at the top of a recursive call once the turn budget drops below
/// the configured threshold. Only `get_move` handles it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("search aborted: time budget exceeded")]
pub struct SearchTimeout;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Deepest search that ran to completion, 0 if none did.
    pub depth: u32,
    pub nodes: u64,
    /// Evaluation-function calls.
    pub leaves: u64,
    pub elapsed_ms: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchOutcome {
    pub score: f64,
    pub best_move: Position,
}

impl SearchOutcome {
    pub const fn new(score: f64, best_move: Position) -> Self {
        Self { score, best_move }
    }
}

pub trait Searcher<G: GameState> {
    /// Picks a move for the active player of `game`, or `Position::NONE` when
    /// there is none or the budget ran out before any search finished.
    fn get_move(&mut self, game: &G, time_left: &dyn TimeBudget) -> Position;

    fn last_stats(&self) -> SearchStats;
}

/// Per-search bookkeeping shared by both engines.
struct SearchContext<'a, G: GameState> {
    player: G::Player,
    score_fn: ScoreFn<G>,
    budget: &'a dyn TimeBudget,
    threshold_ms: f64,
    nodes: u64,
    leaves: u64,
    hit_horizon: bool,
}

impl<'a, G: GameState> SearchContext<'a, G> {
    fn new(game: &G, config: &SearchConfig<G>, budget: &'a dyn TimeBudget) -> Self {
        Self {
            player: game.active_player(),
            score_fn: config.score_fn,
            budget,
            threshold_ms: config.timer_threshold_ms,
            nodes: 0,
            leaves: 0,
            hit_horizon: false,
        }
    }

    fn check_time(&self) -> Result<(), SearchTimeout> {
        clock::check_time(self.budget, self.threshold_ms)
    }

    /// Time check plus node count; every recursive call starts here.
    fn enter(&mut self) -> Result<(), SearchTimeout> {
        self.check_time()?;
        self.nodes += 1;
        Ok(())
    }

    fn terminal_value(&self, game: &G) -> Option<f64> {
        let active = game.active_player();
        (game.is_winner(active) || game.is_loser(active)).then(|| game.utility(self.player))
    }

    fn evaluate(&mut self, game: &G) -> f64 {
        self.leaves += 1;
        self.hit_horizon = true;
        (self.score_fn)(game, self.player)
    }

    const fn stats(&self, depth: u32) -> SearchStats {
        SearchStats {
            depth,
            nodes: self.nodes,
            leaves: self.leaves,
            elapsed_ms: 0.0,
        }
    }
}

fn elapsed_ms(started: std::time::Instant) -> f64 {
    started.elapsed().as_secs_f64() * 1000.0
}
