use crate::engine::eval::{Heuristic, ScoreFn};
use crate::logic::GameState;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("search depth must be at least 1")]
    ZeroDepth,

    #[error("timer threshold must be a finite, non-negative number of milliseconds, got {0}")]
    InvalidThreshold(f64),
}

/// Serializable engine settings; the heuristic is named rather than held.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Plies searched by fixed-depth minimax.
    pub search_depth: u32,
    pub heuristic: Heuristic,
    /// Search is abandoned once fewer milliseconds than this remain.
    pub timer_threshold_ms: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            search_depth: 3,
            heuristic: Heuristic::default(),
            timer_threshold_ms: 10.0,
        }
    }
}

impl EngineConfig {
    pub fn load_from_json(json_str: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json_str)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search_depth == 0 {
            return Err(ConfigError::ZeroDepth);
        }
        if !self.timer_threshold_ms.is_finite() || self.timer_threshold_ms < 0.0 {
            return Err(ConfigError::InvalidThreshold(self.timer_threshold_ms));
        }
        Ok(())
    }
}

/// Runtime settings of one agent. Fixed for the duration of a `get_move`.
pub struct SearchConfig<G: GameState> {
    pub search_depth: u32,
    pub score_fn: ScoreFn<G>,
    pub timer_threshold_ms: f64,
}

impl<G: GameState> SearchConfig<G> {
    pub const fn new(search_depth: u32, score_fn: ScoreFn<G>, timer_threshold_ms: f64) -> Self {
        Self {
            search_depth,
            score_fn,
            timer_threshold_ms,
        }
    }

    #[must_use]
    pub fn from_engine_config(config: &EngineConfig) -> Self {
        Self::new(
            config.search_depth,
            config.heuristic.score_fn::<G>(),
            config.timer_threshold_ms,
        )
    }
}

impl<G: GameState> Default for SearchConfig<G> {
    fn default() -> Self {
        Self::from_engine_config(&EngineConfig::default())
    }
}

impl<G: GameState> Clone for SearchConfig<G> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<G: GameState> Copy for SearchConfig<G> {}

impl<G: GameState> fmt::Debug for SearchConfig<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchConfig")
            .field("search_depth", &self.search_depth)
            .field("timer_threshold_ms", &self.timer_threshold_ms)
            .finish_non_exhaustive()
    }
}
