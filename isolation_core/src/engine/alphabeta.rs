use crate::engine::clock::TimeBudget;
use crate::engine::config::SearchConfig;
use crate::engine::{elapsed_ms, SearchContext, SearchStats, SearchTimeout, Searcher};
use crate::logic::{GameState, Position};
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlphaBetaOutcome {
    pub score: f64,
    pub best_move: Position,
    /// Window in force when the node returned.
    pub alpha: f64,
    pub beta: f64,
}

/// Alpha-beta agent driven by iterative deepening.
///
/// `get_move` searches depth 1, 2, 3, ... until the budget runs out and plays
/// the move of the last depth that finished. `search_depth` in the config is
/// not used.
pub struct AlphaBetaPlayer<G: GameState> {
    config: SearchConfig<G>,
    stats: SearchStats,
}

impl<G: GameState> AlphaBetaPlayer<G> {
    pub fn new(config: SearchConfig<G>) -> Self {
        Self {
            config,
            stats: SearchStats::default(),
        }
    }

    pub const fn config(&self) -> &SearchConfig<G> {
        &self.config
    }

    /// Fixed-depth alpha-beta search with a full `(-inf, +inf)` window.
    pub fn alphabeta(
        &mut self,
        game: &G,
        depth: u32,
        time_left: &dyn TimeBudget,
    ) -> Result<AlphaBetaOutcome, SearchTimeout> {
        let mut ctx = SearchContext::new(game, &self.config, time_left);
        let result = search_to_depth(&mut ctx, game, depth);
        self.stats = ctx.stats(if result.is_ok() { depth } else { 0 });
        result
    }
}

fn search_to_depth<G: GameState>(
    ctx: &mut SearchContext<'_, G>,
    game: &G,
    depth: u32,
) -> Result<AlphaBetaOutcome, SearchTimeout> {
    ctx.check_time()?;
    eval_alphabeta(ctx, game, depth, f64::NEG_INFINITY, f64::INFINITY, true)
}

/// Fail-soft alpha-beta over the closed window `[alpha, beta]`.
///
/// A child equal to a bound is still searched exactly, so the later-move
/// tie-break picks the same move plain minimax would.
fn eval_alphabeta<G: GameState>(
    ctx: &mut SearchContext<'_, G>,
    game: &G,
    depth: u32,
    mut alpha: f64,
    mut beta: f64,
    maximize: bool,
) -> Result<AlphaBetaOutcome, SearchTimeout> {
    ctx.enter()?;

    let leaf = move |score: f64| AlphaBetaOutcome {
        score,
        best_move: Position::NONE,
        alpha,
        beta,
    };

    if let Some(value) = ctx.terminal_value(game) {
        return Ok(leaf(value));
    }

    if depth == 0 {
        return Ok(leaf(ctx.evaluate(game)));
    }

    let mut best_score = if maximize {
        f64::NEG_INFINITY
    } else {
        f64::INFINITY
    };
    let mut best_move = Position::NONE;

    for mv in game.active_legal_moves() {
        let child = eval_alphabeta(ctx, &game.forecast_move(mv), depth - 1, alpha, beta, !maximize)?;
        let score = child.score;

        if maximize {
            if score >= best_score {
                best_score = score;
                best_move = mv;
            }
            if score > beta {
                // Beta cutoff: the minimizer above never lets play reach here.
                return Ok(AlphaBetaOutcome {
                    score,
                    best_move: mv,
                    alpha,
                    beta,
                });
            }
            alpha = alpha.max(score);
        } else {
            if score <= best_score {
                best_score = score;
                best_move = mv;
            }
            if score < alpha {
                // Alpha cutoff.
                return Ok(AlphaBetaOutcome {
                    score,
                    best_move: mv,
                    alpha,
                    beta,
                });
            }
            beta = beta.min(score);
        }
    }

    Ok(AlphaBetaOutcome {
        score: best_score,
        best_move,
        alpha,
        beta,
    })
}

impl<G: GameState> Searcher<G> for AlphaBetaPlayer<G> {
    fn get_move(&mut self, game: &G, time_left: &dyn TimeBudget) -> Position {
        let started = Instant::now();
        let mut ctx = SearchContext::new(game, &self.config, time_left);

        let mut best_move = Position::NONE;
        let mut completed = 0;
        let mut depth = 1;

        loop {
            ctx.hit_horizon = false;
            match search_to_depth(&mut ctx, game, depth) {
                Ok(outcome) => {
                    best_move = outcome.best_move;
                    completed = depth;
                    log::trace!("depth {depth}: {} nodes, {} leaves", ctx.nodes, ctx.leaves);

                    // Nothing was cut off by the horizon, so going deeper
                    // would replay the same tree.
                    if !ctx.hit_horizon {
                        log::debug!("game tree exhausted at depth {depth}");
                        break;
                    }
                    depth += 1;
                }
                Err(SearchTimeout) => {
                    log::debug!("alpha-beta timed out during depth {depth}, keeping depth {completed}");
                    break;
                }
            }
        }

        self.stats = ctx.stats(completed);
        self.stats.elapsed_ms = elapsed_ms(started);
        log::debug!("alpha-beta chose {best_move} at depth {completed}");
        best_move
    }

    fn last_stats(&self) -> SearchStats {
        self.stats
    }
}
