use crate::engine::clock::{check_time, TimeBudget};
use crate::engine::config::SearchConfig;
use crate::engine::{elapsed_ms, SearchContext, SearchOutcome, SearchStats, SearchTimeout, Searcher};
use crate::logic::{GameState, Position};
use std::time::Instant;

/// Fixed-depth minimax agent.
pub struct MinimaxPlayer<G: GameState> {
    config: SearchConfig<G>,
    stats: SearchStats,
}

impl<G: GameState> MinimaxPlayer<G> {
    pub fn new(config: SearchConfig<G>) -> Self {
        Self {
            config,
            stats: SearchStats::default(),
        }
    }

    pub const fn config(&self) -> &SearchConfig<G> {
        &self.config
    }

    /// Searches `depth` plies below `game` on behalf of its active player.
    ///
    /// The returned move is `Position::NONE` when the root is terminal, when
    /// `depth` is 0, or when the active player has no legal move.
    pub fn minimax(
        &mut self,
        game: &G,
        depth: u32,
        time_left: &dyn TimeBudget,
    ) -> Result<SearchOutcome, SearchTimeout> {
        check_time(time_left, self.config.timer_threshold_ms)?;

        let mut ctx = SearchContext::new(game, &self.config, time_left);
        let result = eval_minimax(&mut ctx, game, depth, true);
        self.stats = ctx.stats(if result.is_ok() { depth } else { 0 });
        result
    }
}

fn eval_minimax<G: GameState>(
    ctx: &mut SearchContext<'_, G>,
    game: &G,
    depth: u32,
    maximize: bool,
) -> Result<SearchOutcome, SearchTimeout> {
    ctx.enter()?;

    if let Some(value) = ctx.terminal_value(game) {
        return Ok(SearchOutcome::new(value, Position::NONE));
    }

    if depth == 0 {
        return Ok(SearchOutcome::new(ctx.evaluate(game), Position::NONE));
    }

    let mut best = SearchOutcome::new(
        if maximize {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        },
        Position::NONE,
    );

    for mv in game.active_legal_moves() {
        let child = eval_minimax(ctx, &game.forecast_move(mv), depth - 1, !maximize)?;

        // Ties go to the later move.
        let improves = if maximize {
            child.score >= best.score
        } else {
            child.score <= best.score
        };
        if improves {
            best = SearchOutcome::new(child.score, mv);
        }
    }

    Ok(best)
}

impl<G: GameState> Searcher<G> for MinimaxPlayer<G> {
    fn get_move(&mut self, game: &G, time_left: &dyn TimeBudget) -> Position {
        let started = Instant::now();
        self.stats = SearchStats::default();

        let best_move = match self.minimax(game, self.config.search_depth, time_left) {
            Ok(outcome) => {
                log::debug!(
                    "minimax depth {} chose {} (score {})",
                    self.config.search_depth,
                    outcome.best_move,
                    outcome.score
                );
                outcome.best_move
            }
            Err(SearchTimeout) => {
                log::debug!("minimax timed out after {} nodes", self.stats.nodes);
                Position::NONE
            }
        };

        self.stats.elapsed_ms = elapsed_ms(started);
        best_move
    }

    fn last_stats(&self) -> SearchStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::clock::Unlimited;
    use crate::engine::eval::improved_score;
    use crate::logic::board::{Board, Player};

    fn player(depth: u32) -> MinimaxPlayer<Board> {
        MinimaxPlayer::new(SearchConfig::new(depth, improved_score::<Board>, 10.0))
    }

    #[test]
    fn test_no_legal_moves_returns_sentinel() {
        let board = Board::parse(
            "2..
             .1.
             ...",
            Player::One,
        )
        .unwrap();
        for depth in 1..=3 {
            let outcome = player(depth).minimax(&board, depth, &Unlimited).unwrap();
            assert_eq!(outcome.best_move, Position::NONE);
            assert_eq!(outcome.score, f64::NEG_INFINITY);
        }
    }

    #[test]
    fn test_depth_zero_evaluates_root() {
        let board = Board::parse("1....\n.....\n....2", Player::One).unwrap();
        let mut agent = player(1);
        let outcome = agent.minimax(&board, 0, &Unlimited).unwrap();
        assert_eq!(outcome.best_move, Position::NONE);
        assert!((outcome.score - improved_score(&board, Player::One)).abs() < f64::EPSILON);
        assert_eq!(agent.last_stats().leaves, 1);
    }

    #[test]
    fn test_takes_the_winning_jump() {
        // One can strand Two by taking (2,3), its only escape square.
        let board = Board::parse(
            "..1..
             .....
             .....
             ..#..
             ....2",
            Player::One,
        )
        .unwrap();
        assert_eq!(board.legal_moves(Player::Two), vec![Position::new(2, 3)]);

        let mut agent = player(2);
        let mv = agent.get_move(&board, &Unlimited);
        assert_eq!(mv, Position::new(2, 3));
        assert_eq!(agent.last_stats().depth, 2);
    }

    #[test]
    fn test_timeout_returns_sentinel() {
        let board = Board::default();
        let mut agent = player(3);
        let mv = agent.get_move(&board, &|| 5.0);
        assert_eq!(mv, Position::NONE);
        assert_eq!(agent.last_stats().depth, 0);
    }
}
