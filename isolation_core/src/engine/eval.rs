use crate::logic::{GameState, Position};
use serde::{Deserialize, Serialize};

/// Static evaluation of `game` from `player`'s point of view.
pub type ScoreFn<G> = fn(&G, <G as GameState>::Player) -> f64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Heuristic {
    #[default]
    ScaledCentrality,
    Centrality,
    BorderPenalty,
    Improved,
    Open,
    Center,
    Null,
}

impl Heuristic {
    pub const ALL: [Self; 7] = [
        Self::ScaledCentrality,
        Self::Centrality,
        Self::BorderPenalty,
        Self::Improved,
        Self::Open,
        Self::Center,
        Self::Null,
    ];

    #[must_use]
    pub fn score_fn<G: GameState>(self) -> ScoreFn<G> {
        match self {
            Self::ScaledCentrality => scaled_centrality_score::<G>,
            Self::Centrality => centrality_score::<G>,
            Self::BorderPenalty => border_penalty_score::<G>,
            Self::Improved => improved_score::<G>,
            Self::Open => open_score::<G>,
            Self::Center => center_score::<G>,
            Self::Null => null_score::<G>,
        }
    }
}

fn terminal_score<G: GameState>(game: &G, player: G::Player) -> Option<f64> {
    if game.is_loser(player) {
        Some(f64::NEG_INFINITY)
    } else if game.is_winner(player) {
        Some(f64::INFINITY)
    } else {
        None
    }
}

#[allow(clippy::cast_precision_loss)]
fn mobility<G: GameState>(game: &G, player: G::Player) -> (f64, f64) {
    let own = game.legal_moves(player).len() as f64;
    let opp = game.legal_moves(game.opponent(player)).len() as f64;
    (own, opp)
}

/// 1 on the center diagonal, falling off linearly towards the corners.
fn centrality_weight<G: GameState>(game: &G, loc: Option<Position>) -> f64 {
    let Some(loc) = loc else {
        return 1.0;
    };
    let half_h = f64::from(game.height()) / 2.0;
    let half_w = f64::from(game.width()) / 2.0;
    let offset = f64::from(loc.row) - half_h + f64::from(loc.col) - half_w;
    1.0 - offset.abs() / (half_w + half_h)
}

/// Centrality-weighted mobility difference where the opponent's mobility is
/// scaled by the fraction of the board still blank.
#[allow(clippy::cast_precision_loss)]
pub fn scaled_centrality_score<G: GameState>(game: &G, player: G::Player) -> f64 {
    if let Some(score) = terminal_score(game, player) {
        return score;
    }
    let (own, opp) = mobility(game, player);
    let cells = f64::from(game.height()) * f64::from(game.width());
    let remaining = game.blank_spaces().len() as f64 / cells;
    centrality_weight(game, game.player_location(player)) * remaining.mul_add(-opp, own)
}

pub fn centrality_score<G: GameState>(game: &G, player: G::Player) -> f64 {
    if let Some(score) = terminal_score(game, player) {
        return score;
    }
    let (own, opp) = mobility(game, player);
    centrality_weight(game, game.player_location(player)) * (own - opp)
}

/// Mobility difference, halved on the border; the center cell is unbeatable.
pub fn border_penalty_score<G: GameState>(game: &G, player: G::Player) -> f64 {
    if let Some(score) = terminal_score(game, player) {
        return score;
    }
    let mut weight = 1.0;
    if let Some(loc) = game.player_location(player) {
        let (height, width) = (game.height(), game.width());
        if loc == Position::new(height / 2, width / 2) {
            return f64::INFINITY;
        }
        if loc.row == 0 || loc.row == height - 1 || loc.col == 0 || loc.col == width - 1 {
            weight = 0.5;
        }
    }
    let (own, opp) = mobility(game, player);
    weight * (own - opp)
}

pub fn improved_score<G: GameState>(game: &G, player: G::Player) -> f64 {
    if let Some(score) = terminal_score(game, player) {
        return score;
    }
    let (own, opp) = mobility(game, player);
    own - opp
}

pub fn open_score<G: GameState>(game: &G, player: G::Player) -> f64 {
    if let Some(score) = terminal_score(game, player) {
        return score;
    }
    mobility(game, player).0
}

/// Squared distance from the middle of the board.
pub fn center_score<G: GameState>(game: &G, player: G::Player) -> f64 {
    if let Some(score) = terminal_score(game, player) {
        return score;
    }
    game.player_location(player).map_or(0.0, |loc| {
        let dy = f64::from(game.height()) / 2.0 - f64::from(loc.row);
        let dx = f64::from(game.width()) / 2.0 - f64::from(loc.col);
        dx.mul_add(dx, dy * dy)
    })
}

pub fn null_score<G: GameState>(game: &G, player: G::Player) -> f64 {
    terminal_score(game, player).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::board::{Board, Player};

    const EPS: f64 = 1e-9;

    fn midgame() -> Board {
        Board::parse(
            ".......
             .......
             .......
             ...1...
             .......
             .......
             ......2",
            Player::One,
        )
        .unwrap()
    }

    #[test]
    fn test_terminal_states_score_infinite() {
        let board = Board::parse(
            "2..
             .1.
             ...",
            Player::One,
        )
        .unwrap();
        for heuristic in Heuristic::ALL {
            let score = heuristic.score_fn::<Board>();
            assert_eq!(score(&board, Player::One), f64::NEG_INFINITY, "{heuristic:?}");
            assert_eq!(score(&board, Player::Two), f64::INFINITY, "{heuristic:?}");
        }
    }

    #[test]
    fn test_centrality_weight() {
        let board = midgame();
        let center = centrality_weight(&board, Some(Position::new(3, 3)));
        assert!((center - 6.0 / 7.0).abs() < EPS);
        let corner = centrality_weight(&board, Some(Position::new(0, 0)));
        assert!(corner.abs() < EPS);
        assert!((centrality_weight(&board, None) - 1.0).abs() < EPS);
    }

    #[test]
    fn test_mobility_scores() {
        let board = midgame();
        // One has all 8 jumps from the middle, Two only 2 from its corner.
        assert!((improved_score(&board, Player::One) - 6.0).abs() < EPS);
        assert!((improved_score(&board, Player::Two) + 6.0).abs() < EPS);
        assert!((open_score(&board, Player::One) - 8.0).abs() < EPS);
        assert!((centrality_score(&board, Player::One) - 36.0 / 7.0).abs() < EPS);
    }

    #[test]
    fn test_scaled_centrality_discounts_opponent() {
        let board = midgame();
        let expected = 6.0 / 7.0 * (8.0 - 47.0 / 49.0 * 2.0);
        assert!((scaled_centrality_score(&board, Player::One) - expected).abs() < EPS);
    }

    #[test]
    fn test_border_penalty() {
        let board = midgame();
        assert_eq!(border_penalty_score(&board, Player::One), f64::INFINITY);
        assert!((border_penalty_score(&board, Player::Two) + 3.0).abs() < EPS);
    }

    #[test]
    fn test_center_and_null() {
        let board = midgame();
        assert!((center_score(&board, Player::One) - 0.5).abs() < EPS);
        assert!((center_score(&board, Player::Two) - 12.5).abs() < EPS);
        assert!(null_score(&board, Player::One).abs() < EPS);
    }

    #[test]
    fn test_unplaced_player() {
        let board = Board::default();
        // 49 options each, centrality weight falls back to 1.
        assert!(centrality_score(&board, Player::One).abs() < EPS);
        assert!(border_penalty_score(&board, Player::One).abs() < EPS);
        assert!((open_score(&board, Player::One) - 49.0).abs() < EPS);
        assert!(center_score(&board, Player::One).abs() < EPS);
    }

    #[test]
    fn test_heuristic_names() {
        let parsed: Heuristic = serde_json::from_str("\"border_penalty\"").unwrap();
        assert_eq!(parsed, Heuristic::BorderPenalty);
        assert_eq!(
            serde_json::to_string(&Heuristic::ScaledCentrality).unwrap(),
            "\"scaled_centrality\""
        );
    }
}
