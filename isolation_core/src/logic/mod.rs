use serde::{Deserialize, Serialize};
use std::fmt;

pub mod board;

/// A cell on the board. `Position::NONE` stands in for "no move available".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub const NONE: Self = Self { row: -1, col: -1 };

    #[must_use]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    #[must_use]
    pub const fn is_none(self) -> bool {
        self.row == Self::NONE.row && self.col == Self::NONE.col
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::NONE
    }
}

impl From<(i32, i32)> for Position {
    fn from((row, col): (i32, i32)) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Read-only view of an Isolation game that the search engines consume.
///
/// Implementations must be persistent: `forecast_move` returns a new state and
/// leaves the receiver untouched, so sibling branches can share a parent.
pub trait GameState: Sized {
    type Player: Copy + Eq + fmt::Debug;

    fn active_player(&self) -> Self::Player;

    fn opponent(&self, player: Self::Player) -> Self::Player;

    fn inactive_player(&self) -> Self::Player {
        self.opponent(self.active_player())
    }

    fn height(&self) -> i32;

    fn width(&self) -> i32;

    /// Moves available to `player` if it were their turn.
    fn legal_moves(&self, player: Self::Player) -> Vec<Position>;

    fn active_legal_moves(&self) -> Vec<Position> {
        self.legal_moves(self.active_player())
    }

    fn blank_spaces(&self) -> Vec<Position>;

    /// Applies `mv` for the active player on a copy and hands the turn over.
    #[must_use]
    fn forecast_move(&self, mv: Position) -> Self;

    fn is_winner(&self, player: Self::Player) -> bool;

    fn is_loser(&self, player: Self::Player) -> bool;

    /// Terminal value: `+inf` for a won game, `-inf` for a lost one, `0` otherwise.
    fn utility(&self, player: Self::Player) -> f64 {
        if self.is_winner(player) {
            f64::INFINITY
        } else if self.is_loser(player) {
            f64::NEG_INFINITY
        } else {
            0.0
        }
    }

    /// `None` until the player has made their first move.
    fn player_location(&self, player: Self::Player) -> Option<Position>;
}
