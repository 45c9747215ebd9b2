use crate::logic::{GameState, Position};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub const DEFAULT_SIZE: i32 = 7;

// Players move like chess knights.
const KNIGHT_DIRECTIONS: [(i32, i32); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    One,
    Two,
}

impl Player {
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::One => Self::Two,
            Self::Two => Self::One,
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::One => 0,
            Self::Two => 1,
        }
    }

    const fn symbol(self) -> char {
        match self {
            Self::One => '1',
            Self::Two => '2',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("board dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },

    #[error("layout is empty")]
    EmptyLayout,

    #[error("layout row {row} has {got} cells, expected {expected}")]
    RaggedLayout {
        row: usize,
        expected: usize,
        got: usize,
    },

    #[error("unexpected character '{character}' at ({row}, {col})")]
    InvalidCell {
        character: char,
        row: usize,
        col: usize,
    },

    #[error("player {0:?} appears more than once in the layout")]
    DuplicatePlayer(Player),

    #[error("move {mv} is not legal for {player:?}")]
    IllegalMove { mv: Position, player: Player },
}

/// Reference Isolation board.
///
/// Every move blocks the destination cell for the rest of the game. A player
/// that has not moved yet may jump to any blank cell; afterwards they move in
/// an L shape onto blank cells only. The player to move with no legal move
/// loses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    width: i32,
    height: i32,
    blocked: Vec<bool>,
    locations: [Option<Position>; 2],
    active: Player,
    move_count: u32,
}

impl Default for Board {
    fn default() -> Self {
        Self::empty(DEFAULT_SIZE, DEFAULT_SIZE)
    }
}

impl Board {
    pub fn new(width: i32, height: i32) -> Result<Self, BoardError> {
        if width <= 0 || height <= 0 {
            return Err(BoardError::InvalidDimensions { width, height });
        }
        Ok(Self::empty(width, height))
    }

    fn empty(width: i32, height: i32) -> Self {
        #[allow(clippy::cast_sign_loss)]
        let cells = (width * height) as usize;
        Self {
            width,
            height,
            blocked: vec![false; cells],
            locations: [None; 2],
            active: Player::One,
            move_count: 0,
        }
    }

    /// Reads the text layout produced by `Display`: one line per row, `.` for a
    /// blank cell, `#` for a blocked one and `1`/`2` for the players.
    pub fn parse(layout: &str, active: Player) -> Result<Self, BoardError> {
        let rows: Vec<&str> = layout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let expected = rows.first().ok_or(BoardError::EmptyLayout)?.chars().count();

        #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
        let mut board = Self::new(expected as i32, rows.len() as i32)?;
        board.active = active;

        for (r, line) in rows.iter().enumerate() {
            let got = line.chars().count();
            if got != expected {
                return Err(BoardError::RaggedLayout {
                    row: r,
                    expected,
                    got,
                });
            }
            for (c, character) in line.chars().enumerate() {
                #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
                let pos = Position::new(r as i32, c as i32);
                let player = match character {
                    '.' => continue,
                    '#' => None,
                    '1' => Some(Player::One),
                    '2' => Some(Player::Two),
                    _ => {
                        return Err(BoardError::InvalidCell {
                            character,
                            row: r,
                            col: c,
                        })
                    }
                };
                if let Some(p) = player {
                    let slot = &mut board.locations[p.index()];
                    if slot.is_some() {
                        return Err(BoardError::DuplicatePlayer(p));
                    }
                    *slot = Some(pos);
                }
                board.block(pos);
                board.move_count += 1;
            }
        }
        Ok(board)
    }

    pub const fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn is_blank(&self, pos: Position) -> bool {
        self.cell_index(pos)
            .and_then(|i| self.blocked.get(i))
            .is_some_and(|blocked| !blocked)
    }

    /// Plays `mv` for the active player after checking that it is legal.
    pub fn apply_move(&mut self, mv: Position) -> Result<(), BoardError> {
        if !self.active_legal_moves().contains(&mv) {
            return Err(BoardError::IllegalMove {
                mv,
                player: self.active,
            });
        }
        self.place(mv);
        Ok(())
    }

    fn place(&mut self, mv: Position) {
        self.block(mv);
        self.locations[self.active.index()] = Some(mv);
        self.active = self.active.opposite();
        self.move_count += 1;
    }

    fn block(&mut self, pos: Position) {
        if let Some(cell) = self.cell_index(pos).and_then(|i| self.blocked.get_mut(i)) {
            *cell = true;
        }
    }

    fn cell_index(&self, pos: Position) -> Option<usize> {
        if (0..self.height).contains(&pos.row) && (0..self.width).contains(&pos.col) {
            usize::try_from(pos.row * self.width + pos.col).ok()
        } else {
            None
        }
    }

    fn has_legal_moves(&self, player: Player) -> bool {
        match self.locations[player.index()] {
            None => self.blocked.iter().any(|b| !b),
            Some(loc) => KNIGHT_DIRECTIONS
                .iter()
                .any(|&(dr, dc)| self.is_blank(Position::new(loc.row + dr, loc.col + dc))),
        }
    }
}

impl GameState for Board {
    type Player = Player;

    fn active_player(&self) -> Player {
        self.active
    }

    fn opponent(&self, player: Player) -> Player {
        player.opposite()
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn width(&self) -> i32 {
        self.width
    }

    fn legal_moves(&self, player: Player) -> Vec<Position> {
        match self.locations[player.index()] {
            None => self.blank_spaces(),
            Some(loc) => KNIGHT_DIRECTIONS
                .iter()
                .map(|&(dr, dc)| Position::new(loc.row + dr, loc.col + dc))
                .filter(|&pos| self.is_blank(pos))
                .collect(),
        }
    }

    fn blank_spaces(&self) -> Vec<Position> {
        (0..self.height)
            .flat_map(|r| (0..self.width).map(move |c| Position::new(r, c)))
            .filter(|&pos| self.is_blank(pos))
            .collect()
    }

    fn forecast_move(&self, mv: Position) -> Self {
        let mut next = self.clone();
        next.place(mv);
        next
    }

    fn is_winner(&self, player: Player) -> bool {
        player != self.active && !self.has_legal_moves(self.active)
    }

    fn is_loser(&self, player: Player) -> bool {
        player == self.active && !self.has_legal_moves(self.active)
    }

    fn player_location(&self, player: Player) -> Option<Position> {
        self.locations[player.index()]
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.height {
            for c in 0..self.width {
                let pos = Position::new(r, c);
                let occupant = [Player::One, Player::Two]
                    .into_iter()
                    .find(|p| self.locations[p.index()] == Some(pos));
                let symbol = match occupant {
                    Some(p) => p.symbol(),
                    None if self.is_blank(pos) => '.',
                    None => '#',
                };
                write!(f, "{symbol}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
