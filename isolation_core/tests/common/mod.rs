#![allow(dead_code)]

use isolation_core::{GameState, Position, TimeBudget};
use std::cell::Cell;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Max,
    Min,
}

impl Side {
    pub const fn opposite(self) -> Self {
        match self {
            Self::Max => Self::Min,
            Self::Min => Self::Max,
        }
    }
}

struct Node {
    value: f64,
    children: Vec<usize>,
    winner: Option<Side>,
}

/// Hand-built game tree. Every node carries a static value (from `Max`'s point
/// of view) that `tree_score` reports when the search stops there.
pub struct TreeBuilder {
    nodes: Vec<Node>,
}

impl TreeBuilder {
    pub fn new(root_value: f64) -> Self {
        Self {
            nodes: vec![Node {
                value: root_value,
                children: Vec::new(),
                winner: None,
            }],
        }
    }

    pub fn child(&mut self, parent: usize, value: f64) -> usize {
        let id = self.nodes.len();
        self.nodes.push(Node {
            value,
            children: Vec::new(),
            winner: None,
        });
        self.nodes[parent].children.push(id);
        id
    }

    pub fn children(&mut self, parent: usize, values: &[f64]) -> Vec<usize> {
        values.iter().map(|&v| self.child(parent, v)).collect()
    }

    pub fn win(&mut self, node: usize, side: Side) {
        self.nodes[node].winner = Some(side);
    }

    pub fn build(self) -> TreeGame {
        TreeGame {
            nodes: Rc::new(self.nodes),
            node: 0,
            active: Side::Max,
        }
    }
}

#[derive(Clone)]
pub struct TreeGame {
    nodes: Rc<Vec<Node>>,
    node: usize,
    active: Side,
}

/// Move that leads to `node`.
pub fn to(node: usize) -> Position {
    Position::new(node as i32, 0)
}

impl TreeGame {
    fn current(&self) -> &Node {
        &self.nodes[self.node]
    }
}

impl GameState for TreeGame {
    type Player = Side;

    fn active_player(&self) -> Side {
        self.active
    }

    fn opponent(&self, player: Side) -> Side {
        player.opposite()
    }

    fn height(&self) -> i32 {
        1
    }

    fn width(&self) -> i32 {
        1
    }

    fn legal_moves(&self, player: Side) -> Vec<Position> {
        if player != self.active {
            return Vec::new();
        }
        self.current().children.iter().map(|&c| to(c)).collect()
    }

    fn blank_spaces(&self) -> Vec<Position> {
        Vec::new()
    }

    fn forecast_move(&self, mv: Position) -> Self {
        Self {
            nodes: Rc::clone(&self.nodes),
            node: mv.row as usize,
            active: self.active.opposite(),
        }
    }

    fn is_winner(&self, player: Side) -> bool {
        self.current().winner == Some(player)
    }

    fn is_loser(&self, player: Side) -> bool {
        self.current().winner == Some(player.opposite())
    }

    fn player_location(&self, _player: Side) -> Option<Position> {
        None
    }
}

pub fn tree_score(game: &TreeGame, player: Side) -> f64 {
    let value = game.current().value;
    match player {
        Side::Max => value,
        Side::Min => -value,
    }
}

/// Budget that allows a fixed number of reads and then reports no time left.
pub struct CallBudget {
    calls: Cell<u64>,
    limit: u64,
}

impl CallBudget {
    pub fn new(limit: u64) -> Self {
        Self {
            calls: Cell::new(0),
            limit,
        }
    }

    pub fn unlimited() -> Self {
        Self::new(u64::MAX)
    }

    pub fn calls(&self) -> u64 {
        self.calls.get()
    }
}

impl TimeBudget for CallBudget {
    fn time_left(&self) -> f64 {
        let n = self.calls.get();
        self.calls.set(n + 1);
        if n < self.limit {
            1000.0
        } else {
            0.0
        }
    }
}
