//! Core domain types for dots and boxes.

use derive_new::new;
use serde::{Deserialize, Serialize};

/// A participant in the game.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    /// The human at the keyboard (moves first).
    #[serde(rename = "player")]
    #[display("Player")]
    Human,
    /// The computer opponent.
    #[display("Computer")]
    Computer,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::Human => Player::Computer,
            Player::Computer => Player::Human,
        }
    }

    /// Single-letter mark used when rendering an owned box.
    pub fn mark(self) -> char {
        match self {
            Player::Human => 'P',
            Player::Computer => 'C',
        }
    }
}

/// Direction of a line segment between two adjacent dots.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Connects dot `(row, col)` to `(row, col + 1)`.
    #[display("horizontal")]
    Horizontal,
    /// Connects dot `(row, col)` to `(row + 1, col)`.
    #[display("vertical")]
    Vertical,
}

impl Orientation {
    /// Returns the other orientation.
    pub fn flip(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }
}

/// A potential line between two adjacent dots, addressed by coordinates.
///
/// Whether the coordinates are in range depends on the grid size and is
/// checked by [`crate::Board`], not here.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, new,
)]
pub struct Edge {
    /// Horizontal or vertical.
    pub orientation: Orientation,
    /// Row of the upper/left dot.
    pub row: usize,
    /// Column of the upper/left dot.
    pub col: usize,
}

impl Edge {
    /// Horizontal edge from dot `(row, col)` to `(row, col + 1)`.
    pub fn horizontal(row: usize, col: usize) -> Self {
        Self::new(Orientation::Horizontal, row, col)
    }

    /// Vertical edge from dot `(row, col)` to `(row + 1, col)`.
    pub fn vertical(row: usize, col: usize) -> Self {
        Self::new(Orientation::Vertical, row, col)
    }
}

impl std::fmt::Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = match self.orientation {
            Orientation::Horizontal => 'H',
            Orientation::Vertical => 'V',
        };
        write!(f, "{}({},{})", tag, self.row, self.col)
    }
}

/// A unit cell, identified by the dot at its top-left corner.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, new,
)]
pub struct BoxCoord {
    /// Row of the box.
    pub row: usize,
    /// Column of the box.
    pub col: usize,
}

impl std::fmt::Display for BoxCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// Boxes claimed by each side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Scores {
    /// Boxes claimed by the human.
    #[serde(rename = "player")]
    pub human: usize,
    /// Boxes claimed by the computer.
    pub computer: usize,
}

impl Scores {
    /// Returns the score of the given player.
    pub fn get(&self, player: Player) -> usize {
        match player {
            Player::Human => self.human,
            Player::Computer => self.computer,
        }
    }

    /// Adds `boxes` to the given player's score.
    pub fn award(&mut self, player: Player, boxes: usize) {
        match player {
            Player::Human => self.human += boxes,
            Player::Computer => self.computer += boxes,
        }
    }

    /// Total boxes claimed by both sides.
    pub fn total(&self) -> usize {
        self.human + self.computer
    }
}

impl std::fmt::Display for Scores {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player: {} | Computer: {}", self.human, self.computer)
    }
}
