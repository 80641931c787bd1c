//! Board model: the arena of edges and boxes for one game.

use super::error::GameError;
use super::rules;
use super::types::{BoxCoord, Edge, Orientation, Player};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// Dots per side when no size is given.
pub const DEFAULT_DOTS: usize = 5;

/// Smallest grid that still contains a box.
pub const MIN_DOTS: usize = 2;

/// Largest grid accepted; keeps every size product well inside `usize`.
pub const MAX_DOTS: usize = 1024;

/// Dots-and-boxes board with `dots x dots` dots.
///
/// Edges live in a single vector: all horizontal edges in row-major
/// order, followed by all vertical edges in row-major order. Box owners
/// are stored row-major. Every lookup is a direct index.
///
/// Deserialization goes through the same checks as [`Board::new`] plus
/// consistency checks on the stored vectors, so a malformed board is
/// rejected rather than panicking later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBoard")]
pub struct Board {
    dots: usize,
    edges: Vec<bool>,
    owners: Vec<Option<Player>>,
    drawn: usize,
}

impl Board {
    /// Creates an empty board with `dots` dots per side.
    ///
    /// # Errors
    ///
    /// Returns `GameError::InvalidGridSize` if `dots` is outside
    /// [`MIN_DOTS`]..=[`MAX_DOTS`].
    #[instrument]
    pub fn new(dots: usize) -> Result<Self, GameError> {
        check_size(dots)?;
        Ok(Self::empty(dots))
    }

    /// Builds an empty board without validating the size.
    pub(crate) fn empty(dots: usize) -> Self {
        let span = dots - 1;
        Self {
            dots,
            edges: vec![false; 2 * dots * span],
            owners: vec![None; span * span],
            drawn: 0,
        }
    }

    /// Dots per side.
    pub fn dots(&self) -> usize {
        self.dots
    }

    /// Boxes per side.
    pub fn boxes_per_side(&self) -> usize {
        self.dots - 1
    }

    /// Total number of edges, `2 * N * (N - 1)`.
    pub fn total_edges(&self) -> usize {
        self.edges.len()
    }

    /// Total number of boxes, `(N - 1)^2`.
    pub fn total_boxes(&self) -> usize {
        self.owners.len()
    }

    /// Number of edges drawn so far.
    pub fn drawn_count(&self) -> usize {
        self.drawn
    }

    /// Number of edges still undrawn.
    pub fn remaining_edges(&self) -> usize {
        self.total_edges() - self.drawn
    }

    /// Returns true if the edge's coordinates are inside the grid.
    pub fn contains_edge(&self, edge: Edge) -> bool {
        self.edge_index(edge).is_some()
    }

    /// Returns true if the box's coordinates are inside the grid.
    pub fn contains_box(&self, coord: BoxCoord) -> bool {
        self.box_index(coord).is_some()
    }

    fn edge_index(&self, edge: Edge) -> Option<usize> {
        let span = self.dots - 1;
        match edge.orientation {
            Orientation::Horizontal if edge.row < self.dots && edge.col < span => {
                Some(edge.row * span + edge.col)
            }
            Orientation::Vertical if edge.row < span && edge.col < self.dots => {
                Some(self.dots * span + edge.row * self.dots + edge.col)
            }
            _ => None,
        }
    }

    fn edge_at(&self, index: usize) -> Edge {
        let span = self.dots - 1;
        let horizontal = self.dots * span;
        if index < horizontal {
            Edge::horizontal(index / span, index % span)
        } else {
            let index = index - horizontal;
            Edge::vertical(index / self.dots, index % self.dots)
        }
    }

    fn box_index(&self, coord: BoxCoord) -> Option<usize> {
        let span = self.dots - 1;
        (coord.row < span && coord.col < span).then(|| coord.row * span + coord.col)
    }

    /// Checks whether an edge has been drawn.
    ///
    /// # Errors
    ///
    /// Returns `GameError::InvalidEdge` for out-of-range coordinates.
    pub fn is_edge_drawn(&self, edge: Edge) -> Result<bool, GameError> {
        self.edge_index(edge)
            .map(|i| self.edges[i])
            .ok_or(GameError::InvalidEdge(edge))
    }

    /// Draws an edge and returns the boxes it completed (0, 1 or 2).
    ///
    /// Box owners are not touched; the caller assigns them.
    ///
    /// # Errors
    ///
    /// Returns `GameError::InvalidEdge` for out-of-range coordinates and
    /// `GameError::AlreadyDrawn` if the edge is already drawn. The board
    /// is unchanged on error.
    #[instrument(skip(self), fields(edge = %edge))]
    pub fn draw_edge(&mut self, edge: Edge) -> Result<Vec<BoxCoord>, GameError> {
        let index = self.edge_index(edge).ok_or(GameError::InvalidEdge(edge))?;
        if self.edges[index] {
            return Err(GameError::AlreadyDrawn(edge));
        }

        self.edges[index] = true;
        self.drawn += 1;

        let completed = rules::completed_by(self, edge);
        debug!(drawn = self.drawn, completed = completed.len(), "Edge drawn");
        Ok(completed)
    }

    /// Returns the owner of a box, if any.
    ///
    /// # Errors
    ///
    /// Returns `GameError::InvalidBox` for out-of-range coordinates.
    pub fn box_owner(&self, coord: BoxCoord) -> Result<Option<Player>, GameError> {
        self.box_index(coord)
            .map(|i| self.owners[i])
            .ok_or(GameError::InvalidBox(coord))
    }

    /// Assigns a completed box to a player. Ownership is set exactly once.
    ///
    /// # Errors
    ///
    /// * `GameError::InvalidBox` for out-of-range coordinates.
    /// * `GameError::AlreadyOwned` if the box already has an owner.
    /// * `GameError::BoxNotComplete` if any of its four edges is undrawn.
    #[instrument(skip(self), fields(coord = %coord, player = %player))]
    pub fn set_box_owner(&mut self, coord: BoxCoord, player: Player) -> Result<(), GameError> {
        let index = self.box_index(coord).ok_or(GameError::InvalidBox(coord))?;
        if self.owners[index].is_some() {
            warn!("Attempted to reassign an owned box");
            return Err(GameError::AlreadyOwned(coord));
        }
        if !rules::is_box_complete(self, coord) {
            warn!("Attempted to claim an incomplete box");
            return Err(GameError::BoxNotComplete(coord));
        }
        self.owners[index] = Some(player);
        Ok(())
    }

    /// Checks whether all four sides of a box are drawn.
    ///
    /// # Errors
    ///
    /// Returns `GameError::InvalidBox` for out-of-range coordinates.
    pub fn is_box_complete(&self, coord: BoxCoord) -> Result<bool, GameError> {
        if !self.contains_box(coord) {
            return Err(GameError::InvalidBox(coord));
        }
        Ok(rules::is_box_complete(self, coord))
    }

    /// Iterates over every edge with its drawn flag, in storage order.
    pub fn edges(&self) -> impl Iterator<Item = (Edge, bool)> + '_ {
        self.edges
            .iter()
            .enumerate()
            .map(|(i, &drawn)| (self.edge_at(i), drawn))
    }

    /// All edges not yet drawn, in storage order.
    pub fn undrawn_edges(&self) -> Vec<Edge> {
        self.edges()
            .filter(|(_, drawn)| !drawn)
            .map(|(edge, _)| edge)
            .collect()
    }

    /// Iterates over every box with its owner, row-major.
    pub fn boxes(&self) -> impl Iterator<Item = (BoxCoord, Option<Player>)> + '_ {
        let span = self.dots - 1;
        self.owners
            .iter()
            .enumerate()
            .map(move |(i, &owner)| (BoxCoord::new(i / span, i % span), owner))
    }

    /// Number of boxes owned by the given player.
    pub fn owned_by(&self, player: Player) -> usize {
        self.owners.iter().filter(|o| **o == Some(player)).count()
    }

    /// Formats the board as a human-readable string.
    ///
    /// Dots are `.`, drawn edges `---` / `|`, owned boxes carry the
    /// owner's mark.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..self.dots {
            for col in 0..self.dots {
                result.push('.');
                if col + 1 < self.dots {
                    let drawn = self.drawn_unchecked(Edge::horizontal(row, col));
                    result.push_str(if drawn { "---" } else { "   " });
                }
            }
            if row + 1 == self.dots {
                break;
            }
            result.push('\n');
            for col in 0..self.dots {
                let drawn = self.drawn_unchecked(Edge::vertical(row, col));
                result.push(if drawn { '|' } else { ' ' });
                if col + 1 < self.dots {
                    match self.owners[row * (self.dots - 1) + col] {
                        Some(owner) => {
                            result.push(' ');
                            result.push(owner.mark());
                            result.push(' ');
                        }
                        None => result.push_str("   "),
                    }
                }
            }
            result.push('\n');
        }
        result
    }

    /// Drawn flag for an edge, treating off-grid edges as undrawn.
    pub(crate) fn drawn_unchecked(&self, edge: Edge) -> bool {
        self.edge_index(edge).is_some_and(|i| self.edges[i])
    }

    #[cfg(test)]
    pub(crate) fn force_owner(&mut self, coord: BoxCoord, owner: Option<Player>) {
        if let Some(i) = self.box_index(coord) {
            self.owners[i] = owner;
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::empty(DEFAULT_DOTS)
    }
}

fn check_size(dots: usize) -> Result<(), GameError> {
    if (MIN_DOTS..=MAX_DOTS).contains(&dots) {
        Ok(())
    } else {
        warn!(dots, "Rejected grid size");
        Err(GameError::InvalidGridSize(dots))
    }
}

/// Wire shape of a [`Board`] before validation.
#[derive(Deserialize)]
struct RawBoard {
    dots: usize,
    edges: Vec<bool>,
    owners: Vec<Option<Player>>,
    drawn: usize,
}

impl TryFrom<RawBoard> for Board {
    type Error = GameError;

    fn try_from(raw: RawBoard) -> Result<Self, Self::Error> {
        check_size(raw.dots)?;
        let expected = Self::empty(raw.dots);

        if raw.edges.len() != expected.edges.len() {
            return Err(GameError::InvariantViolation(format!(
                "board has {} edges, expected {}",
                raw.edges.len(),
                expected.edges.len()
            )));
        }
        if raw.owners.len() != expected.owners.len() {
            return Err(GameError::InvariantViolation(format!(
                "board has {} boxes, expected {}",
                raw.owners.len(),
                expected.owners.len()
            )));
        }
        let flagged = raw.edges.iter().filter(|drawn| **drawn).count();
        if raw.drawn != flagged {
            return Err(GameError::InvariantViolation(format!(
                "board counts {} drawn edges but {} are flagged",
                raw.drawn, flagged
            )));
        }

        let board = Self {
            dots: raw.dots,
            edges: raw.edges,
            owners: raw.owners,
            drawn: raw.drawn,
        };
        if let Some((coord, _)) = board
            .boxes()
            .find(|(coord, owner)| owner.is_some() && !rules::is_box_complete(&board, *coord))
        {
            return Err(GameError::BoxNotComplete(coord));
        }
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_board_counts() {
        let board = Board::default();
        assert_eq!(board.dots(), 5);
        assert_eq!(board.total_edges(), 40);
        assert_eq!(board.total_boxes(), 16);
        assert_eq!(board.remaining_edges(), 40);
    }

    #[test]
    fn test_rejects_tiny_grid() {
        assert_eq!(Board::new(1), Err(GameError::InvalidGridSize(1)));
        assert!(Board::new(2).is_ok());
    }

    #[test]
    fn test_rejects_huge_grid() {
        assert!(Board::new(MAX_DOTS).is_ok());
        assert_eq!(
            Board::new(MAX_DOTS + 1),
            Err(GameError::InvalidGridSize(MAX_DOTS + 1))
        );
        assert_eq!(
            Board::new(usize::MAX),
            Err(GameError::InvalidGridSize(usize::MAX))
        );
    }

    #[test]
    fn test_deserialize_round_trips_valid_board() {
        let mut board = Board::new(3).unwrap();
        board.draw_edge(Edge::vertical(1, 2)).unwrap();
        let json = serde_json::to_string(&board).unwrap();
        let restored: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, board);
    }

    #[test]
    fn test_deserialize_rejects_malformed_boards() {
        let cases = [
            // vectors too short for the grid
            r#"{"dots":5,"edges":[],"owners":[],"drawn":0}"#,
            // no grid at all
            r#"{"dots":0,"edges":[],"owners":[],"drawn":0}"#,
            // counter disagrees with the flags
            r#"{"dots":2,"edges":[false,false,false,false],"owners":[null],"drawn":9}"#,
            // owner on a box with no sides drawn
            r#"{"dots":2,"edges":[false,false,false,false],"owners":["computer"],"drawn":0}"#,
        ];
        for json in cases {
            assert!(serde_json::from_str::<Board>(json).is_err(), "accepted {json}");
        }
    }

    #[test]
    fn test_edge_bounds_per_orientation() {
        let board = Board::default();
        assert!(board.contains_edge(Edge::horizontal(4, 3)));
        assert!(!board.contains_edge(Edge::horizontal(4, 4)));
        assert!(!board.contains_edge(Edge::horizontal(5, 0)));
        assert!(board.contains_edge(Edge::vertical(3, 4)));
        assert!(!board.contains_edge(Edge::vertical(4, 0)));
        assert!(!board.contains_edge(Edge::vertical(0, 5)));
    }

    #[test]
    fn test_edges_enumerate_every_slot_once() {
        let board = Board::default();
        let edges: Vec<Edge> = board.edges().map(|(e, _)| e).collect();
        assert_eq!(edges.len(), 40);
        for edge in &edges {
            assert!(board.contains_edge(*edge));
        }
        let mut unique = edges.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), 40);
    }

    #[test]
    fn test_draw_edge_twice_fails() {
        let mut board = Board::default();
        let edge = Edge::horizontal(0, 0);
        assert_eq!(board.draw_edge(edge), Ok(vec![]));
        assert_eq!(board.draw_edge(edge), Err(GameError::AlreadyDrawn(edge)));
        assert_eq!(board.drawn_count(), 1);
    }

    #[test]
    fn test_draw_edge_out_of_range() {
        let mut board = Board::default();
        let edge = Edge::vertical(4, 4);
        assert_eq!(board.draw_edge(edge), Err(GameError::InvalidEdge(edge)));
        assert_eq!(board.is_edge_drawn(edge), Err(GameError::InvalidEdge(edge)));
        assert_eq!(board.drawn_count(), 0);
    }

    #[test]
    fn test_last_side_completes_box() {
        let mut board = Board::default();
        board.draw_edge(Edge::horizontal(0, 0)).unwrap();
        board.draw_edge(Edge::horizontal(1, 0)).unwrap();
        board.draw_edge(Edge::vertical(0, 0)).unwrap();
        let completed = board.draw_edge(Edge::vertical(0, 1)).unwrap();
        assert_eq!(completed, vec![BoxCoord::new(0, 0)]);
    }

    #[test]
    fn test_shared_edge_completes_two_boxes() {
        let mut board = Board::default();
        for edge in [
            Edge::horizontal(0, 0),
            Edge::horizontal(1, 0),
            Edge::vertical(0, 0),
            Edge::horizontal(0, 1),
            Edge::horizontal(1, 1),
            Edge::vertical(0, 2),
        ] {
            assert!(board.draw_edge(edge).unwrap().is_empty());
        }
        let completed = board.draw_edge(Edge::vertical(0, 1)).unwrap();
        assert_eq!(completed, vec![BoxCoord::new(0, 0), BoxCoord::new(0, 1)]);
    }

    #[test]
    fn test_set_box_owner_once() {
        let mut board = Board::default();
        let coord = BoxCoord::new(0, 0);
        assert_eq!(
            board.set_box_owner(coord, Player::Human),
            Err(GameError::BoxNotComplete(coord))
        );
        for edge in [
            Edge::horizontal(0, 0),
            Edge::horizontal(1, 0),
            Edge::vertical(0, 0),
            Edge::vertical(0, 1),
        ] {
            board.draw_edge(edge).unwrap();
        }
        assert!(board.set_box_owner(coord, Player::Human).is_ok());
        assert_eq!(
            board.set_box_owner(coord, Player::Computer),
            Err(GameError::AlreadyOwned(coord))
        );
        assert_eq!(board.box_owner(coord), Ok(Some(Player::Human)));
        assert_eq!(board.owned_by(Player::Human), 1);
    }

    #[test]
    fn test_box_owner_out_of_range() {
        let board = Board::default();
        let coord = BoxCoord::new(4, 0);
        assert_eq!(board.box_owner(coord), Err(GameError::InvalidBox(coord)));
    }

    #[test]
    fn test_display_marks_edges_and_owner() {
        let mut board = Board::new(2).unwrap();
        for edge in [
            Edge::horizontal(0, 0),
            Edge::horizontal(1, 0),
            Edge::vertical(0, 0),
            Edge::vertical(0, 1),
        ] {
            board.draw_edge(edge).unwrap();
        }
        board.set_box_owner(BoxCoord::new(0, 0), Player::Computer).unwrap();
        assert_eq!(board.display(), ".---.\n| C |\n.---.");
    }
}
