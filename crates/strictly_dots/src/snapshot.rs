//! Read-only views handed to the presentation layer.

use super::action::{ClaimedBox, MoveOutcome};
use super::error::{ErrorKind, GameError};
use super::state::{GameState, TurnState};
use super::{Orientation, Outcome, Player, Scores};
use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};

/// One edge as seen by a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct EdgeView {
    /// Horizontal or vertical.
    pub orientation: Orientation,
    /// Row of the upper/left dot.
    pub row: usize,
    /// Column of the upper/left dot.
    pub col: usize,
    /// Whether the edge has been drawn.
    pub drawn: bool,
}

/// One box as seen by a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct BoxView {
    /// Row of the box.
    pub row: usize,
    /// Column of the box.
    pub col: usize,
    /// Owner, if claimed.
    pub owner: Option<Player>,
}

/// Complete picture of a game at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Snapshot {
    /// Dots per side.
    #[getter(copy)]
    dots: usize,
    /// Every edge, horizontal edges first, each block row-major.
    edges: Vec<EdgeView>,
    /// Every box, row-major.
    boxes: Vec<BoxView>,
    /// Current scores.
    #[getter(copy)]
    scores: Scores,
    /// Whose turn it is.
    #[getter(copy)]
    turn: TurnState,
    /// Edges drawn so far.
    #[getter(copy)]
    edges_drawn: usize,
    /// Edges on the whole board.
    #[getter(copy)]
    total_edges: usize,
    /// True once every edge is drawn.
    #[getter(copy)]
    game_over: bool,
    /// Final outcome once the game is over.
    #[getter(copy)]
    outcome: Option<Outcome>,
}

impl Snapshot {
    pub(crate) fn of(state: &GameState) -> Self {
        let board = state.board();
        Self {
            dots: board.dots(),
            edges: board
                .edges()
                .map(|(edge, drawn)| EdgeView::new(edge.orientation, edge.row, edge.col, drawn))
                .collect(),
            boxes: board
                .boxes()
                .map(|(coord, owner)| BoxView::new(coord.row, coord.col, owner))
                .collect(),
            scores: state.scores(),
            turn: state.turn(),
            edges_drawn: board.drawn_count(),
            total_edges: board.total_edges(),
            game_over: state.is_over(),
            outcome: state.result(),
        }
    }
}

/// Result of a move attempt, accepted or not, in a serializable shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct MoveResult {
    /// Whether the move was applied.
    #[getter(copy)]
    accepted: bool,
    /// Why the move was refused.
    #[getter(copy)]
    error: Option<ErrorKind>,
    /// Human-readable refusal reason.
    message: Option<String>,
    /// Boxes claimed by the move.
    completed_boxes: Vec<ClaimedBox>,
    /// Scores after the attempt.
    #[getter(copy)]
    score_after: Scores,
    /// Turn state after the attempt.
    #[getter(copy)]
    turn_after: TurnState,
    /// True if the game is over after the attempt.
    #[getter(copy)]
    game_over: bool,
}

impl MoveResult {
    /// Report for an applied move.
    pub fn from_outcome(outcome: &MoveOutcome) -> Self {
        Self {
            accepted: true,
            error: None,
            message: None,
            completed_boxes: outcome.completed().clone(),
            score_after: outcome.scores(),
            turn_after: outcome.turn(),
            game_over: outcome.is_game_over(),
        }
    }

    /// Report for a refused move; scores and turn are those of `state`.
    pub fn from_error(err: &GameError, state: &GameState) -> Self {
        Self {
            accepted: false,
            error: Some(err.kind()),
            message: Some(err.to_string()),
            completed_boxes: Vec::new(),
            score_after: state.scores(),
            turn_after: state.turn(),
            game_over: state.is_over(),
        }
    }
}
