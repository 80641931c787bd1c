//! First-class move types for dots and boxes.
//!
//! Moves are domain events, not side effects. They capture who drew
//! which edge and can be validated, logged, and replayed.

use super::state::TurnState;
use super::{BoxCoord, Edge, Outcome, Player, Scores};
use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};

/// A move: a player drawing one edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, new)]
pub struct Move {
    /// The player drawing the edge.
    pub player: Player,
    /// The edge being drawn.
    pub edge: Edge,
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.player, self.edge)
    }
}

/// A box claimed by a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, new)]
pub struct ClaimedBox {
    /// Row of the box.
    pub row: usize,
    /// Column of the box.
    pub col: usize,
    /// Who claimed it.
    pub owner: Player,
}

impl ClaimedBox {
    /// Coordinates of the claimed box.
    pub fn coord(&self) -> BoxCoord {
        BoxCoord::new(self.row, self.col)
    }
}

/// What an accepted move did to the game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct MoveOutcome {
    /// The move that was applied.
    #[getter(copy)]
    applied: Move,
    /// Boxes completed (and claimed) by this move, at most two.
    completed: Vec<ClaimedBox>,
    /// Scores after the move.
    #[getter(copy)]
    scores: Scores,
    /// Turn state after the move.
    #[getter(copy)]
    turn: TurnState,
    /// Final outcome, present only when this move ended the game.
    #[getter(copy)]
    outcome: Option<Outcome>,
}

impl MoveOutcome {
    pub(crate) fn new(
        applied: Move,
        completed: Vec<ClaimedBox>,
        scores: Scores,
        turn: TurnState,
        outcome: Option<Outcome>,
    ) -> Self {
        Self {
            applied,
            completed,
            scores,
            turn,
            outcome,
        }
    }

    /// True if the mover keeps the turn.
    pub fn extra_turn(&self) -> bool {
        !self.completed.is_empty() && !self.is_game_over()
    }

    /// True if this move ended the game.
    pub fn is_game_over(&self) -> bool {
        self.turn == TurnState::GameOver
    }
}
