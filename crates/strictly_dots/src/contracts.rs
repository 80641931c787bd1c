//! Contract-based validation for dots and boxes.
//!
//! Contracts define correctness through preconditions and postconditions.
//! They formalize the Hoare-style reasoning: {P} action {Q}

use super::action::Move;
use super::error::GameError;
use super::invariants::{DotsInvariants, InvariantSet};
use super::state::GameState;
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// A contract defines preconditions and postconditions for state transitions.
///
/// - Precondition: {P(state, action)} - must hold before applying action
/// - Postcondition: {Q(before, after)} - must hold after applying action
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), GameError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), GameError>;
}

// ─────────────────────────────────────────────────────────────
//  Move Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the game must not be over.
pub struct GameNotOver;

impl GameNotOver {
    /// Fails with `GameAlreadyOver` in the terminal state.
    #[instrument(skip(game))]
    pub fn check(game: &GameState) -> Result<(), GameError> {
        if game.is_over() {
            Err(GameError::GameAlreadyOver)
        } else {
            Ok(())
        }
    }
}

/// Precondition: it must be the mover's turn.
pub struct PlayersTurn;

impl PlayersTurn {
    /// Fails with `NotYourTurn` unless the move's player is to move.
    #[instrument(skip(game))]
    pub fn check(mov: &Move, game: &GameState) -> Result<(), GameError> {
        if game.turn().to_move() != Some(mov.player) {
            Err(GameError::NotYourTurn(mov.player))
        } else {
            Ok(())
        }
    }
}

/// Precondition: the edge must lie on the grid.
pub struct EdgeOnGrid;

impl EdgeOnGrid {
    /// Fails with `InvalidEdge` for out-of-range coordinates.
    #[instrument(skip(game))]
    pub fn check(mov: &Move, game: &GameState) -> Result<(), GameError> {
        if game.board().contains_edge(mov.edge) {
            Ok(())
        } else {
            Err(GameError::InvalidEdge(mov.edge))
        }
    }
}

/// Precondition: the edge must not be drawn yet.
pub struct EdgeUndrawn;

impl EdgeUndrawn {
    /// Fails with `AlreadyDrawn` for an edge that is already on the board.
    #[instrument(skip(game))]
    pub fn check(mov: &Move, game: &GameState) -> Result<(), GameError> {
        if game.board().is_edge_drawn(mov.edge)? {
            Err(GameError::AlreadyDrawn(mov.edge))
        } else {
            Ok(())
        }
    }
}

/// Composite precondition for a legal move.
pub struct LegalMove;

impl LegalMove {
    /// Validates all preconditions for a move, in order.
    #[instrument(skip(game))]
    pub fn check(mov: &Move, game: &GameState) -> Result<(), GameError> {
        GameNotOver::check(game)?;
        PlayersTurn::check(mov, game)?;
        EdgeOnGrid::check(mov, game)?;
        EdgeUndrawn::check(mov, game)?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Move Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for move actions.
///
/// Preconditions:
/// - Game is not over
/// - It is the mover's turn
/// - Edge is on the grid and undrawn
///
/// Postconditions:
/// - Exactly one more edge is drawn
/// - All game invariants still hold
pub struct MoveContract;

impl Contract<GameState, Move> for MoveContract {
    fn pre(game: &GameState, action: &Move) -> Result<(), GameError> {
        LegalMove::check(action, game)
    }

    fn post(before: &GameState, after: &GameState) -> Result<(), GameError> {
        let expected = before.board().drawn_count() + 1;
        let actual = after.board().drawn_count();
        if actual != expected {
            warn!(expected, actual, "Drawn count did not advance by one");
            return Err(GameError::InvariantViolation(format!(
                "Postcondition failed: drawn count {} after move, expected {}",
                actual, expected
            )));
        }

        DotsInvariants::check_all(after).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            warn!(%descriptions, "Postcondition failed");
            GameError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
        })
    }
}
