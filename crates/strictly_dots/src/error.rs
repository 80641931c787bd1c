//! Error types for the dots-and-boxes engine.

use super::types::{BoxCoord, Edge, Player};
use serde::{Deserialize, Serialize};

/// Error that can occur when validating or applying a move.
///
/// Every variant is a recoverable condition handed back to the caller.
/// `AlreadyOwned`, `BoxNotComplete` and `InvariantViolation` only surface
/// when the engine itself is misused or broken.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, strum::EnumDiscriminants)]
#[strum_discriminants(name(ErrorKind))]
#[strum_discriminants(derive(Hash, Serialize, Deserialize, strum::Display))]
pub enum GameError {
    /// The grid needs between 2 and 1024 dots per side.
    #[display("Grid of {} dots per side is not supported (2 to 1024)", _0)]
    InvalidGridSize(usize),

    /// Edge coordinates are outside the grid for its orientation.
    #[display("Edge {} is outside the grid", _0)]
    InvalidEdge(Edge),

    /// Box coordinates are outside the grid.
    #[display("Box {} is outside the grid", _0)]
    InvalidBox(BoxCoord),

    /// The edge has already been drawn.
    #[display("Edge {} is already drawn", _0)]
    AlreadyDrawn(Edge),

    /// The box already has an owner.
    #[display("Box {} is already owned", _0)]
    AlreadyOwned(BoxCoord),

    /// The box still has undrawn sides and cannot be claimed.
    #[display("Box {} is not complete", _0)]
    BoxNotComplete(BoxCoord),

    /// It's not this player's turn (or nobody's, once the game is over).
    #[display("It's not {}'s turn", _0)]
    NotYourTurn(Player),

    /// The game is already over.
    #[display("Game is already over")]
    GameAlreadyOver,

    /// The opponent was asked to move with no undrawn edges left.
    #[display("No legal moves remain")]
    NoLegalMoves,

    /// An invariant was violated (postcondition failure).
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for GameError {}

impl GameError {
    /// Returns the field-less kind of this error.
    pub fn kind(&self) -> ErrorKind {
        self.into()
    }
}
