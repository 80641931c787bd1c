//! Ownership invariant: a box is owned exactly when it is complete.

use super::super::{GameState, rules};
use super::Invariant;

/// Invariant: a box has an owner if and only if all four sides are drawn.
///
/// Owners are assigned the instant the fourth side is drawn, so there is
/// never a complete unowned box, nor an owned box with a missing side.
pub struct OwnershipMatchesEdges;

impl Invariant<GameState> for OwnershipMatchesEdges {
    fn holds(game: &GameState) -> bool {
        let board = game.board();
        board
            .boxes()
            .all(|(coord, owner)| owner.is_some() == rules::is_box_complete(board, coord))
    }

    fn description() -> &'static str {
        "Box is owned iff all four bounding edges are drawn"
    }
}
