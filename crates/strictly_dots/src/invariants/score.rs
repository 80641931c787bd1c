//! Score invariant: scores count owned boxes.

use super::super::{GameState, Player};
use super::Invariant;

/// Invariant: each player's score equals the number of boxes they own.
///
/// Implies `player + computer` equals the number of owned boxes.
pub struct ScoreMatchesOwnership;

impl Invariant<GameState> for ScoreMatchesOwnership {
    fn holds(game: &GameState) -> bool {
        let scores = game.scores();
        let board = game.board();
        scores.human == board.owned_by(Player::Human)
            && scores.computer == board.owned_by(Player::Computer)
    }

    fn description() -> &'static str {
        "Scores equal the number of boxes each player owns"
    }
}
