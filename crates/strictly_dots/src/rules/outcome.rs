//! Winner determination for a finished game.

use super::super::{Outcome, Player, Scores};
use tracing::instrument;

/// Decides the outcome from final scores.
///
/// The higher score wins; equal scores are a draw.
#[instrument]
pub fn decide(scores: &Scores) -> Outcome {
    use std::cmp::Ordering;

    match scores.human.cmp(&scores.computer) {
        Ordering::Greater => Outcome::Winner(Player::Human),
        Ordering::Less => Outcome::Winner(Player::Computer),
        Ordering::Equal => Outcome::Draw,
    }
}
