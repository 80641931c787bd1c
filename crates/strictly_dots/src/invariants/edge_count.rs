//! Edge count invariant: the drawn counter matches the board and history.

use super::super::GameState;
use super::Invariant;

/// Invariant: the drawn-edge counter equals the number of drawn edges
/// and the number of accepted moves.
pub struct EdgeCountConsistent;

impl Invariant<GameState> for EdgeCountConsistent {
    fn holds(game: &GameState) -> bool {
        let board = game.board();
        let drawn = board.edges().filter(|(_, drawn)| *drawn).count();
        drawn == board.drawn_count() && drawn == game.history().len()
    }

    fn description() -> &'static str {
        "Drawn count matches drawn edges and move history"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Edge, Move, Player};

    #[test]
    fn test_empty_game_holds() {
        assert!(EdgeCountConsistent::holds(&GameState::default()));
    }

    #[test]
    fn test_moves_hold() {
        let mut game = GameState::default();
        game.play(Move::new(Player::Human, Edge::horizontal(3, 1)))
            .unwrap();
        game.play(Move::new(Player::Computer, Edge::vertical(1, 4)))
            .unwrap();
        assert!(EdgeCountConsistent::holds(&game));
    }

    #[test]
    fn test_missing_history_violates() {
        let mut game = GameState::default();
        game.play(Move::new(Player::Human, Edge::horizontal(3, 1)))
            .unwrap();
        game.history.clear();
        assert!(!EdgeCountConsistent::holds(&game));
    }
}
