//! Terminal invariant: the game ends exactly when the board is full.

use super::super::GameState;
use super::Invariant;

/// Invariant: the state is `GameOver` iff no undrawn edge remains.
pub struct TerminalWhenFull;

impl Invariant<GameState> for TerminalWhenFull {
    fn holds(game: &GameState) -> bool {
        game.is_over() == (game.board().remaining_edges() == 0)
    }

    fn description() -> &'static str {
        "Game is over iff every edge is drawn"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TurnState;

    #[test]
    fn test_fresh_game_holds() {
        assert!(TerminalWhenFull::holds(&GameState::default()));
    }

    #[test]
    fn test_premature_game_over_violates() {
        let mut game = GameState::default();
        game.turn = TurnState::GameOver;
        assert!(!TerminalWhenFull::holds(&game));
    }
}
