//! Turn controller: whose move it is, scores, and move application.
//!
//! `GameState` holds everything about one game except the opponent
//! policy. Every accepted move goes through [`GameState::play`]:
//! validate, draw, claim completed boxes, award points, then decide who
//! moves next.

use super::action::{ClaimedBox, Move, MoveOutcome};
use super::contracts::{Contract, MoveContract};
use super::error::GameError;
use super::invariants::{DotsInvariants, InvariantSet};
use super::{Board, Outcome, Player, Scores, rules};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Turn state machine.
///
/// Starts in `PlayerTurn`. `GameOver` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnState {
    /// The human moves next.
    PlayerTurn,
    /// The computer moves next.
    ComputerTurn,
    /// Every edge is drawn.
    GameOver,
}

impl TurnState {
    /// State in which `player` is to move.
    pub fn for_player(player: Player) -> Self {
        match player {
            Player::Human => TurnState::PlayerTurn,
            Player::Computer => TurnState::ComputerTurn,
        }
    }

    /// The player to move, or `None` once the game is over.
    pub fn to_move(self) -> Option<Player> {
        match self {
            TurnState::PlayerTurn => Some(Player::Human),
            TurnState::ComputerTurn => Some(Player::Computer),
            TurnState::GameOver => None,
        }
    }

    /// Returns true in the terminal state.
    pub fn is_over(self) -> bool {
        self == TurnState::GameOver
    }
}

impl std::fmt::Display for TurnState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.to_move() {
            Some(player) => write!(f, "{}", player),
            None => write!(f, "Game Over"),
        }
    }
}

/// Complete state of one game.
///
/// A deserialized state must satisfy every game invariant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGameState")]
pub struct GameState {
    pub(crate) board: Board,
    pub(crate) turn: TurnState,
    pub(crate) scores: Scores,
    pub(crate) history: Vec<Move>,
}

impl GameState {
    /// Creates a fresh game on `board`, with the human to move.
    pub(crate) fn on_board(board: Board) -> Self {
        Self {
            board,
            turn: TurnState::PlayerTurn,
            scores: Scores::default(),
            history: Vec::new(),
        }
    }

    /// Creates a new game with `dots` dots per side.
    ///
    /// # Errors
    ///
    /// Returns `GameError::InvalidGridSize` if `dots` is below 2 or above
    /// [`crate::MAX_DOTS`].
    #[instrument]
    pub fn new(dots: usize) -> Result<Self, GameError> {
        Ok(Self::on_board(Board::new(dots)?))
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the turn state.
    pub fn turn(&self) -> TurnState {
        self.turn
    }

    /// Returns the scores.
    pub fn scores(&self) -> Scores {
        self.scores
    }

    /// Returns the accepted moves, oldest first.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Returns true once every edge is drawn.
    pub fn is_over(&self) -> bool {
        self.turn.is_over()
    }

    /// Final outcome, available once the game is over.
    pub fn result(&self) -> Option<Outcome> {
        self.is_over().then(|| rules::decide(&self.scores))
    }

    /// Applies a move for whichever player it names.
    ///
    /// Contract enforcement:
    /// - Preconditions checked always (`LegalMove`)
    /// - Postconditions checked in debug builds only
    ///
    /// # Errors
    ///
    /// `GameAlreadyOver`, `NotYourTurn`, `InvalidEdge` or `AlreadyDrawn`
    /// when the move is illegal; the state is unchanged in that case.
    /// In debug builds a failed postcondition returns `InvariantViolation`
    /// after the move has been applied.
    #[instrument(skip(self), fields(player = %action.player, edge = %action.edge))]
    pub fn play(&mut self, action: Move) -> Result<MoveOutcome, GameError> {
        MoveContract::pre(self, &action)?;

        #[cfg(debug_assertions)]
        let before = self.clone();

        let completed = self.board.draw_edge(action.edge)?;
        let mut claimed = Vec::with_capacity(completed.len());
        for coord in completed {
            self.board.set_box_owner(coord, action.player)?;
            claimed.push(ClaimedBox::new(coord.row, coord.col, action.player));
        }
        self.scores.award(action.player, claimed.len());
        self.history.push(action);

        self.turn = if self.board.remaining_edges() == 0 {
            TurnState::GameOver
        } else if claimed.is_empty() {
            TurnState::for_player(action.player.opponent())
        } else {
            TurnState::for_player(action.player)
        };

        debug!(
            completed = claimed.len(),
            scores = %self.scores,
            turn = %self.turn,
            "Move applied"
        );

        #[cfg(debug_assertions)]
        MoveContract::post(&before, self)?;

        let outcome = self.result();
        if let Some(outcome) = outcome {
            info!(%outcome, scores = %self.scores, "Game over");
        }

        Ok(MoveOutcome::new(
            action,
            claimed,
            self.scores,
            self.turn,
            outcome,
        ))
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::on_board(Board::default())
    }
}

/// Wire shape of a [`GameState`] before validation.
#[derive(Deserialize)]
struct RawGameState {
    board: Board,
    turn: TurnState,
    scores: Scores,
    history: Vec<Move>,
}

impl TryFrom<RawGameState> for GameState {
    type Error = GameError;

    fn try_from(raw: RawGameState) -> Result<Self, Self::Error> {
        let state = Self {
            board: raw.board,
            turn: raw.turn,
            scores: raw.scores,
            history: raw.history,
        };
        DotsInvariants::check_all(&state).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            GameError::InvariantViolation(descriptions)
        })?;
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Edge;

    #[test]
    fn test_starts_with_player_turn() {
        let game = GameState::default();
        assert_eq!(game.turn(), TurnState::PlayerTurn);
        assert_eq!(game.scores(), Scores::default());
        assert!(game.result().is_none());
    }

    #[test]
    fn test_no_completion_passes_turn() {
        let mut game = GameState::default();
        let outcome = game
            .play(Move::new(Player::Human, Edge::horizontal(0, 0)))
            .unwrap();
        assert!(outcome.completed().is_empty());
        assert_eq!(outcome.turn(), TurnState::ComputerTurn);
        assert!(!outcome.extra_turn());
    }

    #[test]
    fn test_wrong_player_rejected() {
        let mut game = GameState::default();
        let result = game.play(Move::new(Player::Computer, Edge::horizontal(0, 0)));
        assert_eq!(result, Err(GameError::NotYourTurn(Player::Computer)));
        assert_eq!(game.board().drawn_count(), 0);
    }

    #[test]
    fn test_completion_keeps_turn() {
        let mut game = GameState::default();
        let moves = [
            Move::new(Player::Human, Edge::horizontal(0, 0)),
            Move::new(Player::Computer, Edge::horizontal(1, 0)),
            Move::new(Player::Human, Edge::vertical(0, 0)),
        ];
        for action in moves {
            game.play(action).unwrap();
        }
        let outcome = game
            .play(Move::new(Player::Computer, Edge::vertical(0, 1)))
            .unwrap();
        assert_eq!(outcome.completed(), &vec![ClaimedBox::new(0, 0, Player::Computer)]);
        assert_eq!(outcome.turn(), TurnState::ComputerTurn);
        assert_eq!(game.scores().computer, 1);
    }

    #[test]
    fn test_deserialize_accepts_played_state() {
        let mut game = GameState::new(3).unwrap();
        game.play(Move::new(Player::Human, Edge::horizontal(2, 1)))
            .unwrap();
        let json = serde_json::to_string(&game).unwrap();
        let restored: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, game);
    }

    #[test]
    fn test_deserialize_rejects_inconsistent_state() {
        let mut game = GameState::new(3).unwrap();
        game.play(Move::new(Player::Human, Edge::horizontal(2, 1)))
            .unwrap();

        let mut json = serde_json::to_value(&game).unwrap();
        json["scores"]["player"] = serde_json::json!(4);
        assert!(serde_json::from_value::<GameState>(json).is_err());

        let mut json = serde_json::to_value(&game).unwrap();
        json["board"]["drawn"] = serde_json::json!(30);
        assert!(serde_json::from_value::<GameState>(json).is_err());
    }

    #[test]
    fn test_last_edge_ends_game() {
        let mut game = GameState::new(2).unwrap();
        let moves = [
            Move::new(Player::Human, Edge::horizontal(0, 0)),
            Move::new(Player::Computer, Edge::horizontal(1, 0)),
            Move::new(Player::Human, Edge::vertical(0, 0)),
        ];
        for action in moves {
            game.play(action).unwrap();
        }
        let outcome = game
            .play(Move::new(Player::Computer, Edge::vertical(0, 1)))
            .unwrap();
        assert!(outcome.is_game_over());
        assert!(!outcome.extra_turn());
        assert_eq!(outcome.outcome(), Some(Outcome::Winner(Player::Computer)));

        let result = game.play(Move::new(Player::Computer, Edge::vertical(0, 1)));
        assert_eq!(result, Err(GameError::GameAlreadyOver));
    }
}
