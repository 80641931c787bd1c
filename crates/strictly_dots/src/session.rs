//! Game session: one human, one computer opponent, one board.
//!
//! The session is the programmatic surface a presentation layer talks
//! to. It is fully synchronous; pacing between computer moves is the
//! caller's business.

use super::action::{Move, MoveOutcome};
use super::board::Board;
use super::error::GameError;
use super::opponent::{OpponentPolicy, RandomPolicy};
use super::snapshot::{MoveResult, Snapshot};
use super::state::{GameState, TurnState};
use super::{Edge, Outcome, Player, Scores};
use tracing::{debug, info, instrument, warn};

/// Starts a new game on the default 5x5 grid against a random opponent.
pub fn new_game() -> GameSession {
    GameSession::default()
}

/// A single game between the human and a computer policy.
#[derive(Debug)]
pub struct GameSession<P: OpponentPolicy = RandomPolicy> {
    state: GameState,
    opponent: P,
}

impl GameSession<RandomPolicy> {
    /// Creates a game with `dots` dots per side against a random opponent.
    ///
    /// # Errors
    ///
    /// Returns `GameError::InvalidGridSize` if `dots` is below 2 or above
    /// [`crate::MAX_DOTS`].
    #[instrument]
    pub fn new(dots: usize) -> Result<Self, GameError> {
        Self::with_opponent(dots, RandomPolicy::new())
    }
}

impl Default for GameSession<RandomPolicy> {
    fn default() -> Self {
        Self::fresh(Board::default(), RandomPolicy::new())
    }
}

impl<P: OpponentPolicy> GameSession<P> {
    /// Creates a game with `dots` dots per side against `opponent`.
    ///
    /// # Errors
    ///
    /// Returns `GameError::InvalidGridSize` if `dots` is below 2 or above
    /// [`crate::MAX_DOTS`].
    #[instrument(skip(opponent), fields(opponent = opponent.name()))]
    pub fn with_opponent(dots: usize, opponent: P) -> Result<Self, GameError> {
        Ok(Self::fresh(Board::new(dots)?, opponent))
    }

    fn fresh(board: Board, opponent: P) -> Self {
        info!(
            dots = board.dots(),
            opponent = opponent.name(),
            "Starting new game"
        );
        Self {
            state: GameState::on_board(board),
            opponent,
        }
    }

    /// Rebuilds a game by replaying `moves` in order.
    ///
    /// # Errors
    ///
    /// Fails on the first illegal move with that move's error.
    #[instrument(skip(moves, opponent), fields(moves = moves.len()))]
    pub fn replay(dots: usize, moves: &[Move], opponent: P) -> Result<Self, GameError> {
        let mut session = Self::with_opponent(dots, opponent)?;
        for action in moves {
            session.state.play(*action)?;
        }
        Ok(session)
    }

    /// Discards this game and starts a new one with the same grid and opponent.
    ///
    /// The whole game state is rebuilt from scratch; nothing carries over
    /// except the grid size and the opponent policy.
    #[instrument(skip(self))]
    pub fn restart(&mut self) {
        let dots = self.state.board().dots();
        info!(dots, opponent = self.opponent.name(), "Restarting game");
        self.state = GameState::on_board(Board::empty(dots));
    }

    /// Draws an edge for the human.
    ///
    /// # Errors
    ///
    /// * `NotYourTurn` unless the state is `PlayerTurn` (including after
    ///   the game is over).
    /// * `InvalidEdge` / `AlreadyDrawn` from the board.
    #[instrument(skip(self), fields(edge = %edge))]
    pub fn submit_player_move(&mut self, edge: Edge) -> Result<MoveOutcome, GameError> {
        self.require_turn(Player::Human)?;
        self.state.play(Move::new(Player::Human, edge))
    }

    /// Lets the opponent policy draw one edge for the computer.
    ///
    /// The computer may earn extra turns; callers keep calling while the
    /// state stays `ComputerTurn`, or use [`Self::play_computer_turn`].
    ///
    /// # Errors
    ///
    /// * `NotYourTurn` unless the state is `ComputerTurn`; nothing is drawn.
    /// * `NoLegalMoves` if the policy finds no undrawn edge.
    #[instrument(skip(self), fields(opponent = self.opponent.name()))]
    pub fn request_computer_move(&mut self) -> Result<MoveOutcome, GameError> {
        self.require_turn(Player::Computer)?;
        let edge = self.opponent.choose_move(self.state.board())?;
        debug!(edge = %edge, "Computer chose edge");
        self.state.play(Move::new(Player::Computer, edge))
    }

    /// Plays computer moves until it is the human's turn or the game ends.
    ///
    /// Returns the moves made, in order. Does nothing outside `ComputerTurn`.
    ///
    /// # Errors
    ///
    /// Propagates the first error from [`Self::request_computer_move`].
    #[instrument(skip(self))]
    pub fn play_computer_turn(&mut self) -> Result<Vec<MoveOutcome>, GameError> {
        let mut outcomes = Vec::new();
        while self.state.turn() == TurnState::ComputerTurn {
            outcomes.push(self.request_computer_move()?);
        }
        Ok(outcomes)
    }

    fn require_turn(&self, player: Player) -> Result<(), GameError> {
        if self.state.turn().to_move() == Some(player) {
            Ok(())
        } else {
            warn!(%player, turn = %self.state.turn(), "Move submitted out of turn");
            Err(GameError::NotYourTurn(player))
        }
    }

    /// Converts a move attempt into the presentation-facing report.
    pub fn report(&self, attempt: Result<MoveOutcome, GameError>) -> MoveResult {
        match attempt {
            Ok(outcome) => MoveResult::from_outcome(&outcome),
            Err(err) => MoveResult::from_error(&err, &self.state),
        }
    }

    /// Read-only view of the whole game for rendering.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::of(&self.state)
    }

    /// Final outcome, available once the game is over.
    pub fn result(&self) -> Option<Outcome> {
        self.state.result()
    }

    /// Returns the turn state.
    pub fn turn(&self) -> TurnState {
        self.state.turn()
    }

    /// Returns the scores.
    pub fn scores(&self) -> Scores {
        self.state.scores()
    }

    /// Returns true once every edge is drawn.
    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        self.state.board()
    }

    /// Returns the accepted moves, oldest first.
    pub fn history(&self) -> &[Move] {
        self.state.history()
    }

    /// Returns the underlying game state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Returns the opponent policy.
    pub fn opponent(&self) -> &P {
        &self.opponent
    }
}
