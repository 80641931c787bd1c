//! Strictly Dots - dots-and-boxes game logic
//!
//! A pure, synchronous engine for dots and boxes between a human and a
//! computer opponent. No rendering, no timers, no I/O.
//!
//! # Architecture
//!
//! - **Board**: arena of edges and boxes addressed by coordinates
//! - **Rules**: O(1) completion detection and winner determination
//! - **State**: turn controller applying moves through contracts
//! - **Opponent**: pluggable edge-picking policy (uniform random by default)
//! - **Session**: the surface a presentation layer drives
//!
//! # Example
//!
//! ```
//! use strictly_dots::{Edge, GameSession, FirstAvailable, TurnState};
//!
//! let mut session = GameSession::with_opponent(5, FirstAvailable)?;
//! let outcome = session.submit_player_move(Edge::horizontal(0, 0))?;
//! assert_eq!(outcome.turn(), TurnState::ComputerTurn);
//!
//! session.play_computer_turn()?;
//! assert_eq!(session.turn(), TurnState::PlayerTurn);
//! # Ok::<(), strictly_dots::GameError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod board;
mod contracts;
mod error;
mod invariants;
mod opponent;
mod phases;
mod rules;
mod session;
mod snapshot;
mod state;
mod types;

// Crate-level exports - Domain types
pub use types::{BoxCoord, Edge, Orientation, Player, Scores};

// Crate-level exports - Board model and rules
pub use board::{Board, DEFAULT_DOTS, MAX_DOTS, MIN_DOTS};
pub use rules::{adjacent_boxes, bounding_edges, completed_by, decide, is_box_complete};

// Crate-level exports - Errors
pub use error::{ErrorKind, GameError};

// Crate-level exports - Moves and turn controller
pub use action::{ClaimedBox, Move, MoveOutcome};
pub use phases::Outcome;
pub use state::{GameState, TurnState};

// Crate-level exports - Contracts and invariants
pub use contracts::{
    Contract, EdgeOnGrid, EdgeUndrawn, GameNotOver, LegalMove, MoveContract, PlayersTurn,
};
pub use invariants::{
    DotsInvariants, EdgeCountConsistent, Invariant, InvariantSet, InvariantViolation,
    OwnershipMatchesEdges, ScoreMatchesOwnership, TerminalWhenFull,
};

// Crate-level exports - Opponent policies
pub use opponent::{FirstAvailable, OpponentPolicy, RandomPolicy};

// Crate-level exports - Session and views
pub use session::{GameSession, new_game};
pub use snapshot::{BoxView, EdgeView, MoveResult, Snapshot};
