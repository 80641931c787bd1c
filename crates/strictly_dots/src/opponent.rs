//! Opponent policies: how the computer picks its edge.

use super::error::GameError;
use super::{Board, Edge};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use tracing::{debug, instrument};

/// Strategy for choosing the computer's next edge.
///
/// The turn controller only relies on this contract, so policies can be
/// swapped without touching move application.
pub trait OpponentPolicy: std::fmt::Debug {
    /// Picks an undrawn edge on `board`.
    ///
    /// # Errors
    ///
    /// Returns `GameError::NoLegalMoves` when every edge is drawn.
    fn choose_move(&mut self, board: &Board) -> Result<Edge, GameError>;

    /// Returns the policy's display name.
    fn name(&self) -> &str;
}

impl<P: OpponentPolicy + ?Sized> OpponentPolicy for Box<P> {
    fn choose_move(&mut self, board: &Board) -> Result<Edge, GameError> {
        (**self).choose_move(board)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Picks uniformly at random among all undrawn edges.
#[derive(Debug, Clone)]
pub struct RandomPolicy<R = StdRng> {
    rng: R,
}

impl RandomPolicy<StdRng> {
    /// Creates a policy seeded from the thread-local generator.
    #[instrument]
    pub fn new() -> Self {
        Self::seeded(rand::random())
    }

    /// Creates a reproducible policy from a fixed seed.
    #[instrument]
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl<R: rand::Rng> RandomPolicy<R> {
    /// Creates a policy drawing from a caller-supplied generator.
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl Default for RandomPolicy<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: rand::Rng + std::fmt::Debug> OpponentPolicy for RandomPolicy<R> {
    #[instrument(skip_all, fields(remaining = board.remaining_edges()))]
    fn choose_move(&mut self, board: &Board) -> Result<Edge, GameError> {
        let edge = board
            .undrawn_edges()
            .choose(&mut self.rng)
            .copied()
            .ok_or(GameError::NoLegalMoves)?;
        debug!(edge = %edge, "Random policy chose edge");
        Ok(edge)
    }

    fn name(&self) -> &str {
        "Random"
    }
}

/// Picks the first undrawn edge in board order.
///
/// Deterministic; handy as a scripted opponent.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstAvailable;

impl OpponentPolicy for FirstAvailable {
    #[instrument(skip_all)]
    fn choose_move(&mut self, board: &Board) -> Result<Edge, GameError> {
        board
            .edges()
            .find(|(_, drawn)| !drawn)
            .map(|(edge, _)| edge)
            .ok_or(GameError::NoLegalMoves)
    }

    fn name(&self) -> &str {
        "First available"
    }
}
