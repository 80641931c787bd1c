//! Headless self-play: both seats driven by random policies.
//!
//! Uses exactly the same session operations as the interactive game, so a
//! clean run doubles as a smoke test of the engine.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use strictly_dots::{
    DEFAULT_DOTS, GameError, GameSession, OpponentPolicy, Outcome, Player, RandomPolicy, Scores,
    TurnState,
};
use tracing::{debug, info, instrument};

/// Seed offset for the policy standing in for the human.
const HUMAN_SEAT_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

/// Aggregate statistics over a batch of games.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Getters)]
pub struct SimulationSummary {
    /// Games played.
    #[getter(copy)]
    games: usize,
    /// Games won by the player seat.
    #[getter(copy)]
    player_wins: usize,
    /// Games won by the computer seat.
    #[getter(copy)]
    computer_wins: usize,
    /// Games ending level.
    #[getter(copy)]
    draws: usize,
    /// Mean boxes per game for the player seat.
    #[getter(copy)]
    average_player_score: f64,
    /// Mean boxes per game for the computer seat.
    #[getter(copy)]
    average_computer_score: f64,
    /// Longest run of boxes claimed by one side in a single turn.
    #[getter(copy)]
    longest_chain: usize,
}

impl std::fmt::Display for SimulationSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Games:          {}", self.games)?;
        writeln!(f, "Player wins:    {}", self.player_wins)?;
        writeln!(f, "Computer wins:  {}", self.computer_wins)?;
        writeln!(f, "Draws:          {}", self.draws)?;
        writeln!(
            f,
            "Average score:  {:.2} - {:.2}",
            self.average_player_score, self.average_computer_score
        )?;
        write!(f, "Longest chain:  {}", self.longest_chain)
    }
}

/// Result of one self-play game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameRecord {
    /// Final scores.
    pub scores: Scores,
    /// Final outcome.
    pub outcome: Outcome,
    /// Most boxes one side claimed before handing over the turn.
    pub longest_chain: usize,
}

/// Plays one game on the default grid.
///
/// # Errors
///
/// Propagates any engine error; a correct engine never produces one here.
#[instrument]
pub fn play_one(seed: u64) -> Result<GameRecord, GameError> {
    let mut session = GameSession::with_opponent(DEFAULT_DOTS, RandomPolicy::seeded(seed))?;
    let mut human = RandomPolicy::seeded(seed ^ HUMAN_SEAT_SALT);
    let mut chain = 0;
    let mut longest_chain = 0;

    loop {
        let outcome = match session.turn() {
            TurnState::PlayerTurn => {
                let edge = human.choose_move(session.board())?;
                session.submit_player_move(edge)?
            }
            TurnState::ComputerTurn => session.request_computer_move()?,
            TurnState::GameOver => break,
        };

        chain += outcome.completed().len();
        longest_chain = longest_chain.max(chain);
        if !outcome.extra_turn() {
            chain = 0;
        }
    }

    let outcome = session.result().ok_or(GameError::NoLegalMoves)?;
    debug!(%outcome, scores = %session.scores(), "Simulated game finished");
    Ok(GameRecord {
        scores: session.scores(),
        outcome,
        longest_chain,
    })
}

/// Plays `games` games, game `i` seeded with `seed + i`.
///
/// # Errors
///
/// Stops at the first engine error.
#[instrument]
pub fn run(games: usize, seed: u64) -> Result<SimulationSummary, GameError> {
    let mut summary = SimulationSummary {
        games,
        ..SimulationSummary::default()
    };
    let mut player_total = 0;
    let mut computer_total = 0;

    for i in 0..games {
        let record = play_one(seed.wrapping_add(i as u64))?;
        match record.outcome {
            Outcome::Winner(Player::Human) => summary.player_wins += 1,
            Outcome::Winner(Player::Computer) => summary.computer_wins += 1,
            Outcome::Draw => summary.draws += 1,
        }
        player_total += record.scores.human;
        computer_total += record.scores.computer;
        summary.longest_chain = summary.longest_chain.max(record.longest_chain);
    }

    if games > 0 {
        summary.average_player_score = player_total as f64 / games as f64;
        summary.average_computer_score = computer_total as f64 / games as f64;
    }
    info!(
        games,
        player_wins = summary.player_wins,
        computer_wins = summary.computer_wins,
        draws = summary.draws,
        "Simulation complete"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_game_finishes_with_all_boxes() {
        for seed in 0..10 {
            let record = play_one(seed).unwrap();
            assert_eq!(record.scores.total(), 16);
            assert!(record.longest_chain >= 1);
            assert!(record.longest_chain <= 16);
        }
    }

    #[test]
    fn test_outcome_matches_scores() {
        for seed in 0..10 {
            let record = play_one(seed).unwrap();
            let Scores { human, computer } = record.scores;
            let expected = match human.cmp(&computer) {
                std::cmp::Ordering::Greater => Outcome::Winner(Player::Human),
                std::cmp::Ordering::Less => Outcome::Winner(Player::Computer),
                std::cmp::Ordering::Equal => Outcome::Draw,
            };
            assert_eq!(record.outcome, expected);
        }
    }

    #[test]
    fn test_summary_totals() {
        let summary = run(12, 100).unwrap();
        assert_eq!(summary.games(), 12);
        assert_eq!(
            summary.player_wins() + summary.computer_wins() + summary.draws(),
            12
        );
        let average_total = summary.average_player_score() + summary.average_computer_score();
        assert!((average_total - 16.0).abs() < 1e-9);
    }

    #[test]
    fn test_same_seed_same_summary() {
        assert_eq!(run(5, 7).unwrap(), run(5, 7).unwrap());
    }

    #[test]
    fn test_zero_games() {
        let summary = run(0, 1).unwrap();
        assert_eq!(summary, SimulationSummary::default());
    }

    #[test]
    fn test_summary_json_fields() {
        let summary = run(2, 3).unwrap();
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["games"], 2);
        assert!(json["average_player_score"].is_number());
    }
}
