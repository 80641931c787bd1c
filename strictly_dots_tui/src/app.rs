//! Application state and logic.

use crate::config::DotsConfig;
use crossterm::event::KeyCode;
use std::time::{Duration, Instant};
use strictly_dots::{
    DEFAULT_DOTS, Edge, GameError, GameSession, MoveOutcome, Orientation, RandomPolicy, Snapshot,
    TurnState,
};
use tracing::{debug, info, instrument, warn};

const START_MESSAGE: &str = "Your turn. Arrows move, Tab turns, Enter draws, ? for help.";

/// What the event loop should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep running.
    Continue,
    /// Leave the game.
    Quit,
}

/// Main application state.
#[derive(Debug)]
pub struct App {
    session: GameSession<RandomPolicy>,
    cursor: Edge,
    status_message: String,
    show_help: bool,
    computer_delay: Duration,
    next_computer_move: Option<Instant>,
}

impl App {
    /// Creates an application on the default grid.
    #[instrument(skip(config), fields(seed = ?config.seed()))]
    pub fn new(config: &DotsConfig) -> Result<Self, GameError> {
        let opponent = match config.seed() {
            Some(seed) => RandomPolicy::seeded(seed),
            None => RandomPolicy::new(),
        };
        Ok(Self {
            session: GameSession::with_opponent(DEFAULT_DOTS, opponent)?,
            cursor: Edge::horizontal(0, 0),
            status_message: START_MESSAGE.to_string(),
            show_help: false,
            computer_delay: config.computer_delay(),
            next_computer_move: None,
        })
    }

    /// Gets the current game view.
    pub fn snapshot(&self) -> Snapshot {
        self.session.snapshot()
    }

    /// Gets the edge under the cursor.
    pub fn cursor(&self) -> Edge {
        self.cursor
    }

    /// Gets the current status message.
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// Whether the help overlay is open.
    pub fn show_help(&self) -> bool {
        self.show_help
    }

    /// Handles one key press.
    #[instrument(skip(self, now))]
    pub fn handle_key(&mut self, code: KeyCode, now: Instant) -> Flow {
        if self.show_help {
            // Any key closes the overlay; q still quits.
            self.show_help = false;
            return match code {
                KeyCode::Char('q') => Flow::Quit,
                _ => Flow::Continue,
            };
        }

        match code {
            KeyCode::Char('q') | KeyCode::Esc => return Flow::Quit,
            KeyCode::Char('?') | KeyCode::Char('h') => self.show_help = true,
            KeyCode::Char('n') => self.restart(),
            KeyCode::Up => self.move_cursor(-1, 0),
            KeyCode::Down => self.move_cursor(1, 0),
            KeyCode::Left => self.move_cursor(0, -1),
            KeyCode::Right => self.move_cursor(0, 1),
            KeyCode::Tab | KeyCode::BackTab => self.toggle_orientation(),
            KeyCode::Enter | KeyCode::Char(' ') => self.draw_at_cursor(now),
            _ => {}
        }
        Flow::Continue
    }

    /// Plays a computer move once its delay has elapsed.
    ///
    /// Called from the event loop on every iteration.
    pub fn tick(&mut self, now: Instant) {
        if self.session.turn() != TurnState::ComputerTurn {
            self.next_computer_move = None;
            return;
        }

        match self.next_computer_move {
            None => self.next_computer_move = Some(now + self.computer_delay),
            Some(due) if now >= due => self.play_computer_move(now),
            Some(_) => {}
        }
    }

    /// Restarts the game.
    #[instrument(skip(self))]
    pub fn restart(&mut self) {
        debug!("Restarting game");
        self.session.restart();
        self.cursor = Edge::horizontal(0, 0);
        self.next_computer_move = None;
        self.status_message = START_MESSAGE.to_string();
    }

    fn play_computer_move(&mut self, now: Instant) {
        match self.session.request_computer_move() {
            Ok(outcome) => {
                self.status_message = self.describe(&outcome);
                self.next_computer_move = (outcome.turn() == TurnState::ComputerTurn)
                    .then(|| now + self.computer_delay);
            }
            Err(e) => {
                warn!(error = %e, "Computer move failed");
                self.status_message = format!("Computer could not move: {}", e);
                self.next_computer_move = None;
            }
        }
    }

    fn draw_at_cursor(&mut self, now: Instant) {
        match self.session.submit_player_move(self.cursor) {
            Ok(outcome) => {
                self.status_message = self.describe(&outcome);
                if outcome.turn() == TurnState::ComputerTurn {
                    self.next_computer_move = Some(now + self.computer_delay);
                }
            }
            Err(e) => {
                let report = self.session.report(Err(e));
                self.status_message = report
                    .message()
                    .clone()
                    .unwrap_or_else(|| "Move rejected".to_string());
            }
        }
    }

    fn describe(&self, outcome: &MoveOutcome) -> String {
        if let Some(result) = outcome.outcome() {
            info!(%result, scores = %outcome.scores(), "Game finished");
            return format!(
                "Game Over! {}. {}. Press n for a new game.",
                result,
                outcome.scores()
            );
        }

        let mover = outcome.applied().player;
        let claimed = outcome.completed().len();
        match (claimed, outcome.turn()) {
            (0, TurnState::ComputerTurn) => "Computer is thinking...".to_string(),
            (0, _) => format!("Computer drew {}. Your turn.", outcome.applied().edge),
            (n, TurnState::PlayerTurn) => {
                format!("You completed {} box{}! Go again.", n, plural(n))
            }
            (n, _) => format!("{} completed {} box{}.", mover, n, plural(n)),
        }
    }

    fn move_cursor(&mut self, d_row: isize, d_col: isize) {
        let (max_row, max_col) = self.cursor_limits(self.cursor.orientation);
        self.cursor.row = step(self.cursor.row, d_row, max_row);
        self.cursor.col = step(self.cursor.col, d_col, max_col);
    }

    fn toggle_orientation(&mut self) {
        let orientation = self.cursor.orientation.flip();
        let (max_row, max_col) = self.cursor_limits(orientation);
        self.cursor = Edge::new(
            orientation,
            self.cursor.row.min(max_row),
            self.cursor.col.min(max_col),
        );
    }

    /// Largest row and column an edge of `orientation` may have.
    fn cursor_limits(&self, orientation: Orientation) -> (usize, usize) {
        let last = self.session.board().dots() - 1;
        match orientation {
            Orientation::Horizontal => (last, last - 1),
            Orientation::Vertical => (last - 1, last),
        }
    }
}

fn step(value: usize, delta: isize, max: usize) -> usize {
    value.saturating_add_signed(delta).min(max)
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "es" }
}
