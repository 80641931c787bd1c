//! Command-line interface for strictly_dots.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Strictly Dots - dots and boxes against the computer
#[derive(Parser, Debug)]
#[command(name = "strictly_dots")]
#[command(about = "Dots and boxes in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file (defaults apply if it is missing)
    #[arg(short, long, default_value = "strictly_dots.toml")]
    pub config: PathBuf,

    /// Subcommand to run (defaults to `play`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Play an interactive game in the terminal
    Play {
        /// Seed for the computer opponent
        #[arg(long)]
        seed: Option<u64>,

        /// Pause between computer moves, in milliseconds
        #[arg(long)]
        delay_ms: Option<u64>,
    },

    /// Play random games headlessly and print aggregate statistics
    Simulate {
        /// Number of games to play
        #[arg(short, long, default_value = "100")]
        games: usize,

        /// Base seed; game `i` uses `seed + i`
        #[arg(long)]
        seed: Option<u64>,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Default for Command {
    fn default() -> Self {
        Self::Play {
            seed: None,
            delay_ms: None,
        }
    }
}
