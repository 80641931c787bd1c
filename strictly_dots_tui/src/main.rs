//! Terminal UI for Strictly Dots

#![warn(missing_docs)]

mod app;
mod cli;
mod config;
mod simulate;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};
use tracing::info;
use tracing_subscriber::EnvFilter;

use app::{App, Flow};
use cli::{Cli, Command};
use config::DotsConfig;

/// How long to wait for a key before checking on the computer.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = DotsConfig::load(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;

    match cli.command.unwrap_or_default() {
        Command::Play { seed, delay_ms } => {
            let config = config
                .clone()
                .with_seed(seed.or(config.seed()))
                .with_computer_delay_ms(delay_ms.unwrap_or(config.computer_delay_ms()));
            run_play(config)
        }
        Command::Simulate { games, seed, json } => {
            run_simulate(&config, games, seed.or(config.seed()), json)
        }
    }
}

fn env_filter(config: &DotsConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.log_filter()))
}

/// Run the interactive game
fn run_play(config: DotsConfig) -> Result<()> {
    // Setup logging to file to avoid interfering with TUI
    let log_file = std::fs::File::create(config.log_file())
        .with_context(|| format!("creating log file {}", config.log_file().display()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(&config))
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    info!(
        seed = ?config.seed(),
        delay_ms = config.computer_delay_ms(),
        "Starting Strictly Dots TUI"
    );

    let app = App::new(&config)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {}", err);
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, &app))?;

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press
                    && app.handle_key(key.code, Instant::now()) == Flow::Quit
                {
                    info!("Player quit");
                    return Ok(());
                }
            }
        }

        app.tick(Instant::now());
    }
}

/// Run headless self-play games
fn run_simulate(config: &DotsConfig, games: usize, seed: Option<u64>, json: bool) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_writer(io::stderr)
        .init();

    let seed = seed.unwrap_or_else(rand::random);
    info!(games, seed, "Starting simulation");

    let summary = simulate::run(games, seed)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("Seed:           {}", seed);
        println!("{}", summary);
    }
    Ok(())
}
