//! Dots and boxes rendering.

use crate::app::App;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use std::collections::HashSet;
use strictly_dots::{Edge, Orientation, Player, Snapshot};

/// Width of one box, and of the horizontal edge above it.
const CELL: usize = 5;

/// Draws the whole screen.
pub fn draw(f: &mut Frame, app: &App) {
    let snapshot = app.snapshot();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(5),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(f.area());

    let title = Paragraph::new("Strictly Dots")
        .style(Style::default().add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    f.render_widget(title, chunks[0]);

    render_board(f, chunks[1], &snapshot, app.cursor());
    render_scoreboard(f, chunks[2], &snapshot);
    render_status(f, chunks[3], app.status_message());

    if app.show_help() {
        render_help(f, f.area());
    }
}

fn render_board(f: &mut Frame, area: Rect, snapshot: &Snapshot, cursor: Edge) {
    let dots = snapshot.dots();
    let drawn: HashSet<Edge> = snapshot
        .edges()
        .iter()
        .filter(|e| e.drawn)
        .map(|e| Edge::new(e.orientation, e.row, e.col))
        .collect();
    let owner = |row: usize, col: usize| {
        snapshot
            .boxes()
            .iter()
            .find(|b| b.row == row && b.col == col)
            .and_then(|b| b.owner)
    };

    let mut lines = Vec::with_capacity(2 * dots);
    for row in 0..dots {
        let mut spans = Vec::with_capacity(2 * dots);
        for col in 0..dots {
            spans.push(Span::styled("●", Style::default().fg(Color::White)));
            if col + 1 < dots {
                let edge = Edge::horizontal(row, col);
                spans.push(edge_span(edge, drawn.contains(&edge), edge == cursor));
            }
        }
        lines.push(Line::from(spans));

        if row + 1 < dots {
            let mut spans = Vec::with_capacity(2 * dots);
            for col in 0..dots {
                let edge = Edge::vertical(row, col);
                spans.push(edge_span(edge, drawn.contains(&edge), edge == cursor));
                if col + 1 < dots {
                    spans.push(box_span(owner(row, col)));
                }
            }
            lines.push(Line::from(spans));
        }
    }

    let width = ((dots - 1) * (CELL + 1) + 1 + 2) as u16;
    let height = (2 * dots - 1 + 2) as u16;
    let board = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
    f.render_widget(board, center_rect(area, width, height));
}

fn edge_span(edge: Edge, drawn: bool, selected: bool) -> Span<'static> {
    let horizontal = edge.orientation == Orientation::Horizontal;
    let text = match (horizontal, drawn || selected) {
        (true, true) => "━".repeat(CELL),
        (true, false) => " ".repeat(CELL),
        (false, true) => "┃".to_string(),
        (false, false) => " ".to_string(),
    };
    let style = match (drawn, selected) {
        (true, true) => Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        (false, true) => Style::default().fg(Color::Yellow).add_modifier(Modifier::DIM),
        (true, false) => Style::default().fg(Color::Gray),
        (false, false) => Style::default(),
    };
    Span::styled(text, style)
}

fn box_span(owner: Option<Player>) -> Span<'static> {
    match owner {
        Some(player) => Span::styled(
            format!("{:^width$}", player.mark(), width = CELL),
            Style::default()
                .fg(player_color(player))
                .add_modifier(Modifier::BOLD),
        ),
        None => Span::raw(" ".repeat(CELL)),
    }
}

fn player_color(player: Player) -> Color {
    match player {
        Player::Human => Color::Blue,
        Player::Computer => Color::Red,
    }
}

fn render_scoreboard(f: &mut Frame, area: Rect, snapshot: &Snapshot) {
    let scores = snapshot.scores();
    let line = Line::from(vec![
        Span::styled(
            format!("Player: {}", scores.human),
            Style::default().fg(player_color(Player::Human)),
        ),
        Span::raw("   "),
        Span::styled(
            format!("Computer: {}", scores.computer),
            Style::default().fg(player_color(Player::Computer)),
        ),
        Span::raw(format!("   Turn: {}", snapshot.turn())),
        Span::raw(format!(
            "   Lines: {} / {}",
            snapshot.edges_drawn(),
            snapshot.total_edges()
        )),
    ]);
    let scoreboard = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(" Score "));
    f.render_widget(scoreboard, area);
}

fn render_status(f: &mut Frame, area: Rect, message: &str) {
    let status = Paragraph::new(message.to_string())
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(status, area);
}

fn render_help(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from("Arrow keys   move the cursor"),
        Line::from("Tab          switch horizontal / vertical"),
        Line::from("Enter Space  draw the highlighted line"),
        Line::from("n            new game"),
        Line::from("?            toggle this help"),
        Line::from("q            quit"),
        Line::from(""),
        Line::from("Close a box to score it and move again."),
    ];
    let popup = center_rect(area, 48, 12);
    f.render_widget(Clear, popup);
    let help = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Help "));
    f.render_widget(help, popup);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(horizontal[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DotsConfig;
    use ratatui::{Terminal, backend::TestBackend};

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_fresh_board_renders_dots_and_score() {
        let app = App::new(&DotsConfig::default().with_seed(Some(1))).unwrap();
        let screen = render(&app);
        assert_eq!(screen.matches('●').count(), 25);
        assert!(screen.contains("Player: 0"));
        assert!(screen.contains("Computer: 0"));
        assert!(screen.contains("Lines: 0 / 40"));
    }

    #[test]
    fn test_center_rect_fits_inside() {
        let area = Rect::new(0, 0, 80, 24);
        let rect = center_rect(area, 20, 10);
        assert_eq!((rect.width, rect.height), (20, 10));
        assert_eq!((rect.x, rect.y), (30, 7));
    }

    #[test]
    fn test_box_span_marks_owner() {
        assert_eq!(box_span(Some(Player::Computer)).content, "  C  ");
        assert_eq!(box_span(None).content, "     ");
    }
}
