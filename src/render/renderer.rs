use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{Cell, CollisionKind, GamePhase, Snapshot};
use crate::metrics::SessionStats;

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, snapshot: &Snapshot, stats: &SessionStats) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        // Render header with session stats
        let header = self.render_stats(chunks[0], snapshot, stats);
        frame.render_widget(header, chunks[0]);

        // Center the game grid horizontally
        let game_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        // Render game grid or game over screen
        if snapshot.phase == GamePhase::Over {
            let game_over = self.render_game_over(game_area, snapshot);
            frame.render_widget(game_over, game_area);
        } else {
            let grid = self.render_grid(game_area, snapshot);
            frame.render_widget(grid, game_area);
        }

        // Render footer with the hint for the current phase
        let hint = self.render_hint(chunks[2], snapshot.phase);
        frame.render_widget(hint, chunks[2]);
    }

    fn render_grid(&self, _area: Rect, snapshot: &Snapshot) -> Paragraph<'_> {
        let head = snapshot.cells[0];
        let mut lines = Vec::new();

        for y in 0..snapshot.grid.size() {
            let mut spans = Vec::new();

            for x in 0..snapshot.grid.size() {
                let pos = Cell::new(x as i32, y as i32);

                let (glyph, style) = if pos == head {
                    ("■ ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                } else if snapshot.cells.contains(&pos) {
                    ("□ ", Style::default().fg(Color::Green))
                } else if pos == snapshot.food {
                    ("● ", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
                } else {
                    ("· ", Style::default().fg(Color::DarkGray))
                };

                spans.push(Span::styled(glyph, style));
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Snake "),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(
        &self,
        _area: Rect,
        snapshot: &Snapshot,
        stats: &SessionStats,
    ) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                snapshot.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  │  "),
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                stats.best_score.to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("  │  "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(stats.format_time(), Style::default().fg(Color::White)),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(&self, _area: Rect, snapshot: &Snapshot) -> Paragraph<'_> {
        let caption = match snapshot.collision {
            Some(CollisionKind::Wall) => "You hit the wall",
            Some(CollisionKind::Body) => "You bit yourself",
            None => "Game over",
        };

        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(vec![Span::styled(
                caption,
                Style::default().fg(Color::Gray),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    snapshot.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart, ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_hint(&self, _area: Rect, phase: GamePhase) -> Paragraph<'_> {
        let text = match phase {
            GamePhase::Idle => vec![Line::from(vec![
                Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
                Span::raw(", "),
                Span::styled("WASD", Style::default().fg(Color::Cyan)),
                Span::raw(" or "),
                Span::styled("hjkl", Style::default().fg(Color::Cyan)),
                Span::raw(" to start | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ])],
            GamePhase::Running => vec![Line::from(vec![
                Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
                Span::raw(" to steer | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ])],
            GamePhase::Over => vec![Line::from(vec![
                Span::styled("R", Style::default().fg(Color::Green)),
                Span::raw(" to restart | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ])],
        };

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
