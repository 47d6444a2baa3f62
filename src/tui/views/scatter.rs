use std::collections::HashSet;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Circle, Points, Rectangle};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph};
use ratatui::Frame;

use super::{rgb, truncate};
use crate::scales::{draw_order, hour_color};
use crate::selection::language_shares;
use crate::state::AppState;
use crate::tui::state::TuiState;

const BAR_WIDTH: usize = 12;

/// Render the commit scatterplot with its time slider and the selection side panel.
pub fn draw_scatter_view(f: &mut Frame, area: Rect, app: &AppState, tui: &mut TuiState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(72), Constraint::Percentage(28)])
        .split(area);
    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(columns[0]);

    draw_chart(f, left[0], app, tui);
    draw_slider(f, left[1], app);
    draw_side_panel(f, columns[1], app);
}

fn draw_chart(f: &mut Frame, area: Rect, app: &AppState, tui: &mut TuiState) {
    let filtered = app.filtered_commits();
    let first = filtered.iter().map(|c| c.datetime).min();
    let last = filtered.iter().map(|c| c.datetime).max();
    let title = match (first, last) {
        (Some(first), Some(last)) => format!(
            "Commits by time of day  {} .. {}",
            first.format("%Y-%m-%d"),
            last.format("%Y-%m-%d")
        ),
        _ => "Commits by time of day".to_string(),
    };
    let block = Block::default().title(title).borders(Borders::ALL);
    tui.chart_area = block.inner(area);

    if app.commits().is_empty() {
        let empty = Paragraph::new("No commits loaded. Press 'r' to reload.").block(block);
        f.render_widget(empty, area);
        return;
    }

    let scales = app.scales();
    let (width, height) = (scales.width, scales.height);
    let selected: Option<HashSet<&str>> = app
        .selection()
        .map(|_| app.selected_commits().into_iter().map(|c| c.id.as_str()).collect());
    let hovered = app.hovered_commit();
    let brush = app.selection().map(|r| r.normalized());
    let ordered = draw_order(filtered.iter().copied());

    // Chart space grows downward, the canvas grows upward.
    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds([0.0, width])
        .y_bounds([0.0, height])
        .paint(move |ctx| {
            for commit in &ordered {
                let (x, y) = scales.project(commit);
                let in_selection = selected.as_ref().map_or(true, |ids| ids.contains(commit.id.as_str()));
                let color = if in_selection {
                    rgb(hour_color(commit.hour_frac))
                } else {
                    Color::DarkGray
                };
                ctx.draw(&Circle {
                    x,
                    y: height - y,
                    radius: scales.radius(commit.total_lines),
                    color,
                });
                ctx.draw(&Points {
                    coords: &[(x, height - y)],
                    color,
                });
            }
            if let Some(commit) = hovered {
                let (x, y) = scales.project(commit);
                ctx.draw(&Circle {
                    x,
                    y: height - y,
                    radius: scales.radius(commit.total_lines) + 2.0,
                    color: Color::White,
                });
            }
            if let Some(r) = brush {
                ctx.draw(&Rectangle {
                    x: r.x0,
                    y: height - r.y1,
                    width: r.x1 - r.x0,
                    height: r.y1 - r.y0,
                    color: Color::Gray,
                });
            }
        });
    f.render_widget(canvas, area);
}

fn draw_slider(f: &mut Frame, area: Rect, app: &AppState) {
    let label = match app.cutoff() {
        Some(cutoff) => format!(
            "{:.0}%  up to {}  ({} commits)",
            app.progress(),
            cutoff.format("%Y-%m-%d %H:%M"),
            app.filtered_commits().len()
        ),
        None => "no data".to_string(),
    };
    let gauge = Gauge::default()
        .block(Block::default().title("Time (←/→)").borders(Borders::ALL))
        .gauge_style(Style::default().fg(Color::Blue))
        .ratio((app.progress() / 100.0).clamp(0.0, 1.0))
        .label(label);
    f.render_widget(gauge, area);
}

fn draw_side_panel(f: &mut Frame, area: Rect, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(9)])
        .split(area);

    let selected = app.selected_commits();
    let mut lines = vec![
        Line::from(vec![Span::styled(
            app.selection_label(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
    ];
    let inner_width = chunks[0].width.saturating_sub(2) as usize;
    for (language, count, share) in language_shares(selected.iter().copied()) {
        let filled = ((share / 100.0) * BAR_WIDTH as f64).round() as usize;
        lines.push(Line::from(vec![Span::styled(
            truncate(&language, inner_width),
            Style::default().fg(Color::Cyan),
        )]));
        lines.push(Line::from(vec![
            Span::styled("█".repeat(filled), Style::default().fg(Color::Green)),
            Span::styled("░".repeat(BAR_WIDTH - filled.min(BAR_WIDTH)), Style::default().fg(Color::DarkGray)),
            Span::raw(format!(" {count} lines {share:.1}%")),
        ]));
    }
    let selection = Paragraph::new(lines).block(Block::default().title("Selection").borders(Borders::ALL));
    f.render_widget(selection, chunks[0]);

    let tooltip_lines = match app.hovered_commit() {
        Some(commit) => vec![
            Line::from(vec![
                Span::styled("Commit: ", Style::default().fg(Color::White)),
                Span::styled(truncate(&commit.id, 12), Style::default().fg(Color::Cyan)),
            ]),
            Line::from(vec![
                Span::styled("Author: ", Style::default().fg(Color::White)),
                Span::styled(commit.author.clone(), Style::default().fg(Color::Magenta)),
            ]),
            Line::from(vec![
                Span::styled("Date: ", Style::default().fg(Color::White)),
                Span::styled(
                    commit.datetime.format("%Y-%m-%d %H:%M").to_string(),
                    Style::default().fg(Color::Green),
                ),
            ]),
            Line::from(vec![
                Span::styled("Lines: ", Style::default().fg(Color::White)),
                Span::styled(commit.total_lines.to_string(), Style::default().fg(Color::Yellow)),
            ]),
            Line::from(vec![Span::styled(
                truncate(&commit.url, inner_width),
                Style::default().fg(Color::Blue),
            )]),
        ],
        None => vec![Line::from(Span::styled(
            "Hover a dot for details",
            Style::default().fg(Color::Gray),
        ))],
    };
    let tooltip = Paragraph::new(tooltip_lines).block(Block::default().title("Commit").borders(Borders::ALL));
    f.render_widget(tooltip, chunks[1]);
}
