use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{BarChart, Block, Borders, Paragraph, Sparkline};
use ratatui::Frame;

use crate::selection::breakdown_by_language;
use crate::state::AppState;

fn stat_line(label: &str, value: String, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label}: "), Style::default().fg(Color::White)),
        Span::styled(value, Style::default().fg(color)),
    ])
}

/// Render the summary of the filtered commits, their per-commit trend and language mix.
pub fn draw_statistics_view(f: &mut Frame, area: Rect, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(12),
            Constraint::Percentage(50),
            Constraint::Min(0),
        ])
        .split(area);

    let summary = app.summary();
    let mut stats_text = vec![
        Line::from(vec![Span::styled(
            "Summary",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        stat_line("Commits", summary.commits.to_string(), Color::Cyan),
        stat_line("Files", summary.files.to_string(), Color::Cyan),
        stat_line("Total LOC", summary.total_loc.to_string(), Color::Green),
        stat_line("Max depth", summary.max_depth.to_string(), Color::Yellow),
        stat_line("Longest line", summary.longest_line.to_string(), Color::Yellow),
        stat_line("Max lines", summary.max_lines.to_string(), Color::Yellow),
    ];
    if !app.warnings().is_empty() {
        stats_text.push(stat_line(
            "Parse warnings",
            app.warnings().len().to_string(),
            Color::Red,
        ));
    }
    let stats_para =
        Paragraph::new(stats_text).block(Block::default().title("Overall Statistics").borders(Borders::ALL));
    f.render_widget(stats_para, chunks[0]);

    let filtered = app.filtered_commits();
    let breakdown = breakdown_by_language(filtered.iter().copied());
    let bars: Vec<(&str, u64)> = breakdown.iter().map(|(l, n)| (l.as_str(), *n as u64)).collect();
    let languages = BarChart::default()
        .block(Block::default().title("Lines by language").borders(Borders::ALL))
        .data(bars.as_slice())
        .bar_width(8)
        .bar_gap(2)
        .bar_style(Style::default().fg(Color::Green))
        .value_style(Style::default().fg(Color::Black).bg(Color::Green));
    f.render_widget(languages, chunks[1]);

    let trend: Vec<u64> = filtered.iter().map(|c| c.total_lines).collect();
    if trend.len() > 1 {
        let sparkline = Sparkline::default()
            .block(Block::default().title("Lines per commit").borders(Borders::ALL))
            .data(&trend)
            .style(Style::default().fg(Color::Yellow));
        f.render_widget(sparkline, chunks[2]);
    }
}
