use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::tui::centered_rect;

fn heading(text: &str) -> Line<'static> {
    Line::from(vec![Span::styled(
        text.to_string(),
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
    )])
}

/// Draw the modal help overlay describing navigation, views, and shortcuts.
pub fn draw_help_overlay(f: &mut Frame, area: Rect) {
    let block = Block::default().title("Help").borders(Borders::ALL);
    let help_area = centered_rect(70, 80, area);

    f.render_widget(Clear, help_area);

    let help_text = vec![
        Line::from(vec![Span::styled(
            "locmeta - Help",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        heading("Time slider:"),
        Line::from("  ←/→         Move the cutoff by 1%"),
        Line::from("  Shift+←/→   Move the cutoff by 10%"),
        Line::from("  Home/End    Jump to the first/last commit"),
        Line::from(""),
        heading("Scatter:"),
        Line::from("  Mouse drag  Brush a region to select commits"),
        Line::from("  Mouse move  Show commit details"),
        Line::from("  Esc         Clear the selection"),
        Line::from(""),
        heading("Lists:"),
        Line::from("  j/k or ↑/↓  Scroll by one item"),
        Line::from("  PgUp/PgDn   Scroll by one page"),
        Line::from("  Mouse       Scroll with wheel"),
        Line::from(""),
        heading("Views:"),
        Line::from("  Tab         Next view (Scatter/Commits/Files/Stats)"),
        Line::from("  Shift+Tab   Previous view"),
        Line::from(""),
        heading("Actions:"),
        Line::from("  c           Copy the link of the first visible commit"),
        Line::from("  r           Reload the dataset from disk"),
        Line::from(""),
        heading("General:"),
        Line::from("  h, F1       Toggle this help"),
        Line::from("  q           Quit application"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press 'h' or 'Esc' to close this help",
            Style::default().fg(Color::Gray),
        )]),
    ];

    let help_paragraph = Paragraph::new(help_text)
        .block(block)
        .wrap(ratatui::widgets::Wrap { trim: true });
    f.render_widget(help_paragraph, help_area);
}
