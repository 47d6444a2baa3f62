use ratatui::layout::{Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState};
use ratatui::Frame;

use super::{rgb, truncate};
use crate::scales::hour_color;
use crate::state::{AppState, ListGeometry};
use crate::stats::commit_narrative;
use crate::tui::layout::{visible_items, COMMIT_ROWS};

/// Render the scrollytelling list: one narrative per commit, windowed at the scroll offset.
pub fn draw_commits_view(f: &mut Frame, area: Rect, app: &mut AppState) {
    app.set_commit_geometry(ListGeometry {
        item_height: f64::from(COMMIT_ROWS),
        visible_count: visible_items(area, COMMIT_ROWS),
    });

    let total = app.filtered_commits().len();
    if total == 0 {
        let empty = Paragraph::new("No commits up to the current cutoff")
            .block(Block::default().title("Commits").borders(Borders::ALL));
        f.render_widget(empty, area);
        return;
    }

    let range = app.commit_range();
    let width = area.width.saturating_sub(4) as usize;
    let mut lines: Vec<Line> = Vec::new();
    for placed in app.visible_commits() {
        let commit = placed.item;
        lines.push(Line::from(vec![
            Span::styled("● ", Style::default().fg(rgb(hour_color(commit.hour_frac)))),
            Span::styled(
                truncate(&commit_narrative(placed.index, commit), width.saturating_sub(2)),
                Style::default().fg(Color::White),
            ),
        ]));
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(
                truncate(&commit.url, width.saturating_sub(2)),
                Style::default().fg(Color::Blue).add_modifier(Modifier::UNDERLINED),
            ),
        ]));
        lines.push(Line::from(""));
    }

    let title = format!("Commits {}-{} of {}", range.start + 1, range.end, total);
    let list = Paragraph::new(lines).block(Block::default().title(title).borders(Borders::ALL));
    f.render_widget(list, area);

    let mut scrollbar_state = ScrollbarState::new(total.saturating_sub(1)).position(range.start);
    f.render_stateful_widget(
        Scrollbar::new(ScrollbarOrientation::VerticalRight),
        area.inner(&Margin {
            vertical: 1,
            horizontal: 0,
        }),
        &mut scrollbar_state,
    );
}
