use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

use super::{header_cell, truncate};
use crate::state::{AppState, ListGeometry};
use crate::tui::layout::visible_items;

/// Render the files touched by the filtered commits, largest first.
pub fn draw_files_view(f: &mut Frame, area: Rect, app: &mut AppState) {
    // One row per file, minus the header row.
    app.set_file_geometry(ListGeometry {
        item_height: 1.0,
        visible_count: visible_items(area, 1).saturating_sub(1),
    });

    let placed = app.visible_files();
    if placed.is_empty() {
        let empty = Paragraph::new("No files up to the current cutoff")
            .block(Block::default().title("Files").borders(Borders::ALL));
        f.render_widget(empty, area);
        return;
    }

    let total = app.file_groups().len();
    let max_count = placed.iter().map(|p| p.group.count).max().unwrap_or(0).max(1);
    let name_width = area.width.saturating_sub(40) as usize;

    let rows: Vec<Row> = placed
        .iter()
        .map(|p| {
            let entry = p.group.to_entry();
            let languages: Vec<String> = entry.languages.iter().map(|(l, n)| format!("{l}:{n}")).collect();
            let bar = "■".repeat((p.group.count * 10).div_ceil(max_count).min(10));
            Row::new(vec![
                Cell::from(format!("{}", p.index + 1)).style(Style::default().fg(Color::DarkGray)),
                Cell::from(truncate(&entry.name, name_width)).style(Style::default().fg(Color::Cyan)),
                Cell::from(format!("{:>6} {}", entry.lines, bar)).style(Style::default().fg(Color::Green)),
                Cell::from(languages.join(" ")).style(Style::default().fg(Color::Magenta)),
            ])
        })
        .collect();

    let first = placed.first().map_or(0, |p| p.index + 1);
    let last = placed.last().map_or(0, |p| p.index + 1);
    let table = Table::new(
        rows,
        [
            Constraint::Length(5),
            Constraint::Min(20),
            Constraint::Length(18),
            Constraint::Length(16),
        ],
    )
    .header(Row::new([
        header_cell("#", Color::Yellow),
        header_cell("File", Color::Yellow),
        header_cell("Lines", Color::Yellow),
        header_cell("Languages", Color::Yellow),
    ]))
    .block(
        Block::default()
            .title(format!("Files {first}-{last} of {total}"))
            .borders(Borders::ALL),
    );
    f.render_widget(table, area);
}
