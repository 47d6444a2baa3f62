use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Map a terminal cell inside `area` to chart coordinates (origin top-left,
/// `y` growing downward). Cells outside the area map to `None`.
pub fn cell_to_chart(area: Rect, column: u16, row: u16, width: f64, height: f64) -> Option<(f64, f64)> {
    if area.width == 0
        || area.height == 0
        || column < area.x
        || row < area.y
        || column >= area.x + area.width
        || row >= area.y + area.height
    {
        return None;
    }
    let x = (f64::from(column - area.x) + 0.5) / f64::from(area.width) * width;
    let y = (f64::from(row - area.y) + 0.5) / f64::from(area.height) * height;
    Some((x, y))
}

/// Brush endpoint for a terminal cell. Cells outside the area clamp to its
/// edge, so a drag that leaves the chart keeps extending the brush. The
/// outermost columns and rows reach the chart boundary.
pub fn clamped_cell_to_chart(area: Rect, column: u16, row: u16, width: f64, height: f64) -> Option<(f64, f64)> {
    if area.width == 0 || area.height == 0 {
        return None;
    }
    let column = column.clamp(area.x, area.x + area.width - 1) - area.x;
    let row = row.clamp(area.y, area.y + area.height - 1) - area.y;
    Some((edge_to_edge(column, area.width, width), edge_to_edge(row, area.height, height)))
}

fn edge_to_edge(cell: u16, cells: u16, extent: f64) -> f64 {
    if cells <= 1 {
        return extent / 2.0;
    }
    f64::from(cell) / f64::from(cells - 1) * extent
}

/// Rows per commit in the scrollytelling list: narrative, link, spacer.
pub const COMMIT_ROWS: u16 = 3;

/// Number of whole list items that fit in a bordered block of `area`.
pub fn visible_items(area: Rect, rows_per_item: u16) -> usize {
    (area.height.saturating_sub(2) / rows_per_item.max(1)) as usize
}
