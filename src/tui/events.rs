use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::cli::CommonArgs;
use crate::model::SelectionRegion;
use crate::state::{AppState, Interaction};

use super::input::commit_at;
use super::layout::{cell_to_chart, clamped_cell_to_chart};
use super::state::{TuiState, ViewMode};

mod actions;

use actions::*;

/// Handle a keyboard event, mutating TUI state and returning `true` if the loop should exit.
pub fn handle_key_events(key_event: KeyEvent, tui: &mut TuiState, app: &mut AppState, common: &CommonArgs) -> bool {
    if key_event.kind != KeyEventKind::Press {
        return false;
    }

    if tui.show_help {
        match key_event.code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('h') | KeyCode::F(1) | KeyCode::Esc => tui.show_help = false,
            _ => {}
        }
        return false;
    }

    let shifted = key_event.modifiers.contains(KeyModifiers::SHIFT);
    match key_event.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('h') | KeyCode::F(1) => tui.show_help = true,
        KeyCode::Tab => tui.view_mode = tui.view_mode.next(),
        KeyCode::BackTab => tui.view_mode = tui.view_mode.prev(),
        KeyCode::Esc => {
            tui.drag_anchor = None;
            app.dispatch(Interaction::Brush(None));
        }
        KeyCode::Left => nudge_progress(app, if shifted { -10.0 } else { -1.0 }),
        KeyCode::Right => nudge_progress(app, if shifted { 10.0 } else { 1.0 }),
        KeyCode::Home => {
            app.dispatch(Interaction::Progress(0.0));
        }
        KeyCode::End => {
            app.dispatch(Interaction::Progress(100.0));
        }
        KeyCode::PageUp if tui.view_mode == ViewMode::Scatter => nudge_progress(app, -10.0),
        KeyCode::PageDown if tui.view_mode == ViewMode::Scatter => nudge_progress(app, 10.0),
        KeyCode::PageUp => scroll_pages(tui.view_mode, app, -1.0),
        KeyCode::PageDown => scroll_pages(tui.view_mode, app, 1.0),
        KeyCode::Up | KeyCode::Char('k') => scroll_items(tui.view_mode, app, -1.0),
        KeyCode::Down | KeyCode::Char('j') => scroll_items(tui.view_mode, app, 1.0),
        KeyCode::Char('c') => copy_first_visible_url(tui, app),
        KeyCode::Char('r') => reload(tui, app, common),
        _ => {}
    }

    false
}

/// Handle mouse wheel scrolling, brushing on the chart, and hover tooltips.
pub fn handle_mouse_event(mouse_event: MouseEvent, tui: &mut TuiState, app: &mut AppState) {
    match mouse_event.kind {
        MouseEventKind::ScrollUp => scroll_rows(tui.view_mode, app, -1.0),
        MouseEventKind::ScrollDown => scroll_rows(tui.view_mode, app, 1.0),
        _ if tui.view_mode != ViewMode::Scatter || tui.show_help => {}
        MouseEventKind::Down(MouseButton::Left) => {
            let scales = app.scales();
            let area = tui.chart_area;
            let inside = cell_to_chart(area, mouse_event.column, mouse_event.row, scales.width, scales.height);
            tui.drag_anchor = inside.and_then(|_| {
                clamped_cell_to_chart(area, mouse_event.column, mouse_event.row, scales.width, scales.height)
            });
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            let scales = app.scales();
            let point = clamped_cell_to_chart(
                tui.chart_area,
                mouse_event.column,
                mouse_event.row,
                scales.width,
                scales.height,
            );
            if let (Some((x0, y0)), Some((x1, y1))) = (tui.drag_anchor, point) {
                app.dispatch(Interaction::Brush(Some(SelectionRegion::new(x0, y0, x1, y1))));
            }
        }
        MouseEventKind::Up(MouseButton::Left) => {
            let scales = app.scales();
            let point = clamped_cell_to_chart(
                tui.chart_area,
                mouse_event.column,
                mouse_event.row,
                scales.width,
                scales.height,
            );
            // A click without a drag clears the brush.
            if tui.drag_anchor.is_some() && tui.drag_anchor == point {
                app.dispatch(Interaction::Brush(None));
            }
            tui.drag_anchor = None;
        }
        MouseEventKind::Moved => {
            let scales = app.scales();
            let slack = if tui.chart_area.width > 0 {
                scales.width / f64::from(tui.chart_area.width)
            } else {
                0.0
            };
            let hovered = cell_to_chart(
                tui.chart_area,
                mouse_event.column,
                mouse_event.row,
                scales.width,
                scales.height,
            )
            .and_then(|(x, y)| commit_at(app, &scales, x, y, slack));
            let current = app.hovered_commit().map(|c| c.id.clone());
            let next = hovered.and_then(|i| app.filtered_commits().get(i).map(|c| c.id.clone()));
            if current != next {
                app.dispatch(Interaction::Hover(hovered));
            }
        }
        _ => {}
    }
}
