use tracing::{info, warn};

use crate::cli::CommonArgs;
use crate::state::{AppState, Interaction, LoadOutcome};

use super::super::input::copy_to_clipboard;
use super::super::state::{TuiState, ViewMode};

/// Move the time slider by `delta` percentage points.
pub(super) fn nudge_progress(app: &mut AppState, delta: f64) {
    app.dispatch(Interaction::Progress(app.progress() + delta));
}

/// Scroll the active list by `rows`, keeping the offset inside the list.
pub(super) fn scroll_rows(view: ViewMode, app: &mut AppState, rows: f64) {
    match view {
        ViewMode::Commits => {
            let offset = (app.commit_scroll() + rows).clamp(0.0, app.max_commit_scroll());
            app.dispatch(Interaction::ScrollCommits(offset));
        }
        ViewMode::Files => {
            let offset = (app.file_scroll() + rows).clamp(0.0, app.max_file_scroll());
            app.dispatch(Interaction::ScrollFiles(offset));
        }
        ViewMode::Scatter | ViewMode::Stats => {}
    }
}

pub(super) fn scroll_items(view: ViewMode, app: &mut AppState, items: f64) {
    let item_height = match view {
        ViewMode::Files => app.file_geometry().item_height,
        _ => app.commit_geometry().item_height,
    };
    scroll_rows(view, app, items * item_height);
}

pub(super) fn scroll_pages(view: ViewMode, app: &mut AppState, pages: f64) {
    let geometry = match view {
        ViewMode::Files => app.file_geometry(),
        _ => app.commit_geometry(),
    };
    let page = geometry.visible_count.max(1) as f64;
    scroll_rows(view, app, pages * page * geometry.item_height);
}

/// Copy the link of the first commit on screen, surfacing clipboard errors in status.
pub(super) fn copy_first_visible_url(tui: &mut TuiState, app: &AppState) {
    let Some(url) = app.visible_commits().first().map(|p| p.item.url.clone()) else {
        tui.set_status("No commit to copy");
        return;
    };
    match copy_to_clipboard(&url) {
        Ok(()) => tui.set_status(format!("Copied: {url}")),
        Err(err) => tui.set_status(format!("Clipboard error: {err}")),
    }
}

/// Re-read the dataset from disk. A failed read keeps the data already on screen.
pub(super) fn reload(tui: &mut TuiState, app: &mut AppState, common: &CommonArgs) {
    tui.drag_anchor = None;
    match app.load_from_path(&common.data, &common.repo_url) {
        Ok(LoadOutcome::Applied { commits, warnings }) => {
            info!(commits, warnings, "Reloaded dataset");
            tui.set_status(format!("Reloaded {commits} commits ({warnings} warnings)"));
        }
        Ok(LoadOutcome::Superseded) => {}
        Err(err) => {
            warn!(error = %err, "Reload failed");
            tui.set_status(format!("Reload failed: {err}"));
        }
    }
}
