use std::time::{Duration, Instant};

use ratatui::layout::Rect;

const STATUS_TTL: Duration = Duration::from_secs(4);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewMode {
    Scatter,
    Commits,
    Files,
    Stats,
}

impl ViewMode {
    pub const ALL: [ViewMode; 4] = [ViewMode::Scatter, ViewMode::Commits, ViewMode::Files, ViewMode::Stats];

    pub fn title(self) -> &'static str {
        match self {
            ViewMode::Scatter => "Scatter",
            ViewMode::Commits => "Commits",
            ViewMode::Files => "Files",
            ViewMode::Stats => "Stats",
        }
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|m| *m == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Terminal-side state: which view is up and what the mouse is doing.
/// Everything about the data lives in [`crate::state::AppState`].
pub struct TuiState {
    pub view_mode: ViewMode,
    pub show_help: bool,
    /// Chart-space point where the current drag started.
    pub drag_anchor: Option<(f64, f64)>,
    /// Inner area of the scatter canvas as last drawn.
    pub chart_area: Rect,
    pub status_message: Option<(String, Instant)>,
}

impl Default for TuiState {
    fn default() -> Self {
        Self {
            view_mode: ViewMode::Scatter,
            show_help: false,
            drag_anchor: None,
            chart_area: Rect::default(),
            status_message: None,
        }
    }
}

impl TuiState {
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some((message.into(), Instant::now()));
    }

    pub fn current_status(&self) -> Option<&str> {
        self.status_message
            .as_ref()
            .filter(|(_, at)| at.elapsed() < STATUS_TTL)
            .map(|(msg, _)| msg.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn views_cycle_both_ways() {
        assert_eq!(ViewMode::Scatter.next(), ViewMode::Commits);
        assert_eq!(ViewMode::Stats.next(), ViewMode::Scatter);
        assert_eq!(ViewMode::Scatter.prev(), ViewMode::Stats);
        assert_eq!(ViewMode::Files.index(), 2);
    }

    #[test]
    fn status_expires() {
        let mut state = TuiState::default();
        assert_eq!(state.current_status(), None);
        state.set_status("Copied");
        assert_eq!(state.current_status(), Some("Copied"));
        state.status_message = Some(("old".into(), Instant::now() - STATUS_TTL));
        assert_eq!(state.current_status(), None);
    }
}
