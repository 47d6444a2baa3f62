use crate::scales::ChartScales;
use crate::state::AppState;

pub fn copy_to_clipboard(text: &str) -> Result<(), arboard::Error> {
    let mut clipboard = arboard::Clipboard::new()?;
    clipboard.set_text(text.to_string())
}

/// Index (into the filtered commits) of the dot under a chart-space point.
/// The nearest dot wins; `slack` widens small dots so they stay hoverable
/// at terminal resolution.
pub fn commit_at(state: &AppState, scales: &ChartScales, x: f64, y: f64, slack: f64) -> Option<usize> {
    state
        .filtered_commits()
        .iter()
        .enumerate()
        .filter_map(|(i, c)| {
            let (cx, cy) = scales.project(c);
            let distance = ((cx - x).powi(2) + (cy - y).powi(2)).sqrt();
            (distance <= scales.radius(c.total_lines).max(slack)).then_some((i, distance))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::tests::{record, record_at, t0};
    use crate::model::LoadedData;
    use chrono::Duration;

    fn state() -> AppState {
        let records = vec![
            record("a", "x.rs", 1, "Rust"),
            record_at("b", "y.rs", 40, "Rust", t0() + Duration::days(3) + Duration::hours(6)),
        ];
        let mut state = AppState::new();
        let ticket = state.begin_load();
        state
            .finish_load(
                ticket,
                Ok(LoadedData {
                    records,
                    warnings: Vec::new(),
                }),
            )
            .unwrap();
        state
    }

    #[test]
    fn hover_finds_nearest_dot() {
        let state = state();
        let scales = state.scales();
        let (x, y) = scales.project(&state.filtered_commits()[1]);
        assert_eq!(commit_at(&state, &scales, x + 1.0, y, 5.0), Some(1));
        let (x, y) = scales.project(&state.filtered_commits()[0]);
        assert_eq!(commit_at(&state, &scales, x, y, 5.0), Some(0));
    }

    #[test]
    fn hover_misses_empty_space() {
        let state = state();
        let scales = state.scales();
        assert_eq!(commit_at(&state, &scales, 460.0, 500.0, 5.0), None);
    }
}
