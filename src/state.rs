use crate::aggregate::aggregate_commits;
use crate::error::Result;
use crate::loader::load_records;
use crate::model::{Commit, FileGroup, LoadedData, ParseWarning, SelectionRegion, Summary};
use crate::scales::{ChartScales, DEFAULT_CHART_HEIGHT, DEFAULT_CHART_WIDTH};
use crate::selection::{breakdown_by_language, compute_selection};
use crate::stats::{file_groups, summarize};
use crate::window::{filter_up_to, TimeWindow};
use crate::windowed::{max_scroll_offset, visible_range, Placed, WindowRange};
use chrono::{DateTime, FixedOffset};
use indexmap::IndexMap;
use std::path::Path;
use tracing::{debug, info};

pub const DEFAULT_ITEM_HEIGHT: f64 = 30.0;
pub const DEFAULT_VISIBLE_COUNT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ListGeometry {
    pub item_height: f64,
    pub visible_count: usize,
}

impl Default for ListGeometry {
    fn default() -> Self {
        Self {
            item_height: DEFAULT_ITEM_HEIGHT,
            visible_count: DEFAULT_VISIBLE_COUNT,
        }
    }
}

/// User input that changes the view state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Interaction {
    Brush(Option<SelectionRegion>),
    Progress(f64),
    /// Pin the cutoff to an exact timestamp; the slider moves to the matching progress.
    CutoffAt(DateTime<FixedOffset>),
    ScrollCommits(f64),
    ScrollFiles(f64),
    /// Index into the filtered commits.
    Hover(Option<usize>),
}

/// Parts of the display a dispatched interaction invalidated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Redraw {
    pub chart: bool,
    pub selection: bool,
    pub commit_list: bool,
    pub file_list: bool,
    pub tooltip: bool,
}

impl Redraw {
    pub fn all() -> Self {
        Self {
            chart: true,
            selection: true,
            commit_list: true,
            file_list: true,
            tooltip: true,
        }
    }

    pub fn any(&self) -> bool {
        self.chart || self.selection || self.commit_list || self.file_list || self.tooltip
    }
}

/// Identifies one load request. Only the most recent ticket may commit its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied { commits: usize, warnings: usize },
    Superseded,
}

#[derive(Debug, Clone)]
pub struct PlacedFile<'a> {
    pub index: usize,
    pub top: f64,
    pub group: FileGroup<'a>,
}

/// Owner of the loaded commits and of all transient view state.
#[derive(Debug, Clone)]
pub struct AppState {
    commits: Vec<Commit>,
    warnings: Vec<ParseWarning>,
    window: Option<TimeWindow>,
    progress: f64,
    pinned_cutoff: Option<DateTime<FixedOffset>>,
    selection: Option<SelectionRegion>,
    commit_scroll: f64,
    file_scroll: f64,
    hovered: Option<usize>,
    commit_geometry: ListGeometry,
    file_geometry: ListGeometry,
    chart_width: f64,
    chart_height: f64,
    load_generation: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            commits: Vec::new(),
            warnings: Vec::new(),
            window: None,
            progress: 100.0,
            pinned_cutoff: None,
            selection: None,
            commit_scroll: 0.0,
            file_scroll: 0.0,
            hovered: None,
            commit_geometry: ListGeometry::default(),
            file_geometry: ListGeometry::default(),
            chart_width: DEFAULT_CHART_WIDTH,
            chart_height: DEFAULT_CHART_HEIGHT,
            load_generation: 0,
        }
    }

    pub fn with_chart_size(mut self, width: f64, height: f64) -> Self {
        self.set_chart_size(width, height);
        self
    }

    pub fn with_commit_geometry(mut self, geometry: ListGeometry) -> Self {
        self.commit_geometry = geometry;
        self
    }

    pub fn with_file_geometry(mut self, geometry: ListGeometry) -> Self {
        self.file_geometry = geometry;
        self
    }

    pub fn set_chart_size(&mut self, width: f64, height: f64) {
        self.chart_width = width.max(0.0);
        self.chart_height = height.max(0.0);
    }

    pub fn set_commit_geometry(&mut self, geometry: ListGeometry) {
        self.commit_geometry = geometry;
    }

    pub fn set_file_geometry(&mut self, geometry: ListGeometry) {
        self.file_geometry = geometry;
    }

    /// Start a load request. Any earlier request still in flight is superseded.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.load_generation += 1;
        LoadTicket(self.load_generation)
    }

    /// Commit the result of a load request.
    ///
    /// A superseded ticket changes nothing. A failed load leaves the previous data in place.
    pub fn finish_load(&mut self, ticket: LoadTicket, result: Result<LoadedData>) -> Result<LoadOutcome> {
        if ticket.0 != self.load_generation {
            debug!(ticket = ticket.0, current = self.load_generation, "Discarding superseded load");
            return Ok(LoadOutcome::Superseded);
        }

        let data = result?;
        let commits = aggregate_commits(&data.records);
        let window = TimeWindow::build(&commits).ok();

        self.commits = commits;
        self.warnings = data.warnings;
        self.window = window;
        self.progress = 100.0;
        self.pinned_cutoff = None;
        self.selection = None;
        self.commit_scroll = 0.0;
        self.file_scroll = 0.0;
        self.hovered = None;

        info!(commits = self.commits.len(), warnings = self.warnings.len(), "Loaded dataset");
        Ok(LoadOutcome::Applied {
            commits: self.commits.len(),
            warnings: self.warnings.len(),
        })
    }

    pub fn load_from_path<P: AsRef<Path>>(&mut self, path: P, repo_url: &str) -> Result<LoadOutcome> {
        let ticket = self.begin_load();
        let result = load_records(path, repo_url);
        self.finish_load(ticket, result)
    }

    pub fn dispatch(&mut self, interaction: Interaction) -> Redraw {
        match interaction {
            Interaction::Brush(region) => {
                self.selection = region;
                Redraw {
                    selection: true,
                    chart: true,
                    ..Redraw::default()
                }
            }
            Interaction::Progress(progress) => {
                self.progress = if progress.is_nan() { 100.0 } else { progress.clamp(0.0, 100.0) };
                self.pinned_cutoff = None;
                self.hovered = None;
                Redraw::all()
            }
            Interaction::CutoffAt(cutoff) => {
                self.progress = self.window.map_or(100.0, |w| w.progress_of(&cutoff));
                self.pinned_cutoff = Some(cutoff);
                self.hovered = None;
                Redraw::all()
            }
            Interaction::ScrollCommits(offset) => {
                self.commit_scroll = sanitize_offset(offset);
                Redraw {
                    commit_list: true,
                    ..Redraw::default()
                }
            }
            Interaction::ScrollFiles(offset) => {
                self.file_scroll = sanitize_offset(offset);
                Redraw {
                    file_list: true,
                    ..Redraw::default()
                }
            }
            Interaction::Hover(index) => {
                self.hovered = index;
                Redraw {
                    tooltip: true,
                    ..Redraw::default()
                }
            }
        }
    }

    pub fn commits(&self) -> &[Commit] {
        &self.commits
    }

    pub fn warnings(&self) -> &[ParseWarning] {
        &self.warnings
    }

    pub fn window(&self) -> Option<&TimeWindow> {
        self.window.as_ref()
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn selection(&self) -> Option<&SelectionRegion> {
        self.selection.as_ref()
    }

    pub fn commit_scroll(&self) -> f64 {
        self.commit_scroll
    }

    pub fn file_scroll(&self) -> f64 {
        self.file_scroll
    }

    pub fn commit_geometry(&self) -> ListGeometry {
        self.commit_geometry
    }

    pub fn file_geometry(&self) -> ListGeometry {
        self.file_geometry
    }

    pub fn cutoff(&self) -> Option<DateTime<FixedOffset>> {
        let window = self.window?;
        Some(self.pinned_cutoff.unwrap_or_else(|| window.at(self.progress)))
    }

    pub fn filtered_commits(&self) -> Vec<&Commit> {
        match self.cutoff() {
            Some(cutoff) => filter_up_to(&self.commits, &cutoff),
            None => Vec::new(),
        }
    }

    /// Scales fitted to the commits currently on the chart.
    pub fn scales(&self) -> ChartScales {
        ChartScales::fit(&self.filtered_commits(), self.chart_width, self.chart_height)
    }

    pub fn selected_commits(&self) -> Vec<&Commit> {
        let filtered = self.filtered_commits();
        let scales = ChartScales::fit(&filtered, self.chart_width, self.chart_height);
        compute_selection(filtered, self.selection.as_ref(), |c| scales.project(c))
    }

    pub fn language_breakdown(&self) -> IndexMap<String, usize> {
        breakdown_by_language(self.selected_commits())
    }

    pub fn selection_label(&self) -> String {
        match self.selected_commits().len() {
            0 => "No commits selected".to_string(),
            1 => "1 commit selected".to_string(),
            n => format!("{n} commits selected"),
        }
    }

    pub fn hovered_commit(&self) -> Option<&Commit> {
        self.hovered.and_then(|i| self.filtered_commits().get(i).copied())
    }

    pub fn summary(&self) -> Summary {
        summarize(self.filtered_commits())
    }

    pub fn commit_range(&self) -> WindowRange {
        let g = self.commit_geometry;
        visible_range(self.filtered_commits().len(), g.item_height, g.visible_count, self.commit_scroll)
    }

    pub fn visible_commits(&self) -> Vec<Placed<'_, Commit>> {
        let filtered = self.filtered_commits();
        let g = self.commit_geometry;
        let range = visible_range(filtered.len(), g.item_height, g.visible_count, self.commit_scroll);
        filtered[range.start..range.end]
            .iter()
            .enumerate()
            .map(|(i, commit)| {
                let index = range.start + i;
                Placed {
                    index,
                    top: index as f64 * g.item_height,
                    item: *commit,
                }
            })
            .collect()
    }

    pub fn max_commit_scroll(&self) -> f64 {
        let g = self.commit_geometry;
        max_scroll_offset(self.filtered_commits().len(), g.item_height, g.visible_count)
    }

    pub fn max_file_scroll(&self) -> f64 {
        let g = self.file_geometry;
        max_scroll_offset(self.file_groups().len(), g.item_height, g.visible_count)
    }

    pub fn file_groups(&self) -> Vec<FileGroup<'_>> {
        file_groups(self.filtered_commits())
    }

    pub fn visible_files(&self) -> Vec<PlacedFile<'_>> {
        let groups = self.file_groups();
        let g = self.file_geometry;
        let range = visible_range(groups.len(), g.item_height, g.visible_count, self.file_scroll);
        groups
            .into_iter()
            .enumerate()
            .skip(range.start)
            .take(range.len())
            .map(|(index, group)| PlacedFile {
                index,
                top: index as f64 * g.item_height,
                group,
            })
            .collect()
    }
}

fn sanitize_offset(offset: f64) -> f64 {
    if offset.is_nan() {
        0.0
    } else {
        offset.max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::tests::{record_at, t0};
    use crate::error::LocmetaError;
    use chrono::Duration;
    use pretty_assertions::assert_eq;

    fn dataset(days: &[i64]) -> LoadedData {
        LoadedData {
            records: days
                .iter()
                .enumerate()
                .map(|(i, d)| record_at(&format!("c{i}"), &format!("f{}", i % 2), 1, "go", t0() + Duration::days(*d)))
                .collect(),
            warnings: Vec::new(),
        }
    }

    fn loaded(days: &[i64]) -> AppState {
        let mut state = AppState::new().with_chart_size(100.0, 240.0);
        let ticket = state.begin_load();
        state.finish_load(ticket, Ok(dataset(days))).unwrap();
        state
    }

    fn ids(commits: &[&Commit]) -> Vec<String> {
        commits.iter().map(|c| c.id.clone()).collect()
    }

    #[test]
    fn empty_state_has_no_views() {
        let state = AppState::new();
        assert!(state.cutoff().is_none());
        assert!(state.filtered_commits().is_empty());
        assert_eq!(state.summary(), Summary::default());
        assert!(state.visible_commits().is_empty());
        assert_eq!(state.selection_label(), "No commits selected");
    }

    #[test]
    fn empty_dataset_loads_without_window() {
        let mut state = AppState::new();
        let ticket = state.begin_load();
        let outcome = state.finish_load(ticket, Ok(LoadedData::default())).unwrap();
        assert_eq!(outcome, LoadOutcome::Applied { commits: 0, warnings: 0 });
        assert!(state.window().is_none());
        assert_eq!(state.summary(), Summary::default());
    }

    #[test]
    fn progress_filters_commits() {
        let mut state = loaded(&[0, 1, 3]);
        assert_eq!(state.filtered_commits().len(), 3);
        let redraw = state.dispatch(Interaction::Progress(50.0));
        assert!(redraw.chart && redraw.commit_list && redraw.file_list);
        assert_eq!(state.cutoff(), Some(t0() + Duration::hours(36)));
        assert_eq!(ids(&state.filtered_commits()), vec!["c0", "c1"]);
        state.dispatch(Interaction::Progress(-5.0));
        assert_eq!(state.progress(), 0.0);
        assert_eq!(ids(&state.filtered_commits()), vec!["c0"]);
    }

    #[test]
    fn pinned_cutoff_is_exact() {
        let mut state = loaded(&[0, 1, 3]);
        let cutoff = t0() + Duration::days(1);
        state.dispatch(Interaction::CutoffAt(cutoff));
        assert_eq!(state.cutoff(), Some(cutoff));
        assert!((state.progress() - 100.0 / 3.0).abs() < 1e-9);
        assert_eq!(ids(&state.filtered_commits()), vec!["c0", "c1"]);

        state.dispatch(Interaction::Progress(100.0));
        assert_eq!(state.filtered_commits().len(), 3);
    }

    #[test]
    fn brush_selects_projected_commits() {
        let mut state = loaded(&[0, 1, 2]);
        // x spans 0..100 over two days; all commits sit at 09:30, y = 145.
        let region = SelectionRegion::new(60.0, 150.0, 40.0, 140.0);
        let redraw = state.dispatch(Interaction::Brush(Some(region)));
        assert!(redraw.selection);
        assert_eq!(ids(&state.selected_commits()), vec!["c1"]);
        assert_eq!(state.selection_label(), "1 commit selected");
        assert_eq!(state.language_breakdown().get("go"), Some(&1));

        state.dispatch(Interaction::Brush(None));
        assert!(state.selected_commits().is_empty());
    }

    #[test]
    fn scrolling_windows_the_commit_list() {
        let days: Vec<i64> = (0..25).collect();
        let mut state = loaded(&days).with_commit_geometry(ListGeometry {
            item_height: 30.0,
            visible_count: 10,
        });
        state.dispatch(Interaction::ScrollCommits(95.0));
        let visible = state.visible_commits();
        assert_eq!(visible.len(), 10);
        assert_eq!(visible[0].index, 3);
        assert_eq!(visible[0].top, 90.0);
        assert_eq!(visible[0].item.id, "c3");

        state.dispatch(Interaction::ScrollCommits(-40.0));
        assert_eq!(state.commit_scroll(), 0.0);
        assert_eq!(state.commit_range(), WindowRange { start: 0, end: 10 });
        assert_eq!(state.max_commit_scroll(), 450.0);
    }

    #[test]
    fn scrolling_windows_the_file_list() {
        let mut state = loaded(&[0, 1, 2]).with_file_geometry(ListGeometry {
            item_height: 1.0,
            visible_count: 1,
        });
        state.dispatch(Interaction::ScrollFiles(1.0));
        let files = state.visible_files();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].index, 1);
        assert_eq!(files[0].group.name, "f1");
    }

    #[test]
    fn hover_tracks_filtered_commit() {
        let mut state = loaded(&[0, 1]);
        assert!(state.dispatch(Interaction::Hover(Some(1))).tooltip);
        assert_eq!(state.hovered_commit().map(|c| c.id.as_str()), Some("c1"));
        state.dispatch(Interaction::Progress(0.0));
        assert!(state.hovered_commit().is_none());
    }

    #[test]
    fn reload_resets_transient_state() {
        let mut state = loaded(&[0, 1]);
        state.dispatch(Interaction::Brush(Some(SelectionRegion::new(0.0, 0.0, 10.0, 10.0))));
        state.dispatch(Interaction::Progress(10.0));
        state.dispatch(Interaction::ScrollCommits(60.0));

        let ticket = state.begin_load();
        state.finish_load(ticket, Ok(dataset(&[0, 4, 8]))).unwrap();
        assert_eq!(state.commits().len(), 3);
        assert!(state.selection().is_none());
        assert_eq!(state.progress(), 100.0);
        assert_eq!(state.commit_scroll(), 0.0);
    }

    #[test]
    fn failed_load_keeps_previous_data() {
        let mut state = loaded(&[0, 1]);
        let ticket = state.begin_load();
        let err = state
            .finish_load(ticket, Err(LocmetaError::data_load("x.csv", "boom")))
            .unwrap_err();
        assert!(matches!(err, LocmetaError::DataLoad { .. }));
        assert_eq!(state.commits().len(), 2);
    }

    #[test]
    fn newer_load_supersedes_older_one() {
        let mut state = loaded(&[0]);
        let first = state.begin_load();
        let second = state.begin_load();

        let outcome = state.finish_load(second, Ok(dataset(&[0, 1, 2]))).unwrap();
        assert_eq!(outcome, LoadOutcome::Applied { commits: 3, warnings: 0 });

        let stale = state.finish_load(first, Ok(dataset(&[0, 1, 2, 3, 4]))).unwrap();
        assert_eq!(stale, LoadOutcome::Superseded);
        assert_eq!(state.commits().len(), 3);
    }
}
