use super::output::{self, Format};
use crate::cli::CommonArgs;
use crate::error::LocmetaError;
use crate::loader::{load_records_with_progress, parse_timestamp};
use crate::model::{
    CommitEntry, CommitsOutput, FilesOutput, SelectionOutput, SelectionRegion, StatsOutput, SCHEMA_VERSION,
};
use crate::selection::breakdown_by_language;
use crate::state::{AppState, Interaction, ListGeometry};
use crate::stats::{commit_file_count, commit_narrative};
use crate::windowed::total_height;
use anyhow::Context;
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use tracing::debug;

/// Where the time slider sits for a command-line run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cutoff {
    Progress(f64),
    At(DateTime<FixedOffset>),
}

/// A number is read as slider progress, anything else as a timestamp.
pub fn resolve_cutoff(input: &str) -> crate::error::Result<Cutoff> {
    if let Ok(progress) = input.trim().parse::<f64>() {
        if !(0.0..=100.0).contains(&progress) {
            return Err(LocmetaError::InvalidArgument(format!(
                "progress must be between 0 and 100, got {progress} (write dates as YYYY-MM-DD)"
            )));
        }
        return Ok(Cutoff::Progress(progress));
    }
    parse_timestamp(input)
        .map(Cutoff::At)
        .ok_or_else(|| LocmetaError::InvalidDate(format!("Unrecognized cutoff '{input}'")))
}

/// Load the dataset and position the slider according to `--until`.
pub fn load_state(common: &CommonArgs, show_progress: bool) -> anyhow::Result<AppState> {
    let cutoff = common
        .until
        .as_deref()
        .map(resolve_cutoff)
        .transpose()
        .context("Invalid --until value")?;

    let mut state = AppState::new();
    let ticket = state.begin_load();
    let data = load_records_with_progress(&common.data, &common.repo_url, show_progress);
    state
        .finish_load(ticket, data)
        .with_context(|| format!("Failed to load {}", common.data.display()))?;

    match cutoff {
        Some(Cutoff::Progress(p)) => {
            state.dispatch(Interaction::Progress(p));
        }
        Some(Cutoff::At(at)) => {
            state.dispatch(Interaction::CutoffAt(at));
        }
        None => {}
    }
    debug!(cutoff = ?state.cutoff(), filtered = state.filtered_commits().len(), "Positioned time slider");
    Ok(state)
}

fn source(common: &CommonArgs) -> String {
    common.data.display().to_string()
}

pub fn stats(common: &CommonArgs, json: bool, ndjson: bool) -> anyhow::Result<()> {
    let format = Format::from_flags(json, ndjson);
    let state = load_state(common, format == Format::Table)?;

    let report = StatsOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        source: source(common),
        cutoff: state.cutoff(),
        summary: state.summary(),
        languages: breakdown_by_language(state.filtered_commits()),
    };
    output::print_stats(&report, format)
}

pub fn commits(
    common: &CommonArgs,
    offset: f64,
    visible: usize,
    item_height: f64,
    json: bool,
    ndjson: bool,
) -> anyhow::Result<()> {
    if !(item_height.is_finite() && item_height > 0.0) {
        return Err(LocmetaError::InvalidArgument(format!("--item-height must be positive, got {item_height}")).into());
    }
    let format = Format::from_flags(json, ndjson);
    let mut state = load_state(common, format == Format::Table)?;
    state.set_commit_geometry(ListGeometry {
        item_height,
        visible_count: visible,
    });
    state.dispatch(Interaction::ScrollCommits(offset));

    let range = state.commit_range();
    let entries: Vec<CommitEntry> = state
        .visible_commits()
        .into_iter()
        .map(|placed| {
            let c = placed.item;
            CommitEntry {
                index: placed.index,
                top: placed.top,
                id: c.id.clone(),
                author: c.author.clone(),
                datetime: c.datetime,
                hour_frac: c.hour_frac,
                total_lines: c.total_lines,
                files: commit_file_count(c),
                language: c.language.clone(),
                url: c.url.clone(),
                narrative: commit_narrative(placed.index, c),
            }
        })
        .collect();

    let total = state.filtered_commits().len();
    let report = CommitsOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        source: source(common),
        cutoff: state.cutoff(),
        total,
        start: range.start,
        end: range.end,
        total_height: total_height(total, item_height),
        entries,
    };
    output::print_commits(&report, format)
}

pub fn files(common: &CommonArgs, limit: Option<usize>, json: bool, ndjson: bool) -> anyhow::Result<()> {
    let format = Format::from_flags(json, ndjson);
    let state = load_state(common, format == Format::Table)?;

    let entries = state
        .file_groups()
        .iter()
        .take(limit.unwrap_or(usize::MAX))
        .map(|g| g.to_entry())
        .collect();

    let report = FilesOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        source: source(common),
        cutoff: state.cutoff(),
        entries,
    };
    output::print_files(&report, format)
}

/// Parse an hour band such as `9-17` or `22.5-24`.
pub fn parse_hours(input: &str) -> crate::error::Result<(f64, f64)> {
    let invalid = || LocmetaError::InvalidArgument(format!("Invalid hour band '{input}', expected e.g. 9-17"));
    let (lo, hi) = input.split_once('-').ok_or_else(invalid)?;
    let lo: f64 = lo.trim().parse().map_err(|_| invalid())?;
    let hi: f64 = hi.trim().parse().map_err(|_| invalid())?;
    if !(0.0..=24.0).contains(&lo) || !(0.0..=24.0).contains(&hi) {
        return Err(invalid());
    }
    Ok((lo, hi))
}

/// End of a `--from`/`--to` range. A bare date covers that whole day.
pub fn parse_range_end(input: &str) -> Option<DateTime<FixedOffset>> {
    match NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d") {
        Ok(date) => date
            .and_hms_milli_opt(23, 59, 59, 999)
            .map(|naive| naive.and_utc().fixed_offset()),
        Err(_) => parse_timestamp(input),
    }
}

pub fn select(
    common: &CommonArgs,
    from: &str,
    to: &str,
    hours: &str,
    (width, height): (f64, f64),
    json: bool,
    ndjson: bool,
) -> anyhow::Result<()> {
    let from = parse_timestamp(from).ok_or_else(|| LocmetaError::InvalidDate(format!("Invalid --from '{from}'")))?;
    let to = parse_range_end(to).ok_or_else(|| LocmetaError::InvalidDate(format!("Invalid --to '{to}'")))?;
    let (h0, h1) = parse_hours(hours)?;

    let format = Format::from_flags(json, ndjson);
    let mut state = load_state(common, format == Format::Table)?.with_chart_size(width, height);

    // Corners go through the same scales as the dots, so the brush lines up with them.
    let scales = state.scales();
    let region = SelectionRegion::new(scales.x(&from), scales.y(h0), scales.x(&to), scales.y(h1));
    state.dispatch(Interaction::Brush(Some(region)));

    let selected = state.selected_commits();
    let report = SelectionOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        source: source(common),
        region: region.normalized(),
        selected: selected.iter().map(|c| c.id.clone()).collect(),
        languages: breakdown_by_language(selected.iter().copied()),
    };
    output::print_selection(&report, &state.selection_label(), format)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cutoff_accepts_progress_and_dates() {
        assert_eq!(resolve_cutoff("40").unwrap(), Cutoff::Progress(40.0));
        assert!(matches!(resolve_cutoff("2025-02-10").unwrap(), Cutoff::At(_)));
        assert!(resolve_cutoff("140").is_err());
        assert!(resolve_cutoff("soon").is_err());
        let err = resolve_cutoff("2025").unwrap_err().to_string();
        assert!(err.contains("YYYY-MM-DD"));
    }

    #[test]
    fn bare_end_date_covers_the_whole_day() {
        let end = parse_range_end("2025-02-28").unwrap();
        assert_eq!(end.to_rfc3339(), "2025-02-28T23:59:59.999+00:00");
        let exact = parse_range_end("2025-02-28T12:00:00-08:00").unwrap();
        assert_eq!(exact, parse_timestamp("2025-02-28T12:00:00-08:00").unwrap());
        assert!(parse_range_end("later").is_none());
    }

    #[test]
    fn hour_bands() {
        assert_eq!(parse_hours("9-17").unwrap(), (9.0, 17.0));
        assert_eq!(parse_hours(" 22.5 - 24 ").unwrap(), (22.5, 24.0));
        assert!(parse_hours("9").is_err());
        assert!(parse_hours("9-30").is_err());
    }
}
