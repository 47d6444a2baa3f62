use crate::error::{LocmetaError, Result};
use crate::model::Commit;
use chrono::{DateTime, Duration, FixedOffset};

/// Linear mapping between slider progress in `[0, 100]` and the time extent of a commit set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    min: DateTime<FixedOffset>,
    max: DateTime<FixedOffset>,
}

impl TimeWindow {
    pub fn build(commits: &[Commit]) -> Result<Self> {
        let min = commits.iter().map(|c| c.datetime).min().ok_or(LocmetaError::EmptyDataset)?;
        let max = commits.iter().map(|c| c.datetime).max().ok_or(LocmetaError::EmptyDataset)?;
        Ok(Self { min, max })
    }

    pub fn min(&self) -> DateTime<FixedOffset> {
        self.min
    }

    pub fn max(&self) -> DateTime<FixedOffset> {
        self.max
    }

    pub fn is_degenerate(&self) -> bool {
        self.min == self.max
    }

    fn span_ms(&self) -> i64 {
        (self.max - self.min).num_milliseconds()
    }

    /// Timestamp at `progress`, clamped to the window bounds.
    pub fn at(&self, progress: f64) -> DateTime<FixedOffset> {
        let progress = clamp_progress(progress);
        if progress <= 0.0 || self.is_degenerate() {
            return self.min;
        }
        if progress >= 100.0 {
            return self.max;
        }
        let offset = (self.span_ms() as f64 * progress / 100.0).round() as i64;
        self.min + Duration::milliseconds(offset)
    }

    /// Inverse of [`TimeWindow::at`].
    pub fn progress_of(&self, timestamp: &DateTime<FixedOffset>) -> f64 {
        if self.is_degenerate() {
            return 100.0;
        }
        let elapsed = (*timestamp - self.min).num_milliseconds() as f64;
        clamp_progress(elapsed / self.span_ms() as f64 * 100.0)
    }
}

fn clamp_progress(progress: f64) -> f64 {
    if progress.is_nan() {
        100.0
    } else {
        progress.clamp(0.0, 100.0)
    }
}

/// Commits at or before `cutoff`, in their original order.
pub fn filter_up_to<'a>(commits: &'a [Commit], cutoff: &DateTime<FixedOffset>) -> Vec<&'a Commit> {
    commits.iter().filter(|c| c.datetime <= *cutoff).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate_commits;
    use crate::aggregate::tests::{record_at, t0};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn commits_at(days: &[i64]) -> Vec<Commit> {
        let records: Vec<_> = days
            .iter()
            .enumerate()
            .map(|(i, d)| record_at(&format!("c{i}"), "f", 1, "go", t0() + Duration::days(*d)))
            .collect();
        aggregate_commits(&records)
    }

    #[test]
    fn empty_commit_set_is_an_error() {
        assert!(matches!(TimeWindow::build(&[]), Err(LocmetaError::EmptyDataset)));
    }

    #[test]
    fn interpolates_linearly() {
        let commits = commits_at(&[0, 1, 3]);
        let window = TimeWindow::build(&commits).unwrap();
        assert_eq!(window.at(0.0), t0());
        assert_eq!(window.at(100.0), t0() + Duration::days(3));
        assert_eq!(window.at(50.0), t0() + Duration::hours(36));
    }

    #[test]
    fn clamps_out_of_range_progress() {
        let commits = commits_at(&[2, 0]);
        let window = TimeWindow::build(&commits).unwrap();
        assert_eq!(window.at(-20.0), window.min());
        assert_eq!(window.at(250.0), window.max());
        assert_eq!(window.progress_of(&(t0() - Duration::days(5))), 0.0);
        assert_eq!(window.progress_of(&(t0() + Duration::days(1))), 50.0);
    }

    #[test]
    fn degenerate_window_is_a_single_instant() {
        let commits = commits_at(&[0, 0]);
        let window = TimeWindow::build(&commits).unwrap();
        assert!(window.is_degenerate());
        assert_eq!(window.at(0.0), t0());
        assert_eq!(window.at(37.0), t0());
        assert_eq!(window.at(100.0), t0());
    }

    #[test]
    fn filter_keeps_original_order() {
        let commits = commits_at(&[3, 0, 1, 5]);
        let kept: Vec<&str> = filter_up_to(&commits, &(t0() + Duration::days(3)))
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(kept, vec!["c0", "c1", "c2"]);
    }

    proptest! {
        #[test]
        fn filter_is_monotonic(
            days in prop::collection::vec(0i64..30, 1..20),
            a in 0f64..=100.0,
            b in 0f64..=100.0,
        ) {
            let commits = commits_at(&days);
            let window = TimeWindow::build(&commits).unwrap();
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let small = filter_up_to(&commits, &window.at(lo));
            let large = filter_up_to(&commits, &window.at(hi));
            for c in &small {
                prop_assert!(large.iter().any(|l| l.id == c.id));
            }
            prop_assert_eq!(filter_up_to(&commits, &window.at(100.0)).len(), commits.len());
        }
    }
}
