use crate::model::{Commit, SelectionRegion};
use indexmap::IndexMap;

/// Commits whose projected point lies inside the closed `region`.
///
/// `project` maps a commit to its chart coordinate under the current scales.
/// No region means no selection.
pub fn compute_selection<'a, I, F>(commits: I, region: Option<&SelectionRegion>, project: F) -> Vec<&'a Commit>
where
    I: IntoIterator<Item = &'a Commit>,
    F: Fn(&Commit) -> (f64, f64),
{
    let Some(region) = region.map(SelectionRegion::normalized) else {
        return Vec::new();
    };
    commits
        .into_iter()
        .filter(|commit| {
            let (x, y) = project(*commit);
            region.contains(x, y)
        })
        .collect()
}

/// Number of line records per language across `selected`, in first-seen order.
pub fn breakdown_by_language<'a, I>(selected: I) -> IndexMap<String, usize>
where
    I: IntoIterator<Item = &'a Commit>,
{
    let mut breakdown: IndexMap<String, usize> = IndexMap::new();
    for line in selected.into_iter().flat_map(|c| &c.lines) {
        *breakdown.entry(line.language.clone()).or_insert(0) += 1;
    }
    breakdown
}

/// Breakdown with each language's share of all selected lines, in percent.
pub fn language_shares<'a, I>(selected: I) -> Vec<(String, usize, f64)>
where
    I: IntoIterator<Item = &'a Commit>,
{
    let breakdown = breakdown_by_language(selected);
    let total: usize = breakdown.values().sum();
    breakdown
        .into_iter()
        .map(|(lang, count)| {
            let share = if total == 0 { 0.0 } else { count as f64 * 100.0 / total as f64 };
            (lang, count, share)
        })
        .collect()
}
