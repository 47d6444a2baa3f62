use crate::model::{Commit, LineRecord};
use indexmap::IndexMap;
use tracing::debug;

/// Link to a commit page under `repo_url`.
pub fn commit_url(repo_url: &str, id: &str) -> String {
    format!("{}/commit/{id}", repo_url.trim_end_matches('/'))
}

/// Group line records into commits, in order of first appearance of each commit id.
pub fn aggregate_commits(records: &[LineRecord]) -> Vec<Commit> {
    let mut groups: IndexMap<&str, Vec<&LineRecord>> = IndexMap::new();
    for record in records {
        groups.entry(record.commit.as_str()).or_default().push(record);
    }

    let commits: Vec<Commit> = groups
        .into_iter()
        .filter_map(|(id, lines)| {
            let first = *lines.first()?;
            Some(Commit {
                id: id.to_string(),
                datetime: first.datetime,
                hour_frac: first.hour_frac,
                author: first.author.clone(),
                total_lines: lines.iter().map(|l| l.edit_count as u64).sum(),
                url: first.url.clone(),
                language: first.language.clone(),
                lines: lines.into_iter().cloned().collect(),
            })
        })
        .collect();

    debug!(records = records.len(), commits = commits.len(), "Aggregated commits");
    commits
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::model::DEFAULT_REPO_URL;
    use chrono::{DateTime, Duration, FixedOffset};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    pub(crate) fn t0() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2025-02-10T09:30:00-08:00").unwrap()
    }

    pub(crate) fn record(commit: &str, file: &str, edit_count: u32, language: &str) -> LineRecord {
        record_at(commit, file, edit_count, language, t0())
    }

    pub(crate) fn record_at(
        commit: &str,
        file: &str,
        edit_count: u32,
        language: &str,
        datetime: DateTime<FixedOffset>,
    ) -> LineRecord {
        LineRecord {
            file: file.to_string(),
            commit: commit.to_string(),
            line: 1,
            depth: 0,
            length: 10,
            author: "ana".to_string(),
            datetime,
            hour_frac: crate::loader::hour_fraction(&datetime),
            edit_count,
            language: language.to_string(),
            url: commit_url(DEFAULT_REPO_URL, commit),
        }
    }

    #[test]
    fn groups_by_commit_and_sums_edit_counts() {
        let records = vec![
            record("a", "x", 5, "go"),
            record("a", "y", 3, "go"),
            record("b", "x", 2, "rust"),
        ];
        let commits = aggregate_commits(&records);
        assert_eq!(commits.len(), 2);
        assert_eq!(commits[0].id, "a");
        assert_eq!(commits[0].total_lines, 8);
        assert_eq!(commits[0].lines.len(), 2);
        assert_eq!(commits[1].id, "b");
        assert_eq!(commits[1].total_lines, 2);
        assert_eq!(commits[1].lines.len(), 1);
    }

    #[test]
    fn first_record_wins_for_scalar_fields() {
        let mut late = record_at("a", "y", 1, "python", t0() + Duration::hours(3));
        late.author = "bo".to_string();
        let records = vec![record("a", "x", 1, "go"), late];
        let commit = &aggregate_commits(&records)[0];
        assert_eq!(commit.author, "ana");
        assert_eq!(commit.language, "go");
        assert_eq!(commit.datetime, t0());
        assert_eq!(commit.hour_frac, 9.5);
    }

    #[test]
    fn empty_input_gives_no_commits() {
        assert!(aggregate_commits(&[]).is_empty());
    }

    #[test]
    fn commit_url_trims_trailing_slash() {
        assert_eq!(commit_url("https://example.com/r/", "abc"), "https://example.com/r/commit/abc");
    }

    proptest! {
        #[test]
        fn preserves_edit_totals_and_first_seen_order(
            rows in prop::collection::vec((0u8..6, 0u32..50), 1..60)
        ) {
            let records: Vec<LineRecord> = rows
                .iter()
                .map(|(c, n)| record(&format!("c{c}"), "f", *n, "go"))
                .collect();
            let commits = aggregate_commits(&records);

            let total: u64 = commits.iter().map(|c| c.total_lines).sum();
            let expected: u64 = records.iter().map(|r| r.edit_count as u64).sum();
            prop_assert_eq!(total, expected);

            let mut first_seen: Vec<&str> = Vec::new();
            for r in &records {
                if !first_seen.contains(&r.commit.as_str()) {
                    first_seen.push(&r.commit);
                }
            }
            let order: Vec<&str> = commits.iter().map(|c| c.id.as_str()).collect();
            prop_assert_eq!(order, first_seen);

            for c in &commits {
                prop_assert!(!c.lines.is_empty());
                prop_assert!(c.lines.iter().all(|l| l.commit == c.id));
            }
        }
    }
}
