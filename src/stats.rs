use crate::model::{Commit, FileEntry, FileGroup, Summary};
use indexmap::{IndexMap, IndexSet};

/// Totals over a commit subset. An empty subset yields all zeros.
pub fn summarize<'a, I>(commits: I) -> Summary
where
    I: IntoIterator<Item = &'a Commit>,
{
    let mut files: IndexSet<&str> = IndexSet::new();
    let mut summary = Summary::default();

    for commit in commits {
        summary.commits += 1;
        summary.max_lines = summary.max_lines.max(commit.total_lines);
        for line in &commit.lines {
            files.insert(line.file.as_str());
            summary.total_loc += 1;
            summary.max_depth = summary.max_depth.max(line.depth);
            summary.longest_line = summary.longest_line.max(line.length);
        }
    }

    summary.files = files.len();
    summary
}

/// Lines of the subset grouped by file, largest group first.
///
/// Groups with equal counts keep the order in which their file was first seen.
pub fn file_groups<'a, I>(commits: I) -> Vec<FileGroup<'a>>
where
    I: IntoIterator<Item = &'a Commit>,
{
    let mut groups: IndexMap<&str, FileGroup<'a>> = IndexMap::new();
    for line in commits.into_iter().flat_map(|c| &c.lines) {
        let group = groups.entry(line.file.as_str()).or_insert_with(|| FileGroup {
            name: line.file.clone(),
            count: 0,
            lines: Vec::new(),
        });
        group.count += 1;
        group.lines.push(line);
    }

    let mut groups: Vec<FileGroup<'a>> = groups.into_values().collect();
    groups.sort_by(|a, b| b.count.cmp(&a.count));
    groups
}

impl FileGroup<'_> {
    pub fn to_entry(&self) -> FileEntry {
        let mut languages: IndexMap<String, usize> = IndexMap::new();
        for line in &self.lines {
            *languages.entry(line.language.clone()).or_insert(0) += 1;
        }
        FileEntry {
            name: self.name.clone(),
            lines: self.count,
            languages,
        }
    }
}

/// Distinct files touched by one commit.
pub fn commit_file_count(commit: &Commit) -> usize {
    commit.lines.iter().map(|l| l.file.as_str()).collect::<IndexSet<_>>().len()
}

/// One line of the scrollytelling list. `index` is the commit's position in the filtered list.
pub fn commit_narrative(index: usize, commit: &Commit) -> String {
    let when = commit.datetime.format("%A, %B %-d, %Y at %-I:%M %p");
    let what = if index == 0 {
        "my first commit, and it was glorious"
    } else {
        "another glorious commit"
    };
    format!(
        "On {when}, I made {what}. I edited {} lines across {} files.",
        commit.total_lines,
        commit_file_count(commit)
    )
}
