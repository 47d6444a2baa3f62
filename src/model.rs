use chrono::{DateTime, FixedOffset, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub const SCHEMA_VERSION: u32 = 1;

pub const DEFAULT_LANGUAGE: &str = "Other";

pub const DEFAULT_REPO_URL: &str = "https://github.com/YOUR_REPO";

/// One changed line from the source dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineRecord {
    pub file: String,
    pub commit: String,
    pub line: u32,
    pub depth: u32,
    pub length: u32,
    pub author: String,
    pub datetime: DateTime<FixedOffset>,
    pub hour_frac: f64,
    pub edit_count: u32,
    pub language: String,
    pub url: String,
}

/// All line records that share one commit id.
///
/// Scalar fields come from the first record of the group in input order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commit {
    pub id: String,
    pub datetime: DateTime<FixedOffset>,
    pub hour_frac: f64,
    pub author: String,
    pub total_lines: u64,
    pub url: String,
    pub language: String,
    pub lines: Vec<LineRecord>,
}

impl AsRef<Commit> for Commit {
    fn as_ref(&self) -> &Commit {
        self
    }
}

/// A row-level problem that was defaulted instead of aborting the load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseWarning {
    pub row: usize,
    pub field: String,
    pub value: String,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct LoadedData {
    pub records: Vec<LineRecord>,
    pub warnings: Vec<ParseWarning>,
}

/// Axis-aligned rectangle in projected (x, y) space, given by two opposite corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectionRegion {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl SelectionRegion {
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Same rectangle with `x0 <= x1` and `y0 <= y1`.
    pub fn normalized(&self) -> Self {
        Self {
            x0: self.x0.min(self.x1),
            y0: self.y0.min(self.y1),
            x1: self.x0.max(self.x1),
            y1: self.y0.max(self.y1),
        }
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        let r = self.normalized();
        x >= r.x0 && x <= r.x1 && y >= r.y0 && y <= r.y1
    }
}

/// Lines of a commit subset grouped by file path.
#[derive(Debug, Clone, Serialize)]
pub struct FileGroup<'a> {
    pub name: String,
    pub count: usize,
    pub lines: Vec<&'a LineRecord>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub commits: usize,
    pub files: usize,
    pub total_loc: usize,
    pub max_depth: u32,
    pub longest_line: u32,
    pub max_lines: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub cutoff: Option<DateTime<FixedOffset>>,
    pub summary: Summary,
    pub languages: IndexMap<String, usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitEntry {
    pub index: usize,
    pub top: f64,
    pub id: String,
    pub author: String,
    pub datetime: DateTime<FixedOffset>,
    pub hour_frac: f64,
    pub total_lines: u64,
    pub files: usize,
    pub language: String,
    pub url: String,
    pub narrative: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitsOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub cutoff: Option<DateTime<FixedOffset>>,
    pub total: usize,
    pub start: usize,
    pub end: usize,
    pub total_height: f64,
    pub entries: Vec<CommitEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileEntry {
    pub name: String,
    pub lines: usize,
    pub languages: IndexMap<String, usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilesOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub cutoff: Option<DateTime<FixedOffset>>,
    pub entries: Vec<FileEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub region: SelectionRegion,
    pub selected: Vec<String>,
    pub languages: IndexMap<String, usize>,
}
