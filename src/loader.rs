use crate::aggregate::commit_url;
use crate::error::{LocmetaError, Result};
use crate::model::{LineRecord, LoadedData, ParseWarning, DEFAULT_LANGUAGE};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Timelike};
use csv::{ReaderBuilder, StringRecord};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

const REQUIRED_COLUMNS: [&str; 7] = ["datetime", "line", "depth", "length", "file", "commit", "author"];

const OFFSET_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
];

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

struct Columns {
    datetime: usize,
    line: usize,
    depth: usize,
    length: usize,
    file: usize,
    commit: usize,
    author: usize,
    lines_edited: Option<usize>,
    language: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &StringRecord, source_name: &str) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h.trim().eq_ignore_ascii_case(name));

        let positions = REQUIRED_COLUMNS.map(|name| find(name));
        let missing: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .zip(&positions)
            .filter(|(_, pos)| pos.is_none())
            .map(|(name, _)| *name)
            .collect();
        if !missing.is_empty() {
            return Err(LocmetaError::data_load(
                source_name,
                format!("missing required columns: {}", missing.join(", ")),
            ));
        }

        let [datetime, line, depth, length, file, commit, author] = positions.map(Option::unwrap_or_default);
        Ok(Self {
            datetime,
            line,
            depth,
            length,
            file,
            commit,
            author,
            lines_edited: find("lines_edited"),
            language: find("language"),
        })
    }
}

/// Load a line-change CSV file.
pub fn load_records<P: AsRef<Path>>(path: P, repo_url: &str) -> Result<LoadedData> {
    load_records_with_progress(path, repo_url, false)
}

pub fn load_records_with_progress<P: AsRef<Path>>(
    path: P,
    repo_url: &str,
    show_progress: bool,
) -> Result<LoadedData> {
    let path = path.as_ref();
    let source_name = path.display().to_string();
    let file = File::open(path).map_err(|e| LocmetaError::data_load(&source_name, e.to_string()))?;

    let pb = if show_progress {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(format!("Loading {source_name}..."));
        pb
    } else {
        ProgressBar::hidden()
    };

    let result = parse_records_inner(file, &source_name, repo_url, &pb);
    pb.finish_and_clear();
    result
}

/// Parse line records from any CSV reader. Nothing is returned unless every row parses.
pub fn parse_records<R: Read>(reader: R, source_name: &str, repo_url: &str) -> Result<LoadedData> {
    parse_records_inner(reader, source_name, repo_url, &ProgressBar::hidden())
}

fn parse_records_inner<R: Read>(
    reader: R,
    source_name: &str,
    repo_url: &str,
    pb: &ProgressBar,
) -> Result<LoadedData> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|e| LocmetaError::data_load(source_name, e.to_string()))?
        .clone();
    let columns = Columns::from_headers(&headers, source_name)?;

    let mut data = LoadedData::default();
    for (idx, result) in rdr.records().enumerate() {
        let row = idx + 1;
        let record = result.map_err(|e| LocmetaError::data_load(source_name, e.to_string()))?;
        let parsed = parse_row(&record, row, &columns, repo_url, &mut data.warnings)
            .map_err(|reason| LocmetaError::data_load(source_name, reason))?;
        data.records.push(parsed);
        pb.inc(1);
    }

    for w in &data.warnings {
        warn!(row = w.row, field = %w.field, value = %w.value, "{}", w.message);
    }
    debug!(
        source = source_name,
        records = data.records.len(),
        warnings = data.warnings.len(),
        "Loaded line records"
    );
    Ok(data)
}

fn parse_row(
    record: &StringRecord,
    row: usize,
    columns: &Columns,
    repo_url: &str,
    warnings: &mut Vec<ParseWarning>,
) -> std::result::Result<LineRecord, String> {
    let field = |idx: usize| record.get(idx).unwrap_or("");

    let raw_datetime = field(columns.datetime);
    let datetime = parse_timestamp(raw_datetime)
        .ok_or_else(|| format!("row {row}: field `datetime` has invalid timestamp `{raw_datetime}`"))?;

    let commit = field(columns.commit).to_string();
    if commit.is_empty() {
        return Err(format!("row {row}: field `commit` is empty"));
    }

    let edit_count = match columns.lines_edited.map(field) {
        None | Some("") => 0,
        Some(raw) => parse_edit_count(raw).unwrap_or_else(|| {
            warnings.push(ParseWarning {
                row,
                field: "lines_edited".to_string(),
                value: raw.to_string(),
                message: "unparseable edit count, defaulting to 0".to_string(),
            });
            0
        }),
    };

    let language = match columns.language.map(field) {
        Some(lang) if !lang.is_empty() => lang.to_string(),
        _ => DEFAULT_LANGUAGE.to_string(),
    };

    Ok(LineRecord {
        file: field(columns.file).to_string(),
        line: required_u32(field(columns.line), "line", row)?,
        depth: required_u32(field(columns.depth), "depth", row)?,
        length: required_u32(field(columns.length), "length", row)?,
        author: field(columns.author).to_string(),
        hour_frac: hour_fraction(&datetime),
        datetime,
        edit_count,
        language,
        url: commit_url(repo_url, &commit),
        commit,
    })
}

fn required_u32(raw: &str, name: &str, row: usize) -> std::result::Result<u32, String> {
    raw.parse::<u32>()
        .map_err(|_| format!("row {row}: field `{name}` has non-numeric value `{raw}`"))
}

/// Integer or float text; negative and non-finite values are rejected.
fn parse_edit_count(raw: &str) -> Option<u32> {
    if let Ok(n) = raw.parse::<u32>() {
        return Some(n);
    }
    let f = raw.parse::<f64>().ok()?;
    if f.is_finite() && f >= 0.0 && f <= u32::MAX as f64 {
        Some(f.round() as u32)
    } else {
        None
    }
}

/// Hour of day in the timestamp's own offset, as `hour + minute / 60`.
pub fn hour_fraction(datetime: &DateTime<FixedOffset>) -> f64 {
    datetime.hour() as f64 + datetime.minute() as f64 / 60.0
}

/// Parse the timestamp formats accepted in the `datetime` column.
///
/// Values without an offset are taken as UTC.
pub fn parse_timestamp(input: &str) -> Option<DateTime<FixedOffset>> {
    let input = input.trim();

    // RFC3339
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt);
    }

    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(input, fmt) {
            return Some(dt);
        }
    }

    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, fmt) {
            return Some(naive.and_utc().fixed_offset());
        }
    }

    // YYYY-MM-DD
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().fixed_offset())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DEFAULT_REPO_URL;
    use pretty_assertions::assert_eq;

    const HEADER: &str = "file,line,type,commit,author,date,time,timezone,datetime,depth,length,lines_edited,language\n";

    fn parse(body: &str) -> Result<LoadedData> {
        parse_records(format!("{HEADER}{body}").as_bytes(), "test.csv", DEFAULT_REPO_URL)
    }

    #[test]
    fn parses_rows_into_records() {
        let data = parse(
            "src/main.rs,1,x,abc123,Ana,2025-02-10,14:30:00,-08:00,2025-02-10T14:30:00-08:00,2,40,5,rust\n",
        )
        .unwrap();
        assert_eq!(data.records.len(), 1);
        assert!(data.warnings.is_empty());
        let r = &data.records[0];
        assert_eq!(r.file, "src/main.rs");
        assert_eq!(r.commit, "abc123");
        assert_eq!((r.line, r.depth, r.length, r.edit_count), (1, 2, 40, 5));
        assert_eq!(r.author, "Ana");
        assert_eq!(r.language, "rust");
        assert_eq!(r.hour_frac, 14.5);
        assert_eq!(r.url, "https://github.com/YOUR_REPO/commit/abc123");
    }

    #[test]
    fn empty_language_defaults_to_other() {
        let data = parse("a.js,1,x,c1,Ana,,,,2025-02-10T09:00:00Z,0,10,1,\n").unwrap();
        assert_eq!(data.records[0].language, "Other");
    }

    #[test]
    fn missing_edit_count_is_silent_zero() {
        let csv = "datetime,line,depth,length,file,commit,author\n2025-02-10T09:00:00Z,1,0,10,a.js,c1,Ana\n";
        let data = parse_records(csv.as_bytes(), "t", DEFAULT_REPO_URL).unwrap();
        assert_eq!(data.records[0].edit_count, 0);
        assert_eq!(data.records[0].language, "Other");
        assert!(data.warnings.is_empty());
    }

    #[test]
    fn bad_edit_count_warns_and_defaults() {
        let data = parse("a.js,1,x,c1,Ana,,,,2025-02-10T09:00:00Z,0,10,abc,js\n").unwrap();
        assert_eq!(data.records[0].edit_count, 0);
        assert_eq!(data.warnings.len(), 1);
        assert_eq!(data.warnings[0].row, 1);
        assert_eq!(data.warnings[0].field, "lines_edited");
        assert_eq!(data.warnings[0].value, "abc");
    }

    #[test]
    fn float_edit_count_is_accepted() {
        let data = parse("a.js,1,x,c1,Ana,,,,2025-02-10T09:00:00Z,0,10,3.0,js\n").unwrap();
        assert_eq!(data.records[0].edit_count, 3);
    }

    #[test]
    fn bad_required_number_fails_whole_load() {
        let err = parse(
            "a.js,1,x,c1,Ana,,,,2025-02-10T09:00:00Z,0,10,1,js\n\
             b.js,2,x,c1,Ana,,,,2025-02-10T09:00:00Z,deep,10,1,js\n",
        )
        .unwrap_err();
        let msg = err.to_string();
        assert!(matches!(err, LocmetaError::DataLoad { .. }));
        assert!(msg.contains("row 2"), "{msg}");
        assert!(msg.contains("depth"), "{msg}");
    }

    #[test]
    fn bad_timestamp_fails() {
        let err = parse("a.js,1,x,c1,Ana,,,,yesterday,0,10,1,js\n").unwrap_err();
        assert!(err.to_string().contains("datetime"));
    }

    #[test]
    fn missing_required_column_fails() {
        let csv = "datetime,line,depth,file,commit,author\n2025-02-10T09:00:00Z,1,0,a.js,c1,Ana\n";
        let err = parse_records(csv.as_bytes(), "t", DEFAULT_REPO_URL).unwrap_err();
        assert!(err.to_string().contains("length"));

        let csv = "datetime,line,file,commit\n2025-02-10T09:00:00Z,1,a.js,c1\n";
        let err = parse_records(csv.as_bytes(), "t", DEFAULT_REPO_URL).unwrap_err();
        assert!(err.to_string().contains("missing required columns: depth, length, author"));
    }

    #[test]
    fn unreadable_file_is_data_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_records(dir.path().join("nope.csv"), DEFAULT_REPO_URL).unwrap_err();
        assert!(matches!(err, LocmetaError::DataLoad { .. }));
    }

    #[test]
    fn timestamp_formats() {
        let with_offset = parse_timestamp("2025-02-10T14:25:06-08:00").unwrap();
        assert_eq!(hour_fraction(&with_offset), 14.0 + 25.0 / 60.0);

        let spaced = parse_timestamp("2025-02-10 08:15:00").unwrap();
        assert_eq!(hour_fraction(&spaced), 8.25);

        let compact = parse_timestamp("2025-02-10 08:15:00+0100").unwrap();
        assert_eq!(compact.offset().local_minus_utc(), 3600);

        let day = parse_timestamp("2025-02-10").unwrap();
        assert_eq!(hour_fraction(&day), 0.0);

        assert!(parse_timestamp("10/02/2025").is_none());
    }
}
