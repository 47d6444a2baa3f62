use crate::model::{CommitsOutput, FilesOutput, SelectionOutput, StatsOutput};
use anyhow::Result;
use console::style;
use indexmap::IndexMap;

const TABLE_ROWS: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Table,
    Json,
    Ndjson,
}

impl Format {
    pub fn from_flags(json: bool, ndjson: bool) -> Self {
        if json {
            Format::Json
        } else if ndjson {
            Format::Ndjson
        } else {
            Format::Table
        }
    }
}

fn print_cutoff(cutoff: Option<&chrono::DateTime<chrono::FixedOffset>>) {
    if let Some(cutoff) = cutoff {
        println!("Commits up to {}", style(cutoff.format("%Y-%m-%d %H:%M")).dim());
    }
}

fn print_languages(languages: &IndexMap<String, usize>) {
    let total: usize = languages.values().sum();
    for (language, count) in languages {
        let share = if total == 0 { 0.0 } else { *count as f64 * 100.0 / total as f64 };
        println!("  {:<16} {:>8} lines {:>6.1}%", language, style(count).cyan(), share);
    }
}

pub fn print_stats(report: &StatsOutput, format: Format) -> Result<()> {
    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(report)?),
        Format::Ndjson => println!("{}", serde_json::to_string(&report.summary)?),
        Format::Table => {
            let s = &report.summary;
            println!("{}", style("Commit Summary").bold());
            println!("{}", "─".repeat(40));
            print_cutoff(report.cutoff.as_ref());
            println!("{:<14} {}", "COMMITS", style(s.commits).cyan());
            println!("{:<14} {}", "FILES", style(s.files).cyan());
            println!("{:<14} {}", "TOTAL LOC", style(s.total_loc).cyan());
            println!("{:<14} {}", "MAX DEPTH", style(s.max_depth).yellow());
            println!("{:<14} {}", "LONGEST LINE", style(s.longest_line).yellow());
            println!("{:<14} {}", "MAX LINES", style(s.max_lines).yellow());
            if !report.languages.is_empty() {
                println!("\n{}", style("Languages").bold());
                print_languages(&report.languages);
            }
        }
    }
    Ok(())
}

pub fn print_commits(report: &CommitsOutput, format: Format) -> Result<()> {
    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(report)?),
        Format::Ndjson => {
            for entry in &report.entries {
                println!("{}", serde_json::to_string(entry)?);
            }
        }
        Format::Table => {
            if report.entries.is_empty() {
                println!("No commits to display");
                return Ok(());
            }
            print_cutoff(report.cutoff.as_ref());
            println!(
                "{}",
                style(format!("Commits {}-{} of {}", report.start + 1, report.end, report.total)).bold()
            );
            println!("{}", "─".repeat(60));
            for entry in &report.entries {
                println!("{:>4} {}", style(entry.index + 1).dim(), entry.narrative);
                println!("     {}", style(&entry.url).blue());
            }
        }
    }
    Ok(())
}

pub fn print_files(report: &FilesOutput, format: Format) -> Result<()> {
    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(report)?),
        Format::Ndjson => {
            for entry in &report.entries {
                println!("{}", serde_json::to_string(entry)?);
            }
        }
        Format::Table => {
            if report.entries.is_empty() {
                println!("No files to display");
                return Ok(());
            }
            print_cutoff(report.cutoff.as_ref());
            println!(
                "{:<50} {:>8}  {}",
                style("File").bold(),
                style("Lines").bold(),
                style("Languages").bold()
            );
            println!("{}", "─".repeat(80));
            for entry in report.entries.iter().take(TABLE_ROWS) {
                let languages: Vec<String> = entry.languages.iter().map(|(l, n)| format!("{l}:{n}")).collect();
                println!("{:<50} {:>8}  {}", entry.name, entry.lines, style(languages.join(" ")).dim());
            }
            if report.entries.len() > TABLE_ROWS {
                println!("\n... and {} more files", report.entries.len() - TABLE_ROWS);
            }
        }
    }
    Ok(())
}

pub fn print_selection(report: &SelectionOutput, label: &str, format: Format) -> Result<()> {
    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(report)?),
        Format::Ndjson => {
            for id in &report.selected {
                println!("{}", serde_json::json!({ "commit": id }));
            }
        }
        Format::Table => {
            println!("{}", style(label).bold());
            for id in report.selected.iter().take(TABLE_ROWS) {
                println!("  {id}");
            }
            if !report.languages.is_empty() {
                println!("\n{}", style("Languages").bold());
                print_languages(&report.languages);
            }
        }
    }
    Ok(())
}
