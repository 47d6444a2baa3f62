use crate::model::DEFAULT_REPO_URL;
use crate::scales::{DEFAULT_CHART_HEIGHT, DEFAULT_CHART_WIDTH};
use crate::state::{DEFAULT_ITEM_HEIGHT, DEFAULT_VISIBLE_COUNT};
use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "locmeta")]
#[command(about = "Commit history explorer for per-line code change datasets")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone)]
pub struct CommonArgs {
    #[arg(long, help = "Path to the line-change CSV", default_value = "loc.csv")]
    pub data: PathBuf,

    #[arg(long, help = "Repository URL used for commit links", default_value = DEFAULT_REPO_URL)]
    pub repo_url: String,

    #[arg(long, help = "Only include commits up to this point: progress 0-100, or a date (RFC3339 or YYYY-MM-DD; a bare number such as 2025 is read as progress)")]
    pub until: Option<String>,

    #[arg(long, help = "Log filter, e.g. debug or locmeta=trace (defaults to RUST_LOG, then warn)")]
    pub log: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Summary statistics of the commits up to the cutoff
    Stats {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,
    },
    /// Scrollytelling list of commits, windowed at a scroll offset
    Commits {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,

        #[arg(long, help = "Scroll offset, in the same unit as --item-height", default_value_t = 0.0, allow_negative_numbers = true)]
        offset: f64,

        #[arg(long, help = "Number of visible items", default_value_t = DEFAULT_VISIBLE_COUNT)]
        visible: usize,

        #[arg(long, help = "Height of one item", default_value_t = DEFAULT_ITEM_HEIGHT)]
        item_height: f64,
    },
    /// Files touched by the commits up to the cutoff, largest first
    Files {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,

        #[arg(long, help = "Show at most this many files")]
        limit: Option<usize>,
    },
    /// Brush-select commits inside a time range and hour-of-day band
    Select {
        #[arg(long, help = "Start of the time range (RFC3339 or YYYY-MM-DD)")]
        from: String,

        #[arg(long, help = "End of the time range (RFC3339, or YYYY-MM-DD for the end of that day)")]
        to: String,

        #[arg(long, help = "Hour-of-day band, e.g. 9-17", default_value = "0-24")]
        hours: String,

        #[arg(long, help = "Chart width used for projection", default_value_t = DEFAULT_CHART_WIDTH)]
        width: f64,

        #[arg(long, help = "Chart height used for projection", default_value_t = DEFAULT_CHART_HEIGHT)]
        height: f64,

        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,
    },
    /// Interactive terminal UI with scatterplot, time slider and commit lists
    #[command(alias = "ui", alias = "interactive")]
    Tui,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        let interactive = matches!(self.command, Commands::Tui);
        crate::logging::init(self.common.log.as_deref(), interactive);

        match self.command {
            Commands::Stats { json, ndjson } => crate::report::stats(&self.common, json, ndjson),
            Commands::Commits {
                json,
                ndjson,
                offset,
                visible,
                item_height,
            } => crate::report::commits(&self.common, offset, visible, item_height, json, ndjson),
            Commands::Files { json, ndjson, limit } => crate::report::files(&self.common, limit, json, ndjson),
            Commands::Select {
                from,
                to,
                hours,
                width,
                height,
                json,
                ndjson,
            } => crate::report::select(&self.common, &from, &to, &hours, (width, height), json, ndjson),
            Commands::Tui => crate::tui::run(&self.common),
        }
    }
}
