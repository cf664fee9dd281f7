use chrono::{DateTime, Local};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Scan a directory tree, categorise every file and report on it.
#[derive(Parser, Debug)]
#[command(name = "dirscope", version, about, long_about = None)]
pub struct Cli {
    /// TOML file with a `[scan]` table of defaults.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log at debug level (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List every file record under the root.
    Scan(ScanArgs),
    /// Filter file records by name, category, extension, size or date.
    Search(SearchArgs),
    /// Category, extension, size and month distributions plus the size tree.
    Visualize(ScanArgs),
    /// Groups of byte-identical files.
    Duplicates(ScanArgs),
    /// Files not modified for one, two or three years.
    Aging(ScanArgs),
    /// Naming patterns, related files and organisation hints.
    Insights(ScanArgs),
    /// Metadata record for a single file, without scanning.
    Metadata {
        /// File to inspect.
        path: PathBuf,
    },
}

#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Directory to scan.
    pub root: PathBuf,

    /// Stop after this many entries.
    #[arg(long)]
    pub max_entries: Option<usize>,

    /// Do not descend past this depth (root's children are depth 1).
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Skip dot-files and dot-directories.
    #[arg(long)]
    pub skip_hidden: bool,

    /// Worker threads (0 = one per CPU).
    #[arg(long)]
    pub threads: Option<usize>,

    /// Output format. CSV applies to `scan` and `search` only.
    #[arg(long, value_enum, default_value_t = Format::Json)]
    pub format: Format,
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    #[command(flatten)]
    pub scan: ScanArgs,

    /// Case-insensitive substring of the name or path.
    #[arg(short, long, default_value = "")]
    pub query: String,

    /// Category label; repeat for several.
    #[arg(long = "category")]
    pub categories: Vec<String>,

    /// Extension, with or without the dot; repeat for several.
    #[arg(long = "ext")]
    pub extensions: Vec<String>,

    #[arg(long)]
    pub min_size: Option<u64>,

    #[arg(long)]
    pub max_size: Option<u64>,

    /// RFC 3339 timestamp, e.g. 2024-01-31T00:00:00+00:00.
    #[arg(long, value_parser = parse_time)]
    pub modified_after: Option<DateTime<Local>>,

    /// RFC 3339 timestamp.
    #[arg(long, value_parser = parse_time)]
    pub modified_before: Option<DateTime<Local>>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Json,
    Csv,
}

fn parse_time(s: &str) -> Result<DateTime<Local>, String> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Local))
        .map_err(|e| format!("invalid timestamp {s:?}: {e}"))
}
