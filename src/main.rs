//! dirscope: directory inventory from the command line.
//!
//! Thin binary entry point. All scanning and analysis lives in the
//! `dirscope-core` crate; this file parses flags, runs one scan through a
//! [`Session`] and prints the requested report to stdout.

mod app_config;
mod cli;
mod logging;

use anyhow::Context;
use app_config::AppConfig;
use clap::Parser;
use cli::{Cli, Commands, Format, ScanArgs};
use dirscope_core::export::write_csv;
use dirscope_core::model::size::{format_count, format_size};
use dirscope_core::model::FileRecord;
use dirscope_core::{SearchQuery, Session};
use serde::Serialize;
use std::io::{self, Write};
use tracing::{info, warn};

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    logging::init_logger(args.verbose);

    let config = AppConfig::load(args.config.as_deref())?;
    let session = Session::new();

    match &args.command {
        Commands::Scan(scan) => {
            run_scan(&session, &config, scan)?;
            let snap = session.snapshot()?;
            output_records(&snap.scan.files, scan.format, &snap.scan.response())
        }
        Commands::Search(search) => {
            run_scan(&session, &config, &search.scan)?;
            let query = SearchQuery {
                text: search.query.clone(),
                categories: search.categories.clone(),
                extensions: search.extensions.clone(),
                min_size: search.min_size,
                max_size: search.max_size,
                modified_after: search.modified_after,
                modified_before: search.modified_before,
            };
            let results = session.search(&query)?;
            info!("{} matching files", results.count);
            output_records(&results.results, search.scan.format, &results)
        }
        Commands::Visualize(scan) => {
            run_scan(&session, &config, scan)?;
            print_json(&session.visualize()?)
        }
        Commands::Duplicates(scan) => {
            run_scan(&session, &config, scan)?;
            print_json(&session.duplicates()?)
        }
        Commands::Aging(scan) => {
            run_scan(&session, &config, scan)?;
            print_json(&session.aging(chrono::Local::now())?)
        }
        Commands::Insights(scan) => {
            run_scan(&session, &config, scan)?;
            print_json(&session.insights()?)
        }
        Commands::Metadata { path } => {
            let record = dirscope_core::probe_file(path)
                .with_context(|| format!("reading metadata of {}", path.display()))?;
            print_json(&record)
        }
    }
}

/// Scan `args.root` into the session and report skips on stderr.
fn run_scan(session: &Session, config: &AppConfig, args: &ScanArgs) -> anyhow::Result<()> {
    let options = config.scan_options(args);
    let snap = session
        .scan(&args.root, &options)
        .with_context(|| format!("scanning {}", args.root.display()))?;

    let scan = &snap.scan;
    info!(
        "{} files, {} in {:?} ({} skipped)",
        format_count(scan.files.len() as u64),
        format_size(scan.total_size()),
        scan.duration,
        format_count(scan.skipped_count)
    );
    for skipped in &scan.skipped {
        warn!("Skipped {}: {}", skipped.path, skipped.reason);
    }
    if scan.skipped_count > scan.skipped.len() as u64 {
        warn!(
            "... and {} more skipped entries",
            scan.skipped_count - scan.skipped.len() as u64
        );
    }
    if scan.truncated {
        warn!("Scan was truncated by max_entries / max_depth");
    }
    Ok(())
}

/// Records as CSV, or `json_body` as JSON.
fn output_records<T: Serialize>(
    records: &[FileRecord],
    format: Format,
    json_body: &T,
) -> anyhow::Result<()> {
    match format {
        Format::Csv => {
            let stdout = io::stdout();
            write_csv(records, stdout.lock()).context("writing CSV")?;
            Ok(())
        }
        Format::Json => print_json(json_body),
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, value).context("writing JSON")?;
    writeln!(out)?;
    Ok(())
}
