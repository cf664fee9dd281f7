/// Session: holds the most recent published scan for a client.
///
/// The current snapshot lives behind an `Arc` inside a `RwLock`. A new scan
/// is built entirely outside the lock and then swapped in with one short
/// write, so readers either see the previous snapshot or the new one,
/// never a partial result. A failed scan leaves the previous snapshot in
/// place.
use crate::analysis::{aggregate, aging_report, find_duplicates, insights};
use crate::analysis::{AgingReport, DuplicateGroup, Insights, Visualization};
use crate::config::ScanOptions;
use crate::error::{NoScanDataError, ScanError};
use crate::scanner::{self, ScanResult};
use crate::search::{SearchIndex, SearchQuery, SearchResults};
use chrono::{DateTime, Local};
use parking_lot::RwLock;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

/// A completed scan together with its search index.
#[derive(Debug)]
pub struct Snapshot {
    pub scan: ScanResult,
    pub index: SearchIndex,
}

impl Snapshot {
    /// Index `scan` for searching.
    pub fn new(scan: ScanResult) -> Self {
        let index = SearchIndex::new(&scan);
        Self { scan, index }
    }
}

/// Per-client scan state. Cheap to share across threads (`&Session`).
#[derive(Debug, Default)]
pub struct Session {
    current: RwLock<Option<Arc<Snapshot>>>,
}

impl Session {
    /// An empty session with no scan data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan `root` and, on success, publish the result as the current
    /// snapshot, superseding any previous one.
    pub fn scan(&self, root: &Path, options: &ScanOptions) -> Result<Arc<Snapshot>, ScanError> {
        let result = match scanner::scan(root, options) {
            Ok(r) => r,
            Err(err) => {
                warn!("Scan of {} failed: {err}", root.display());
                return Err(err);
            }
        };
        let snapshot = Arc::new(Snapshot::new(result));
        *self.current.write() = Some(Arc::clone(&snapshot));
        debug!("Published snapshot of {}", snapshot.scan.root.display());
        Ok(snapshot)
    }

    /// The current snapshot, if any scan has completed.
    pub fn snapshot(&self) -> Result<Arc<Snapshot>, NoScanDataError> {
        self.current.read().clone().ok_or(NoScanDataError)
    }

    /// Whether a scan result is available.
    pub fn has_data(&self) -> bool {
        self.current.read().is_some()
    }

    /// Search the current snapshot.
    pub fn search(&self, query: &SearchQuery) -> Result<SearchResults, NoScanDataError> {
        let snap = self.snapshot()?;
        let results: Vec<_> = snap
            .index
            .search(&snap.scan, query)
            .into_iter()
            .cloned()
            .collect();
        Ok(SearchResults {
            count: results.len(),
            results,
        })
    }

    /// Distribution summaries and the size tree for the current snapshot.
    pub fn visualize(&self) -> Result<Visualization, NoScanDataError> {
        Ok(aggregate(&self.snapshot()?.scan))
    }

    /// Age buckets of the current snapshot relative to `now`.
    pub fn aging(&self, now: DateTime<Local>) -> Result<AgingReport, NoScanDataError> {
        Ok(aging_report(&self.snapshot()?.scan.files, now))
    }

    /// Content-identical files in the current snapshot. Reads file contents.
    pub fn duplicates(&self) -> Result<Vec<DuplicateGroup>, NoScanDataError> {
        Ok(find_duplicates(&self.snapshot()?.scan.files))
    }

    /// Naming patterns, related files and organisation hints.
    pub fn insights(&self) -> Result<Insights, NoScanDataError> {
        Ok(insights(&self.snapshot()?.scan))
    }
}
