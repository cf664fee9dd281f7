/// Scanner module: validates the scan root and drives the walk.
///
/// A scan is one synchronous call. Directory reading and per-file probing
/// run on rayon pools internally, but the returned [`ScanResult`] is
/// always in canonical walk order (depth-first, sorted by name).
pub mod walk;

use crate::config::ScanOptions;
use crate::error::ScanError;
use crate::model::{FileRecord, FileTree};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

/// Maximum number of skipped entries kept with their reason.
///
/// The count in [`ScanResult::skipped_count`] is always exact; only the
/// detail list is capped so a tree full of unreadable files can't grow it
/// without bound.
pub const MAX_SKIPPED_DETAILS: usize = 1_000;

/// One entry the scanner could not record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedEntry {
    pub path: String,
    pub reason: String,
}

/// Immutable snapshot of one completed scan.
#[derive(Debug, Clone)]
pub struct ScanResult {
    /// Absolute, canonical scan root.
    pub root: PathBuf,
    /// File records in walk order.
    pub files: Vec<FileRecord>,
    /// Directory hierarchy with sizes already rolled up.
    pub tree: FileTree,
    pub skipped_count: u64,
    /// First [`MAX_SKIPPED_DETAILS`] skipped entries.
    pub skipped: Vec<SkippedEntry>,
    /// A depth or entry guard stopped the walk early.
    pub truncated: bool,
    pub duration: Duration,
}

/// The `scan` response handed to the presentation layer.
#[derive(Debug, Serialize)]
pub struct ScanResponse<'a> {
    pub files: &'a [FileRecord],
    pub skipped_count: u64,
    pub truncated: bool,
}

impl ScanResult {
    /// Borrowing view with the response fields.
    pub fn response(&self) -> ScanResponse<'_> {
        ScanResponse {
            files: &self.files,
            skipped_count: self.skipped_count,
            truncated: self.truncated,
        }
    }

    /// Sum of all recorded file sizes.
    pub fn total_size(&self) -> u64 {
        self.tree.total_size
    }
}

/// Scan the directory tree at `root`.
///
/// Fails only for problems with the root itself. Unreadable or vanished
/// entries below it are counted in `skipped_count` and the walk continues.
pub fn scan(root: &Path, options: &ScanOptions) -> Result<ScanResult, ScanError> {
    let root = validate_root(root)?;
    info!("Starting scan of {}", root.display());
    Ok(walk::scan_tree(&root, options))
}

/// Resolve `root` to an absolute, canonical directory path we can list.
fn validate_root(root: &Path) -> Result<PathBuf, ScanError> {
    let meta = fs::metadata(root).map_err(|e| ScanError::from_io(root, e))?;
    if !meta.is_dir() {
        return Err(ScanError::NotADirectory(root.to_path_buf()));
    }
    let canonical = fs::canonicalize(root).map_err(|e| ScanError::from_io(root, e))?;
    // Listing is what actually needs permission; metadata alone may succeed.
    fs::read_dir(&canonical).map_err(|e| ScanError::from_io(root, e))?;
    Ok(canonical)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_root_is_not_found() {
        let tmp = tempfile::TempDir::new().unwrap();
        let err = scan(&tmp.path().join("nope"), &ScanOptions::default()).unwrap_err();
        assert!(matches!(err, ScanError::NotFound(_)));
    }

    #[test]
    fn file_root_is_not_a_directory() {
        let tmp = tempfile::TempDir::new().unwrap();
        let file = tmp.path().join("plain.txt");
        fs::write(&file, b"x").unwrap();
        let err = scan(&file, &ScanOptions::default()).unwrap_err();
        assert!(matches!(err, ScanError::NotADirectory(_)));
    }

    #[test]
    fn relative_root_is_made_absolute() {
        let result = scan(Path::new("."), &ScanOptions {
            max_entries: Some(0),
            ..ScanOptions::default()
        })
        .unwrap();
        assert!(result.root.is_absolute());
    }
}
