/// Error types for the scan / categorise / aggregate engine.
///
/// - [`ProbeError`] is per-entry and recoverable: the scanner counts it as a
///   skip and keeps walking.
/// - [`ScanError`] is root-level and aborts that scan.
/// - [`NoScanDataError`] is returned by session queries before any scan
///   has completed.
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failure to probe a single filesystem entry.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("entry vanished before it could be read: {path}")]
    Vanished { path: PathBuf },

    #[error("symlink loops back to an ancestor directory: {path}")]
    SymlinkCycle { path: PathBuf },

    #[error("unsupported entry type ({kind}): {path}")]
    Unsupported { path: PathBuf, kind: &'static str },

    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ProbeError {
    /// Classify an I/O error raised while probing `path`.
    pub fn from_io(path: &Path, err: io::Error) -> Self {
        let path = path.to_path_buf();
        match err.kind() {
            io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            io::ErrorKind::NotFound => Self::Vanished { path },
            _ => Self::Io { path, source: err },
        }
    }

    /// The path the failure refers to.
    pub fn path(&self) -> &Path {
        match self {
            Self::PermissionDenied { path }
            | Self::Vanished { path }
            | Self::SymlinkCycle { path }
            | Self::Unsupported { path, .. }
            | Self::Io { path, .. } => path,
        }
    }
}

/// Root-level scan failure. Fatal to that scan invocation only.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("directory not found: {0}")]
    NotFound(PathBuf),

    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ScanError {
    /// Classify an I/O error raised while opening the scan root.
    pub fn from_io(path: &Path, err: io::Error) -> Self {
        let path = path.to_path_buf();
        match err.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path),
            _ => Self::Io { path, source: err },
        }
    }
}

/// A query or visualisation was requested before any scan completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no scan data available; scan a directory first")]
pub struct NoScanDataError;

/// Aggregation can only fail for lack of a scan result.
pub type AggregationError = NoScanDataError;
