/// Scan configuration.
///
/// Loaded by the binary from an optional TOML file (the `[scan]` table) and
/// overridden by command-line flags. Every field has a default, so an empty
/// file or no file at all is valid.
use serde::Deserialize;

/// Limits and walk behaviour for one scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanOptions {
    /// Stop after this many walked entries (files and directories below the
    /// root); the result is flagged truncated.
    pub max_entries: Option<usize>,
    /// Do not record entries deeper than this (root's children are depth 1).
    pub max_depth: Option<usize>,
    /// Skip dot-files and dot-directories.
    pub skip_hidden: bool,
    /// Worker threads for directory reading and probing. 0 = one per CPU.
    pub threads: usize,
}

impl ScanOptions {
    /// Effective worker count.
    pub fn worker_threads(&self) -> usize {
        if self.threads == 0 {
            num_cpus::get()
        } else {
            self.threads
        }
    }
}
