/// One structured metadata record per scanned file.
///
/// Field names are the serialised contract consumed by the presentation
/// layer, so renaming any of them is a breaking change.
use super::category::Category;
use chrono::{DateTime, Local};
use serde::Serialize;

/// Permission bits of a file as seen by the scanning user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PermissionBits {
    pub readable: bool,
    pub writable: bool,
    pub executable: bool,
}

/// Metadata snapshot for a single file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileRecord {
    /// Absolute path. Unique within one scan.
    pub path: String,
    /// Base name.
    pub name: String,
    /// Parent directory path.
    pub directory: String,
    /// Lower-cased extension without the leading dot; empty if none.
    pub extension: String,
    pub size_bytes: u64,
    /// Derived from `size_bytes`, never authoritative.
    pub size_display: String,
    /// Falls back to `modified` where the filesystem has no birth time.
    pub created: DateTime<Local>,
    pub modified: DateTime<Local>,
    pub accessed: DateTime<Local>,
    /// Best-effort guess, `unknown` when nothing matched.
    pub mime_type: String,
    pub is_readable: bool,
    pub is_writable: bool,
    pub is_executable: bool,
    pub category: Category,
}
