/// FileProbe: reads OS metadata for a single path and builds its record.
///
/// Pure function of the path: no shared state, safe to call from any
/// number of rayon workers at once.
pub mod mime;

use crate::analysis::categorizer::{categorize, CategoryInput};
use crate::error::ProbeError;
use crate::model::size::format_size;
use crate::model::FileRecord;
use crate::platform::permission_bits;
use chrono::{DateTime, Local};
use std::fs::{self, Metadata};
use std::path::Path;
use std::time::SystemTime;

/// Probe `path` and return a fully populated, categorised record.
///
/// Symlinks to regular files are probed through their target. Symlinks
/// pointing at a directory are never followed: one that leads back to an
/// ancestor is a [`ProbeError::SymlinkCycle`], any other is
/// [`ProbeError::Unsupported`]. Directories and special files are
/// unsupported as well.
pub fn probe(path: &Path) -> Result<FileRecord, ProbeError> {
    let link_meta = fs::symlink_metadata(path).map_err(|e| ProbeError::from_io(path, e))?;

    let meta = if link_meta.file_type().is_symlink() {
        let target = fs::metadata(path).map_err(|e| ProbeError::from_io(path, e))?;
        if target.is_dir() {
            return Err(if links_to_ancestor(path) {
                ProbeError::SymlinkCycle {
                    path: path.to_path_buf(),
                }
            } else {
                ProbeError::Unsupported {
                    path: path.to_path_buf(),
                    kind: "directory symlink",
                }
            });
        }
        target
    } else {
        link_meta
    };

    if meta.is_dir() {
        return Err(ProbeError::Unsupported {
            path: path.to_path_buf(),
            kind: "directory",
        });
    }
    if !meta.is_file() {
        return Err(ProbeError::Unsupported {
            path: path.to_path_buf(),
            kind: "special file",
        });
    }

    Ok(build_record(path, &meta))
}

/// Whether the directory a symlink resolves to contains the link itself.
fn links_to_ancestor(link: &Path) -> bool {
    let Ok(target) = fs::canonicalize(link) else {
        return false;
    };
    let Some(parent) = link.parent() else {
        return false;
    };
    match fs::canonicalize(parent) {
        Ok(parent) => parent.starts_with(&target),
        Err(_) => false,
    }
}

fn build_record(path: &Path, meta: &Metadata) -> FileRecord {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let directory = path
        .parent()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    let size_bytes = meta.len();
    let perms = permission_bits(meta, &extension);

    // Some filesystems do not record birth (or access) time.
    let modified = meta.modified().unwrap_or(SystemTime::UNIX_EPOCH);
    let created = meta.created().unwrap_or(modified);
    let accessed = meta.accessed().unwrap_or(modified);

    let category = categorize(&CategoryInput {
        extension: &extension,
        name: &name,
        size_bytes,
        permissions: perms,
    });
    let mime_type = mime::guess(&extension);

    FileRecord {
        path: path.to_string_lossy().into_owned(),
        name,
        directory,
        size_display: format_size(size_bytes),
        size_bytes,
        created: DateTime::<Local>::from(created),
        modified: DateTime::<Local>::from(modified),
        accessed: DateTime::<Local>::from(accessed),
        mime_type,
        is_readable: perms.readable,
        is_writable: perms.writable,
        is_executable: perms.executable,
        category,
        extension,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Category;
    use std::fs;

    #[test]
    fn probe_regular_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("Report.PDF");
        fs::write(&path, vec![0u8; 2048]).unwrap();

        let rec = probe(&path).unwrap();
        assert_eq!(rec.name, "Report.PDF");
        assert_eq!(rec.extension, "pdf");
        assert_eq!(rec.size_bytes, 2048);
        assert_eq!(rec.size_display, "2.00 KB");
        assert_eq!(rec.mime_type, "application/pdf");
        assert_eq!(rec.category, Category::Documents);
        assert_eq!(rec.directory, tmp.path().to_string_lossy());
        assert!(rec.is_readable);
        assert!(rec.created <= Local::now());
    }

    #[test]
    fn probe_missing_path_is_vanished() {
        let tmp = tempfile::TempDir::new().unwrap();
        let err = probe(&tmp.path().join("gone.txt")).unwrap_err();
        assert!(matches!(err, ProbeError::Vanished { .. }));
    }

    #[test]
    fn probe_directory_is_unsupported() {
        let tmp = tempfile::TempDir::new().unwrap();
        let err = probe(tmp.path()).unwrap_err();
        assert!(matches!(err, ProbeError::Unsupported { kind: "directory", .. }));
    }

    #[cfg(unix)]
    #[test]
    fn probe_symlink_to_parent_is_cycle() {
        let tmp = tempfile::TempDir::new().unwrap();
        let sub = tmp.path().join("sub");
        fs::create_dir(&sub).unwrap();
        let link = sub.join("up");
        std::os::unix::fs::symlink(tmp.path(), &link).unwrap();

        let err = probe(&link).unwrap_err();
        assert!(matches!(err, ProbeError::SymlinkCycle { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn probe_symlink_to_file_uses_target() {
        let tmp = tempfile::TempDir::new().unwrap();
        let target = tmp.path().join("data.csv");
        fs::write(&target, b"a,b\n1,2\n").unwrap();
        let link = tmp.path().join("alias.csv");
        std::os::unix::fs::symlink(&target, &link).unwrap();

        let rec = probe(&link).unwrap();
        assert_eq!(rec.size_bytes, 8);
        assert_eq!(rec.category, Category::Spreadsheets);
        assert_eq!(rec.name, "alias.csv");
    }
}
