/// Duplicate file detection (size-first, then partial hash, then full hash).
///
/// 1. Group files by size; files with unique sizes cannot be duplicates.
///    Empty files are ignored.
/// 2. For size-matching groups, hash the first 4 KiB to eliminate most
///    false candidates cheaply.
/// 3. For remaining candidates, hash the full file content.
///
/// Hashing uses BLAKE3 and runs on the rayon pool. Files that cannot be read
/// at hash time are dropped from grouping with a warning.
use crate::model::size::format_size;
use crate::model::FileRecord;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use tracing::{debug, warn};

/// Bytes hashed in the partial pass.
const PARTIAL_HASH_LEN: u64 = 4 * 1024;

/// A group of files with identical size and content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateGroup {
    pub size_bytes: u64,
    pub size_display: String,
    /// Hex BLAKE3 digest of the full content.
    pub hash: String,
    /// Paths in scan order.
    pub paths: Vec<String>,
}

/// Find duplicate files among `files`.
///
/// Groups are ordered by size descending, then by first path.
pub fn find_duplicates(files: &[FileRecord]) -> Vec<DuplicateGroup> {
    let mut by_size: BTreeMap<u64, Vec<&FileRecord>> = BTreeMap::new();
    for f in files.iter().filter(|f| f.size_bytes > 0) {
        by_size.entry(f.size_bytes).or_default().push(f);
    }
    let candidates: Vec<Vec<&FileRecord>> = by_size.into_values().filter(|g| g.len() > 1).collect();
    debug!("{} size groups are duplicate candidates", candidates.len());

    let partial = refine(candidates, Some(PARTIAL_HASH_LEN));

    let mut groups: Vec<DuplicateGroup> = partial
        .into_par_iter()
        .flat_map_iter(|group| split_by_hash(group, None))
        .map(|(hash, members)| DuplicateGroup {
            size_bytes: members[0].size_bytes,
            size_display: format_size(members[0].size_bytes),
            hash,
            paths: members.iter().map(|f| f.path.clone()).collect(),
        })
        .collect();

    groups.sort_by(|a, b| {
        b.size_bytes
            .cmp(&a.size_bytes)
            .then_with(|| a.paths[0].cmp(&b.paths[0]))
    });
    groups
}

/// Split each candidate group by the hash of its first `limit` bytes and
/// keep only sub-groups that still have more than one member.
fn refine<'a>(groups: Vec<Vec<&'a FileRecord>>, limit: Option<u64>) -> Vec<Vec<&'a FileRecord>> {
    groups
        .into_par_iter()
        .flat_map_iter(|group| split_by_hash(group, limit).into_iter().map(|(_, g)| g))
        .collect()
}

/// Hash every member and group by digest. Only groups of two or more are
/// returned, in first-member order, each keeping the input order.
fn split_by_hash(group: Vec<&FileRecord>, limit: Option<u64>) -> Vec<(String, Vec<&FileRecord>)> {
    let mut by_hash: Vec<(String, Vec<&FileRecord>)> = Vec::new();
    for f in group {
        let hash = match hash_file(Path::new(&f.path), limit) {
            Ok(h) => h,
            Err(err) => {
                warn!("Skipping {} for duplicate detection: {err}", f.path);
                continue;
            }
        };
        match by_hash.iter_mut().find(|(h, _)| *h == hash) {
            Some((_, members)) => members.push(f),
            None => by_hash.push((hash, vec![f])),
        }
    }
    by_hash.retain(|(_, members)| members.len() > 1);
    by_hash
}

/// BLAKE3 of a file's content, optionally limited to the first `limit` bytes.
fn hash_file(path: &Path, limit: Option<u64>) -> io::Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = blake3::Hasher::new();
    match limit {
        Some(n) => io::copy(&mut file.by_ref().take(n), &mut hasher)?,
        None => io::copy(&mut file, &mut hasher)?,
    };
    Ok(hasher.finalize().to_hex().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::probe;
    use std::fs;

    fn write(dir: &Path, name: &str, content: &[u8]) -> FileRecord {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        probe(&path).unwrap()
    }

    #[test]
    fn identical_files_are_grouped() {
        let tmp = tempfile::TempDir::new().unwrap();
        let files = vec![
            write(tmp.path(), "a.txt", b"same content"),
            write(tmp.path(), "b.txt", b"different!!!"),
            write(tmp.path(), "c.txt", b"same content"),
        ];

        let groups = find_duplicates(&files);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].size_bytes, 12);
        assert_eq!(groups[0].paths, [files[0].path.clone(), files[2].path.clone()]);
        assert_eq!(groups[0].hash.len(), 64);
    }

    /// Files sharing the first 4 KiB but differing later must not match.
    #[test]
    fn partial_hash_collision_is_resolved_by_full_hash() {
        let tmp = tempfile::TempDir::new().unwrap();
        let mut a = vec![7u8; 8192];
        let mut b = a.clone();
        a[8000] = 1;
        b[8000] = 2;
        let files = vec![write(tmp.path(), "a.bin", &a), write(tmp.path(), "b.bin", &b)];

        assert!(find_duplicates(&files).is_empty());
    }

    #[test]
    fn empty_files_are_ignored() {
        let tmp = tempfile::TempDir::new().unwrap();
        let files = vec![write(tmp.path(), "a", b""), write(tmp.path(), "b", b"")];
        assert!(find_duplicates(&files).is_empty());
    }

    #[test]
    fn groups_are_ordered_by_size_descending() {
        let tmp = tempfile::TempDir::new().unwrap();
        let files = vec![
            write(tmp.path(), "s1", b"ab"),
            write(tmp.path(), "s2", b"ab"),
            write(tmp.path(), "l1", b"abcdef"),
            write(tmp.path(), "l2", b"abcdef"),
        ];
        let groups = find_duplicates(&files);
        let sizes: Vec<u64> = groups.iter().map(|g| g.size_bytes).collect();
        assert_eq!(sizes, [6, 2]);
    }

    #[test]
    fn vanished_file_is_skipped_not_fatal() {
        let tmp = tempfile::TempDir::new().unwrap();
        let files = vec![
            write(tmp.path(), "a", b"xyz"),
            write(tmp.path(), "b", b"xyz"),
            write(tmp.path(), "c", b"xyz"),
        ];
        fs::remove_file(&files[1].path).unwrap();

        let groups = find_duplicates(&files);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].paths.len(), 2);
    }
}
