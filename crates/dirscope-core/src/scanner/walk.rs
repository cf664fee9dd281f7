/// Deterministic directory walker using `jwalk` + rayon.
///
/// The scan runs in three phases:
///
/// 1. **Walk.** `jwalk` reads directories on its own rayon pool but yields
///    entries depth-first with each directory's entries sorted by name, so
///    the sequence is identical for an unchanged tree. Depth and entry
///    guards are applied here.
/// 2. **Probe.** Files are probed in parallel. `par_iter().collect()` keeps
///    the input order, so parallelism never changes the observable result.
/// 3. **Build.** The record list and the arena tree are assembled in walk
///    order. Directories are registered in `dir_map` by path so each file
///    finds its parent without a tree search.
use super::{ScanResult, SkippedEntry, MAX_SKIPPED_DETAILS};
use crate::config::ScanOptions;
use crate::error::ProbeError;
use crate::model::{FileNode, FileRecord, FileTree, NodeIndex};
use crate::probe::probe;
use compact_str::CompactString;
use rayon::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Outcome of probing one walk item. `None` for directories.
type Probed = Option<Result<FileRecord, ProbeError>>;

/// An entry accepted by the walk phase.
enum WalkItem {
    Dir(PathBuf),
    File(PathBuf),
}

/// Accumulates skip information for the result.
#[derive(Default)]
struct Skips {
    count: u64,
    details: Vec<SkippedEntry>,
}

impl Skips {
    fn record(&mut self, path: &Path, reason: String) {
        debug!("Skipping {}: {reason}", path.display());
        self.count += 1;
        if self.details.len() < MAX_SKIPPED_DETAILS {
            self.details.push(SkippedEntry {
                path: path.to_string_lossy().into_owned(),
                reason,
            });
        }
    }
}

/// Walk `root` (already validated and absolute) and build the scan result.
pub fn scan_tree(root: &Path, options: &ScanOptions) -> ScanResult {
    let start = Instant::now();
    let threads = options.worker_threads();
    let mut skips = Skips::default();

    let (items, truncated) = walk(root, options, threads, &mut skips);
    let file_count = items.iter().filter(|i| matches!(i, WalkItem::File(_))).count();
    debug!(
        "Walk complete: {} entries ({file_count} files) in {:?}. Probing...",
        items.len(),
        start.elapsed()
    );

    let probed = probe_all(&items, threads);

    let mut tree = FileTree::with_root(
        CompactString::new(root_display_name(root)),
        items.len() + 1,
    );
    let mut files: Vec<FileRecord> = Vec::with_capacity(file_count);

    // Map from directory path to its NodeIndex in the arena.
    let mut dir_map: HashMap<PathBuf, NodeIndex> = HashMap::with_capacity(1_024);
    dir_map.insert(root.to_path_buf(), tree.root);

    for (item, outcome) in items.into_iter().zip(probed) {
        match item {
            WalkItem::Dir(path) => {
                let parent = parent_index(&mut tree, &mut dir_map, &path, root);
                let idx = tree.push_child(parent, FileNode::new_dir(file_name(&path), None));
                dir_map.insert(path, idx);
            }
            WalkItem::File(path) => match outcome {
                Some(Ok(record)) => {
                    let parent = parent_index(&mut tree, &mut dir_map, &path, root);
                    tree.push_child(
                        parent,
                        FileNode::new_file(
                            CompactString::new(&record.name),
                            record.size_bytes,
                            record.category,
                            None,
                        ),
                    );
                    files.push(record);
                }
                Some(Err(err)) => skips.record(err.path(), err.to_string()),
                None => {}
            },
        }
    }

    tree.aggregate_sizes();
    if tree.is_empty() {
        debug!("{} has no entries", root.display());
    }

    let duration = start.elapsed();
    info!(
        "Scan of {} complete: {} files, {} nodes, {} bytes, {} skipped in {duration:?}",
        root.display(),
        files.len(),
        tree.len(),
        tree.total_size,
        skips.count
    );

    ScanResult {
        root: root.to_path_buf(),
        files,
        tree,
        skipped_count: skips.count,
        skipped: skips.details,
        truncated,
        duration,
    }
}

/// Phase 1: collect accepted entries in canonical walk order.
///
/// Returns the entries and whether a guard cut the walk short.
fn walk(
    root: &Path,
    options: &ScanOptions,
    threads: usize,
    skips: &mut Skips,
) -> (Vec<WalkItem>, bool) {
    let parallelism = if threads <= 1 {
        jwalk::Parallelism::Serial
    } else {
        jwalk::Parallelism::RayonNewPool(threads)
    };

    let mut walker = jwalk::WalkDir::new(root)
        .sort(true)
        .skip_hidden(options.skip_hidden)
        .follow_links(false)
        .parallelism(parallelism);
    // Walk one level past the limit so we can tell whether anything was cut.
    if let Some(depth) = options.max_depth {
        walker = walker.max_depth(depth.saturating_add(1));
    }

    let mut items = Vec::new();
    let mut truncated = false;

    for entry_result in walker {
        let entry = match entry_result {
            Ok(e) => e,
            Err(err) => {
                // jwalk errors are typically access-denied on directory reads.
                let path = err.path().map(Path::to_path_buf).unwrap_or_default();
                skips.record(&path, err.to_string());
                continue;
            }
        };

        if entry.depth == 0 {
            continue;
        }
        if options.max_depth.is_some_and(|limit| entry.depth > limit) {
            truncated = true;
            continue;
        }
        if options.max_entries.is_some_and(|limit| items.len() >= limit) {
            truncated = true;
            break;
        }

        let path = entry.path();
        if entry.file_type().is_dir() {
            // The directory itself is kept; only its listing failed.
            if let Some(err) = &entry.read_children_error {
                skips.record(&path, err.to_string());
            }
            items.push(WalkItem::Dir(path));
        } else {
            items.push(WalkItem::File(path));
        }
    }

    if truncated {
        warn!(
            "Scan of {} truncated after {} entries (max_entries={:?}, max_depth={:?})",
            root.display(),
            items.len(),
            options.max_entries,
            options.max_depth
        );
    }
    (items, truncated)
}

/// Phase 2: probe every file entry in parallel, preserving order.
fn probe_all(items: &[WalkItem], threads: usize) -> Vec<Probed> {
    let run = || -> Vec<Probed> {
        items
            .par_iter()
            .map(|item| match item {
                WalkItem::File(path) => Some(probe(path)),
                WalkItem::Dir(_) => None,
            })
            .collect()
    };

    match rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|i| format!("dirscope-probe-{i}"))
        .build()
    {
        Ok(pool) => pool.install(run),
        Err(err) => {
            warn!("Could not build probe pool ({err}); using the global rayon pool");
            run()
        }
    }
}

/// Find the parent directory's node, creating any missing ancestors.
fn parent_index(
    tree: &mut FileTree,
    dir_map: &mut HashMap<PathBuf, NodeIndex>,
    path: &Path,
    root: &Path,
) -> NodeIndex {
    match path.parent() {
        Some(parent) => match dir_map.get(parent) {
            Some(&idx) => idx,
            None => ensure_ancestors(tree, dir_map, parent, root),
        },
        None => tree.root,
    }
}

/// Ensure all ancestor directories of `target` exist in the tree and `dir_map`.
///
/// Only needed when a directory entry itself was dropped (e.g. its stat
/// failed) while its children were still listed.
fn ensure_ancestors(
    tree: &mut FileTree,
    dir_map: &mut HashMap<PathBuf, NodeIndex>,
    target: &Path,
    root: &Path,
) -> NodeIndex {
    let mut missing: Vec<PathBuf> = Vec::new();
    let mut current = target.to_path_buf();

    while !dir_map.contains_key(&current) && current != root {
        missing.push(current.clone());
        match current.parent() {
            Some(p) => current = p.to_path_buf(),
            None => break,
        }
    }

    let mut parent_idx = dir_map.get(&current).copied().unwrap_or(tree.root);

    for ancestor in missing.into_iter().rev() {
        let idx = tree.push_child(parent_idx, FileNode::new_dir(file_name(&ancestor), None));
        dir_map.insert(ancestor, idx);
        parent_idx = idx;
    }

    parent_idx
}

fn file_name(path: &Path) -> CompactString {
    path.file_name()
        .map(|n| CompactString::new(n.to_string_lossy()))
        .unwrap_or_default()
}

/// Derive a display name for the scan root: its last component, or the
/// whole path for filesystem roots such as `/` or `C:\`.
fn root_display_name(path: &Path) -> String {
    match path.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None => {
            let s = path.to_string_lossy();
            let trimmed = s.trim_end_matches(['\\', '/']);
            if trimmed.is_empty() {
                s.into_owned()
            } else {
                trimmed.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_display_name_uses_last_component() {
        assert_eq!(root_display_name(Path::new("/home/user/docs")), "docs");
        assert_eq!(root_display_name(Path::new("/")), "/");
    }
}
