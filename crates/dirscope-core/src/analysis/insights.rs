/// Naming and organisation insights over one scan.
///
/// Three read-only passes over the record set:
///
/// - **Naming patterns.** Dates and then numbers in file names are replaced
///   by `DATE` / `NUMBER` placeholders and the most common shapes reported.
/// - **Related files.** Files sharing an extension and a base name once a
///   trailing `_1`, `-v2`, ` 003 copy` style suffix is stripped.
/// - **Organisation.** Crowded categories with name-prefix subgroups, the
///   uncategorised count and deeply nested files.
///
/// All orderings are deterministic: ties keep first-seen (scan) order.
use crate::model::{Category, FileRecord};
use crate::scanner::ScanResult;
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

/// Naming patterns reported.
pub const TOP_PATTERNS: usize = 5;
/// Example paths kept per naming pattern.
pub const PATTERN_EXAMPLES: usize = 3;
/// Related-file groups reported.
pub const MAX_RELATED_GROUPS: usize = 5;
/// Paths kept per related-file group.
pub const RELATED_GROUP_PATHS: usize = 5;
/// A category needs more files than this to be flagged as crowded.
pub const LARGE_CATEGORY_FILES: u64 = 10;
/// A name prefix needs at least this many files to count as a subgroup.
pub const MIN_SUBCATEGORY_FILES: u64 = 3;
/// Subgroups reported per crowded category.
pub const MAX_SUBCATEGORIES: usize = 3;
/// Files nested deeper than this many directories below the root are "deep".
pub const DEEP_PATH_DEPTH: usize = 5;
/// Example deep paths kept.
pub const DEEP_PATH_EXAMPLES: usize = 3;

static DATE_RE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r"\d{4}[-_/]\d{1,2}[-_/]\d{1,2}|\d{1,2}[-_/]\d{1,2}[-_/]\d{4}|\d{1,2}[-_/]\d{1,2}[-_/]\d{2}",
    )
    .ok()
});
static NUMBER_RE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\d+").ok());
static VERSION_SUFFIX_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"[_\-\s]\d+.*$").ok());

/// One file-name shape and how often it occurs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamingPattern {
    pub pattern: String,
    pub count: u64,
    pub examples: Vec<String>,
}

/// Files that look like versions of each other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelatedGroup {
    pub base_name: String,
    pub extension: String,
    pub paths: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Subcategory {
    pub name: String,
    pub count: u64,
}

/// A category crowded enough to be worth splitting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LargeCategory {
    pub category: Category,
    pub file_count: u64,
    pub potential_subcategories: Vec<Subcategory>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OrganizationReport {
    pub large_categories: Vec<LargeCategory>,
    pub uncategorized_count: u64,
    pub deep_paths_count: u64,
    pub deep_path_examples: Vec<String>,
}

/// The `insights` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Insights {
    pub naming_patterns: Vec<NamingPattern>,
    pub related_groups: Vec<RelatedGroup>,
    pub organization: OrganizationReport,
}

/// All insights for one scan.
pub fn insights(scan: &ScanResult) -> Insights {
    Insights {
        naming_patterns: naming_patterns(&scan.files),
        related_groups: related_groups(&scan.files),
        organization: organization(&scan.files, &scan.root),
    }
}

/// Generalise a file name: dates become `DATE`; failing that, digit runs
/// become `NUMBER`; otherwise the name is its own pattern.
pub fn name_pattern(name: &str) -> String {
    for (re, placeholder) in [(&DATE_RE, "DATE"), (&NUMBER_RE, "NUMBER")] {
        if let Some(re) = re.as_ref() {
            if re.is_match(name) {
                return re.replace_all(name, placeholder).into_owned();
            }
        }
    }
    name.to_string()
}

/// Most common name patterns, most files first.
pub fn naming_patterns(files: &[FileRecord]) -> Vec<NamingPattern> {
    let mut groups: Vec<(String, Vec<&str>)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for f in files {
        let pattern = name_pattern(&f.name);
        match index.get(&pattern) {
            Some(&i) => groups[i].1.push(f.path.as_str()),
            None => {
                index.insert(pattern.clone(), groups.len());
                groups.push((pattern, vec![f.path.as_str()]));
            }
        }
    }

    // Stable: equal counts keep first-seen order.
    groups.sort_by(|a, b| b.1.len().cmp(&a.1.len()));
    groups
        .into_iter()
        .take(TOP_PATTERNS)
        .map(|(pattern, paths)| NamingPattern {
            pattern,
            count: paths.len() as u64,
            examples: paths
                .iter()
                .take(PATTERN_EXAMPLES)
                .map(|p| p.to_string())
                .collect(),
        })
        .collect()
}

/// Strip a trailing version / sequence suffix from a file stem.
pub fn base_name(stem: &str) -> String {
    match VERSION_SUFFIX_RE.as_ref() {
        Some(re) => re.replace(stem, "").into_owned(),
        None => stem.to_string(),
    }
}

/// Groups of two or more files with the same extension and base name.
///
/// Extensions are visited in first-seen order, then base names within each.
pub fn related_groups(files: &[FileRecord]) -> Vec<RelatedGroup> {
    let mut by_ext: Vec<(&str, Vec<&FileRecord>)> = Vec::new();
    for f in files.iter().filter(|f| !f.extension.is_empty()) {
        match by_ext.iter_mut().find(|(ext, _)| *ext == f.extension) {
            Some((_, members)) => members.push(f),
            None => by_ext.push((f.extension.as_str(), vec![f])),
        }
    }

    let mut groups = Vec::new();
    for (ext, members) in by_ext.into_iter().filter(|(_, m)| m.len() > 1) {
        let mut by_base: Vec<(String, Vec<&FileRecord>)> = Vec::new();
        for f in members {
            let stem = Path::new(&f.name)
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            let base = base_name(&stem);
            match by_base.iter_mut().find(|(b, _)| *b == base) {
                Some((_, group)) => group.push(f),
                None => by_base.push((base, vec![f])),
            }
        }
        groups.extend(
            by_base
                .into_iter()
                .filter(|(_, g)| g.len() > 1)
                .map(|(base_name, g)| RelatedGroup {
                    base_name,
                    extension: ext.to_string(),
                    paths: g
                        .iter()
                        .take(RELATED_GROUP_PATHS)
                        .map(|f| f.path.clone())
                        .collect(),
                }),
        );
        if groups.len() >= MAX_RELATED_GROUPS {
            break;
        }
    }
    groups.truncate(MAX_RELATED_GROUPS);
    groups
}

/// Organisation hints for the files under `root`.
pub fn organization(files: &[FileRecord], root: &Path) -> OrganizationReport {
    let mut counts: HashMap<Category, Vec<&FileRecord>> = HashMap::new();
    for f in files {
        counts.entry(f.category).or_default().push(f);
    }

    let mut large_categories: Vec<LargeCategory> = counts
        .iter()
        .filter(|(cat, members)| {
            **cat != Category::Uncategorized && members.len() as u64 > LARGE_CATEGORY_FILES
        })
        .map(|(cat, members)| LargeCategory {
            category: *cat,
            file_count: members.len() as u64,
            potential_subcategories: subcategories(members),
        })
        .collect();
    large_categories.sort_by(|a, b| {
        b.file_count
            .cmp(&a.file_count)
            .then_with(|| a.category.label().cmp(b.category.label()))
    });

    let deep: Vec<&FileRecord> = files
        .iter()
        .filter(|f| depth_below(root, &f.path) > DEEP_PATH_DEPTH)
        .collect();

    OrganizationReport {
        large_categories,
        uncategorized_count: counts
            .get(&Category::Uncategorized)
            .map_or(0, |m| m.len() as u64),
        deep_paths_count: deep.len() as u64,
        deep_path_examples: deep
            .iter()
            .take(DEEP_PATH_EXAMPLES)
            .map(|f| f.path.clone())
            .collect(),
    }
}

/// Name prefixes (text before the first `_`) shared by enough files.
fn subcategories(members: &[&FileRecord]) -> Vec<Subcategory> {
    let mut prefixes: Vec<(&str, u64)> = Vec::new();
    for f in members {
        let Some((prefix, _)) = f.name.split_once('_') else {
            continue;
        };
        if prefix.is_empty() {
            continue;
        }
        match prefixes.iter_mut().find(|(p, _)| *p == prefix) {
            Some((_, n)) => *n += 1,
            None => prefixes.push((prefix, 1)),
        }
    }

    prefixes.sort_by(|a, b| b.1.cmp(&a.1));
    prefixes
        .into_iter()
        .filter(|&(_, n)| n >= MIN_SUBCATEGORY_FILES)
        .take(MAX_SUBCATEGORIES)
        .map(|(name, count)| Subcategory {
            name: name.to_string(),
            count,
        })
        .collect()
}

/// Directories between `root` and the file: 0 for a file directly in root.
fn depth_below(root: &Path, path: &str) -> usize {
    Path::new(path)
        .strip_prefix(root)
        .map(|rel| rel.components().count().saturating_sub(1))
        .unwrap_or(0)
}
